//! QR registry service
//!
//! Implements the QR code lifecycle:
//! - Create with a validated destination (newest first)
//! - List in registry order
//! - Update the destination of an existing code
//! - Delete
//! - Build redirect links and resolve them against the registry
//!
//! Records live in process memory only.

use crate::config::QrConfig;
use crate::models::{Acknowledgement, QrCode, QrCodeList, DEMO_QR_CODES};
use crate::services::latency::{Latency, Operation};
use crate::services::validation::{encode_destination, is_valid_destination};
use std::collections::HashSet;
use tokio::sync::RwLock;
use uuid::Uuid;

const ID_LENGTH: usize = 8;

/// Error types for QR registry operations
#[derive(Debug, thiserror::Error)]
pub enum QrServiceError {
    /// QR code not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl QrServiceError {
    fn not_found() -> Self {
        QrServiceError::NotFound("QR code not found".to_string())
    }

    fn invalid_url() -> Self {
        QrServiceError::ValidationError("Invalid URL format".to_string())
    }
}

#[derive(Debug, Default)]
struct Registry {
    /// Newest first
    codes: Vec<QrCode>,
    /// Every id ever handed out, including deleted ones
    issued_ids: HashSet<String>,
}

impl Registry {
    fn position(&self, id: &str) -> Option<usize> {
        self.codes.iter().position(|qr| qr.id == id)
    }

    fn find(&self, id: &str) -> Option<&QrCode> {
        self.codes.iter().find(|qr| qr.id == id)
    }

    fn issue_id(&mut self) -> String {
        loop {
            let id = Uuid::new_v4().simple().to_string()[..ID_LENGTH].to_string();
            if self.issued_ids.insert(id.clone()) {
                return id;
            }
        }
    }
}

/// QR registry service
pub struct QrService {
    config: QrConfig,
    latency: Latency,
    registry: RwLock<Registry>,
}

impl QrService {
    /// Create a new registry
    ///
    /// Starts with the demo records when `config.seed_demo_data` is set.
    pub fn new(config: QrConfig, latency: Latency) -> Self {
        let mut registry = Registry::default();

        if config.seed_demo_data {
            for demo in DEMO_QR_CODES.iter() {
                let mut qr = QrCode::new(
                    demo.id,
                    demo.label,
                    demo.destination,
                    build_image_url(&config, demo.destination),
                );
                qr.created_at = demo.created_at();
                registry.issued_ids.insert(qr.id.clone());
                registry.codes.push(qr);
            }
        }

        Self {
            config,
            latency,
            registry: RwLock::new(registry),
        }
    }

    /// Create an empty registry with default templates
    pub fn empty(latency: Latency) -> Self {
        Self::new(
            QrConfig {
                seed_demo_data: false,
                ..QrConfig::default()
            },
            latency,
        )
    }

    /// Create a QR code
    ///
    /// An absent or empty label falls back to the configured default. The
    /// new record goes to the front of the registry.
    ///
    /// # Errors
    /// - `ValidationError` if the destination is empty or not an absolute URL
    pub async fn create(
        &self,
        destination: &str,
        label: Option<&str>,
    ) -> Result<QrCode, QrServiceError> {
        self.latency.simulate(Operation::CreateQr).await;

        if destination.is_empty() {
            return Err(QrServiceError::ValidationError(
                "Destination URL is required".to_string(),
            ));
        }
        if !is_valid_destination(destination) {
            return Err(QrServiceError::invalid_url());
        }

        let label = match label {
            Some(label) if !label.is_empty() => label,
            _ => self.config.default_label.as_str(),
        };
        let image_url = self.image_url(destination);

        let mut registry = self.registry.write().await;
        let id = registry.issue_id();
        let qr = QrCode::new(id, label, destination, image_url);
        registry.codes.insert(0, qr.clone());

        tracing::info!("Created QR code {} -> {}", qr.id, qr.destination);
        Ok(qr)
    }

    /// List all QR codes, newest first
    pub async fn list(&self) -> QrCodeList {
        self.latency.simulate(Operation::ListQr).await;

        let codes = self.registry.read().await.codes.clone();
        tracing::debug!("Listing {} QR codes", codes.len());
        QrCodeList::new(codes)
    }

    /// Update the destination of a QR code
    ///
    /// The image URL is left as it was at creation.
    ///
    /// # Errors
    /// - `NotFound` if no record has this id
    /// - `ValidationError` if the new destination is not an absolute URL
    pub async fn update_destination(
        &self,
        id: &str,
        new_destination: &str,
    ) -> Result<QrCode, QrServiceError> {
        self.latency.simulate(Operation::UpdateQr).await;

        let mut registry = self.registry.write().await;
        let index = registry.position(id).ok_or_else(QrServiceError::not_found)?;

        if !is_valid_destination(new_destination) {
            return Err(QrServiceError::invalid_url());
        }

        let qr = &mut registry.codes[index];
        qr.set_destination(new_destination);

        tracing::info!("Updated QR code {} -> {}", qr.id, qr.destination);
        Ok(qr.clone())
    }

    /// Delete a QR code
    ///
    /// # Errors
    /// - `NotFound` if no record has this id
    pub async fn delete(&self, id: &str) -> Result<Acknowledgement, QrServiceError> {
        self.latency.simulate(Operation::DeleteQr).await;

        let mut registry = self.registry.write().await;
        let index = registry.position(id).ok_or_else(QrServiceError::not_found)?;
        registry.codes.remove(index);

        tracing::info!("Deleted QR code {}", id);
        Ok(Acknowledgement::ok())
    }

    /// Get a QR code by id
    ///
    /// # Errors
    /// - `NotFound` if no record has this id
    pub async fn get(&self, id: &str) -> Result<QrCode, QrServiceError> {
        self.registry
            .read()
            .await
            .find(id)
            .cloned()
            .ok_or_else(QrServiceError::not_found)
    }

    /// Resolve a scanned code to its current destination
    ///
    /// # Errors
    /// - `ValidationError` if the id is empty
    /// - `NotFound` if no record has this id
    pub async fn resolve(&self, id: &str) -> Result<String, QrServiceError> {
        if id.is_empty() {
            return Err(QrServiceError::ValidationError(
                "qrId is required".to_string(),
            ));
        }

        let destination = self
            .registry
            .read()
            .await
            .find(id)
            .map(|qr| qr.destination.clone());

        match destination {
            Some(destination) => {
                tracing::debug!("Resolved QR code {} -> {}", id, destination);
                Ok(destination)
            }
            None => {
                tracing::debug!("Resolve miss for QR code {}", id);
                Err(QrServiceError::not_found())
            }
        }
    }

    /// Redirect link for a QR code
    ///
    /// Pure string construction; the id is not looked up.
    pub fn redirect_url(&self, id: &str) -> String {
        format!(
            "{}/redirect/{}",
            self.config.redirect_base_url.trim_end_matches('/'),
            id
        )
    }

    /// Link to the rendered image of `destination`
    pub fn image_url(&self, destination: &str) -> String {
        build_image_url(&self.config, destination)
    }
}

fn build_image_url(config: &QrConfig, destination: &str) -> String {
    format!(
        "{}?size={}&data={}",
        config.image_service_url,
        config.image_size,
        encode_destination(destination)
    )
}


// ============================================================================
// Property-Based Tests
// ============================================================================
