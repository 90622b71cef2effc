//! Session service
//!
//! Mock authentication for the dashboard:
//! - Sign-up: shape-checks the credentials and acknowledges, nothing is stored
//! - Login: shape-checks the credentials and creates the current session
//! - Logout: forgets the current session
//! - Session lookup: memory first, then the local store
//!
//! At most one session exists per service. It is mirrored into the local
//! store under a fixed key so a fresh service over the same store picks it
//! back up.

use crate::models::{Acknowledgement, Session};
use crate::services::latency::{Latency, Operation};
use crate::services::validation::{is_valid_email_shape, is_valid_password_length};
use crate::storage::LocalStore;
use anyhow::Context;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Default local store key for the current session
pub const DEFAULT_SESSION_KEY: &str = "auth_user";

/// Error types for session service operations
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    /// Credentials rejected at login
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    /// Validation error (invalid input)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Local store failure
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Session service owning the current session
pub struct AuthService {
    store: Arc<dyn LocalStore>,
    latency: Latency,
    session_key: String,
    current: RwLock<Option<Session>>,
}

impl AuthService {
    /// Create a new session service over the given store
    pub fn new(store: Arc<dyn LocalStore>, latency: Latency) -> Self {
        Self::with_session_key(store, latency, DEFAULT_SESSION_KEY)
    }

    /// Create a new session service persisting under a custom key
    pub fn with_session_key(
        store: Arc<dyn LocalStore>,
        latency: Latency,
        session_key: impl Into<String>,
    ) -> Self {
        Self {
            store,
            latency,
            session_key: session_key.into(),
            current: RwLock::new(None),
        }
    }

    /// Local store key holding the session
    pub fn session_key(&self) -> &str {
        &self.session_key
    }

    /// Register a new account
    ///
    /// Only the shape of the credentials is checked. No session is created;
    /// the caller logs in separately.
    ///
    /// # Errors
    ///
    /// - `ValidationError` if the email has no `@` or the password is shorter
    ///   than eight characters
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Acknowledgement, AuthServiceError> {
        self.latency.simulate(Operation::SignUp).await;

        if !is_valid_email_shape(email) {
            return Err(AuthServiceError::ValidationError(
                "Invalid email address".to_string(),
            ));
        }
        if !is_valid_password_length(password) {
            return Err(AuthServiceError::ValidationError(
                "Password must be at least 8 characters".to_string(),
            ));
        }

        tracing::info!("Account created for {}", email);
        Ok(Acknowledgement::with_message("Account created successfully"))
    }

    /// Log in and become the current session
    ///
    /// Any credentials of the right shape are accepted. A fresh session
    /// replaces whatever session was current.
    ///
    /// # Errors
    ///
    /// - `AuthenticationError` if the credentials fail the shape checks
    /// - `InternalError` if the session cannot be written to the local store
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthServiceError> {
        self.latency.simulate(Operation::Login).await;

        if !is_valid_email_shape(email) || !is_valid_password_length(password) {
            tracing::debug!("Rejected login for {}", email);
            return Err(AuthServiceError::AuthenticationError(
                "Invalid email or password".to_string(),
            ));
        }

        let session = Session::new(email);
        let json = serde_json::to_string(&session).context("Failed to serialize session")?;
        self.store
            .set_item(&self.session_key, &json)
            .await
            .context("Failed to persist session")?;

        *self.current.write().await = Some(session.clone());

        tracing::info!("User {} logged in as {}", session.email, session.user_id);
        Ok(session)
    }

    /// Log out
    ///
    /// Removes the durable copy, then clears the in-memory session. Logging
    /// out with no active session succeeds. If the store rejects the removal
    /// the session stays current.
    ///
    /// # Errors
    ///
    /// - `InternalError` if the durable copy cannot be removed
    pub async fn logout(&self) -> Result<Acknowledgement, AuthServiceError> {
        self.latency.simulate(Operation::Logout).await;

        // Memory is only cleared once the durable copy is gone.
        let mut current = self.current.write().await;
        self.store
            .remove_item(&self.session_key)
            .await
            .context("Failed to remove persisted session")?;
        let previous = current.take();
        drop(current);

        match previous {
            Some(session) => tracing::info!("User {} logged out", session.email),
            None => tracing::debug!("Logout with no active session"),
        }
        Ok(Acknowledgement::ok())
    }

    /// Get the current session
    ///
    /// Returns the in-memory session if present. Otherwise loads the durable
    /// copy and caches it in memory. A missing, unreadable or unparseable
    /// durable copy yields `None`.
    pub async fn current_session(&self) -> Option<Session> {
        self.latency.simulate(Operation::CurrentSession).await;

        if let Some(session) = self.current.read().await.as_ref() {
            return Some(session.clone());
        }

        let stored = match self.store.get_item(&self.session_key).await {
            Ok(Some(stored)) => stored,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Failed to read persisted session: {:#}", e);
                return None;
            }
        };

        let session: Session = match serde_json::from_str(&stored) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Ignoring unparseable persisted session: {}", e);
                return None;
            }
        };

        let mut current = self.current.write().await;
        // A login may have landed while we were reading the store.
        let session = current.get_or_insert(session).clone();
        tracing::debug!("Restored session for {}", session.email);
        Some(session)
    }

    /// Check whether a session is current
    pub async fn is_authenticated(&self) -> bool {
        self.current_session().await.is_some()
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
