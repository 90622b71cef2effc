//! Application container
//!
//! Owns one local store, one session service and one QR registry. Build a
//! fresh `App` per test to get isolated state.

use anyhow::Result;
use std::sync::Arc;

use crate::config::{ApiConfig, Config};
use crate::services::{AuthService, Latency, QrService};
use crate::storage::{create_store, LocalStore};

/// Shared application state
#[derive(Clone)]
pub struct App {
    pub auth: Arc<AuthService>,
    pub qr: Arc<QrService>,
    pub store: Arc<dyn LocalStore>,
    pub api: Arc<ApiConfig>,
}

impl App {
    /// Build the application from configuration
    pub async fn build(config: &Config) -> Result<Self> {
        let store = create_store(&config.storage).await?;
        Ok(Self::with_store(config, store))
    }

    /// Build the application over an existing store
    ///
    /// Building twice over the same store models a page reload: the QR
    /// registry starts over, the session is restored from the store.
    pub fn with_store(config: &Config, store: Arc<dyn LocalStore>) -> Self {
        let latency = Latency::new(config.latency.clone());

        let auth = Arc::new(AuthService::with_session_key(
            store.clone(),
            latency.clone(),
            config.storage.session_key.clone(),
        ));
        let qr = Arc::new(QrService::new(config.qr.clone(), latency));

        Self {
            auth,
            qr,
            store,
            api: Arc::new(config.api.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LatencyConfig, StorageConfig, StorageDriver};
    use crate::services::{AuthServiceError, QrServiceError};
    use tempfile::TempDir;

    fn test_config() -> Config {
        Config {
            latency: LatencyConfig::disabled(),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_build_defaults() {
        let app = App::build(&test_config()).await.unwrap();

        assert!(!app.auth.is_authenticated().await);
        assert_eq!(app.qr.list().await.total, 2);
        assert_eq!(app.api.base_url, "http://localhost:3001");
        assert_eq!(app.auth.session_key(), "auth_user");
    }

    #[tokio::test]
    async fn test_dashboard_flow() {
        let mut config = test_config();
        config.qr.seed_demo_data = false;
        let app = App::build(&config).await.unwrap();

        app.auth.sign_up("a@b.com", "password123").await.unwrap();
        let session = app.auth.login("a@b.com", "password123").await.unwrap();
        assert!(app.auth.is_authenticated().await);

        let qr = app.qr.create("https://example.com", Some("Home")).await.unwrap();
        let list = app.qr.list().await;
        assert_eq!(list.qr_codes[0].label, "Home");
        assert!(list.qr_codes[0].image_url.contains("https%3A%2F%2Fexample.com"));

        assert!(matches!(
            app.qr.create("not-a-url", Some("X")).await,
            Err(QrServiceError::ValidationError(_))
        ));
        assert_eq!(app.qr.list().await.total, 1);

        app.qr.update_destination(&qr.id, "https://example.org").await.unwrap();
        assert_eq!(app.qr.resolve(&qr.id).await.unwrap(), "https://example.org");
        assert!(app.qr.redirect_url(&qr.id).ends_with(&format!("/redirect/{}", qr.id)));

        // Reload: same store, fresh services
        let reloaded = App::with_store(&config, app.store.clone());
        let restored = reloaded.auth.current_session().await.unwrap();
        assert_eq!(restored.user_id, session.user_id);
        assert_eq!(restored.email, "a@b.com");
        assert_eq!(reloaded.qr.list().await.total, 0);

        reloaded.auth.logout().await.unwrap();
        assert!(!reloaded.auth.is_authenticated().await);
        assert_eq!(app.store.get_item("auth_user").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_short_password_login_example() {
        let app = App::build(&test_config()).await.unwrap();

        assert!(matches!(
            app.auth.login("a@b.com", "short").await,
            Err(AuthServiceError::AuthenticationError(_))
        ));
    }

    #[tokio::test]
    async fn test_file_store_session_survives_rebuild() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            storage: StorageConfig {
                driver: StorageDriver::File,
                path: dir.path().join("local_storage.json"),
                ..StorageConfig::default()
            },
            ..test_config()
        };

        let session = {
            let app = App::build(&config).await.unwrap();
            app.auth.login("a@b.com", "password123").await.unwrap()
        };

        let restarted = App::build(&config).await.unwrap();
        let restored = restarted.auth.current_session().await.unwrap();
        assert_eq!(restored, session);

        restarted.auth.logout().await.unwrap();
        let again = App::build(&config).await.unwrap();
        assert!(!again.auth.is_authenticated().await);
    }

    fn nested_file_config(dir: &TempDir) -> Config {
        Config {
            storage: StorageConfig {
                driver: StorageDriver::File,
                path: dir.path().join("sub").join("local_storage.json"),
                ..StorageConfig::default()
            },
            ..test_config()
        }
    }

    /// Replace `dir/sub` with a regular file so the store can no longer be written
    fn block_store_dir(dir: &TempDir) {
        let sub = dir.path().join("sub");
        if sub.is_dir() {
            std::fs::remove_dir_all(&sub).unwrap();
        }
        std::fs::write(&sub, "in the way").unwrap();
    }

    #[tokio::test]
    async fn test_unwritable_file_store_login_leaves_no_session() {
        let dir = TempDir::new().unwrap();
        let app = App::build(&nested_file_config(&dir)).await.unwrap();
        block_store_dir(&dir);

        let result = app.auth.login("a@b.com", "password123").await;

        assert!(matches!(result, Err(AuthServiceError::InternalError(_))));
        assert!(!app.auth.is_authenticated().await);
        assert_eq!(app.store.get_item("auth_user").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unwritable_file_store_logout_keeps_session() {
        let dir = TempDir::new().unwrap();
        let config = nested_file_config(&dir);
        let app = App::build(&config).await.unwrap();
        let session = app.auth.login("a@b.com", "password123").await.unwrap();
        block_store_dir(&dir);

        let result = app.auth.logout().await;

        assert!(matches!(result, Err(AuthServiceError::InternalError(_))));
        assert_eq!(app.auth.current_session().await, Some(session));
        assert!(app.store.get_item("auth_user").await.unwrap().is_some());

        // Once the directory is writable again the retry goes through
        std::fs::remove_file(dir.path().join("sub")).unwrap();
        app.auth.logout().await.unwrap();
        assert!(!app.auth.is_authenticated().await);
        let restarted = App::build(&config).await.unwrap();
        assert!(!restarted.auth.is_authenticated().await);
    }
}
