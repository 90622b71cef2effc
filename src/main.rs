//! qrdash - console walkthrough of the mock dashboard services

use anyhow::Result;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use qrdash::{config::Config, App};

const DEMO_EMAIL: &str = "demo@qrdash.local";
const DEMO_PASSWORD: &str = "demo-password";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qrdash=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting qrdash walkthrough...");

    // Load configuration
    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded (API base URL {})", config.api.base_url);

    let app = App::build(&config).await?;

    match app.auth.current_session().await {
        Some(session) => tracing::info!("Restored session for {}", session.email),
        None => {
            let ack = app.auth.sign_up(DEMO_EMAIL, DEMO_PASSWORD).await?;
            tracing::info!("{}", ack.message.unwrap_or_default());
            app.auth.login(DEMO_EMAIL, DEMO_PASSWORD).await?;
        }
    }

    let created = app
        .qr
        .create("https://www.rust-lang.org", Some("Rust homepage"))
        .await?;
    tracing::info!("Image: {}", created.image_url);
    tracing::info!("Redirect link: {}", app.qr.redirect_url(&created.id));

    if let Err(e) = app.qr.create("not-a-url", Some("Broken")).await {
        tracing::warn!("Create rejected: {}", e);
    }

    let list = app.qr.list().await;
    tracing::info!("{} QR codes on the dashboard", list.total);
    for qr in &list.qr_codes {
        tracing::info!("  {} {:<16} {}", qr.id, qr.label, qr.destination);
    }

    app.qr
        .update_destination(&created.id, "https://doc.rust-lang.org/book/")
        .await?;
    let destination = app.qr.resolve(&created.id).await?;
    tracing::info!("Scanning {} now lands on {}", created.id, destination);

    app.qr.delete(&created.id).await?;
    if let Err(e) = app.qr.delete(&created.id).await {
        tracing::warn!("Second delete rejected: {}", e);
    }

    app.auth.logout().await?;
    tracing::info!(
        "Logged out; authenticated = {}",
        app.auth.is_authenticated().await
    );

    Ok(())
}
