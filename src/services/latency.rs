//! Simulated network latency
//!
//! Every service operation that stands in for a remote call awaits a fixed
//! delay before doing its work. The delay is per operation kind, so
//! operations of the same kind resolve in the order they were issued.

use crate::config::LatencyConfig;
use std::time::Duration;

/// Operations that carry a simulated delay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    SignUp,
    Login,
    Logout,
    CurrentSession,
    CreateQr,
    ListQr,
    UpdateQr,
    DeleteQr,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::SignUp => "sign_up",
            Operation::Login => "login",
            Operation::Logout => "logout",
            Operation::CurrentSession => "current_session",
            Operation::CreateQr => "create_qr",
            Operation::ListQr => "list_qr",
            Operation::UpdateQr => "update_qr",
            Operation::DeleteQr => "delete_qr",
        }
    }
}

/// Delay table for all operations
#[derive(Debug, Clone)]
pub struct Latency {
    config: LatencyConfig,
}

impl Latency {
    pub fn new(config: LatencyConfig) -> Self {
        Self { config }
    }

    /// No delays at all
    pub fn none() -> Self {
        Self::new(LatencyConfig::disabled())
    }

    /// Delay configured for `op`
    pub fn delay_for(&self, op: Operation) -> Duration {
        let ms = match op {
            Operation::SignUp => self.config.sign_up_ms,
            Operation::Login => self.config.login_ms,
            Operation::Logout => self.config.logout_ms,
            Operation::CurrentSession => self.config.current_session_ms,
            Operation::CreateQr => self.config.create_ms,
            Operation::ListQr => self.config.list_ms,
            Operation::UpdateQr => self.config.update_ms,
            Operation::DeleteQr => self.config.delete_ms,
        };
        self.config.delay(ms)
    }

    /// Wait out the delay for `op`
    pub async fn simulate(&self, op: Operation) {
        let delay = self.delay_for(op);
        if delay.is_zero() {
            return;
        }
        tracing::debug!("Simulating {}ms latency for {}", delay.as_millis(), op.as_str());
        tokio::time::sleep(delay).await;
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::new(LatencyConfig::default())
    }
}
