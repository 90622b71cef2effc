//! Services layer - Business logic
//!
//! This module contains the two mock services behind the dashboard:
//! - `auth`: session handling over the local store
//! - `qr`: the in-memory QR code registry
//!
//! Both simulate network latency before doing their work.

pub mod auth;
pub mod latency;
pub mod qr;
pub mod validation;

pub use auth::{AuthService, AuthServiceError, DEFAULT_SESSION_KEY};
pub use latency::{Latency, Operation};
pub use qr::{QrService, QrServiceError};
pub use validation::{encode_destination, is_valid_destination, MIN_PASSWORD_LENGTH};
