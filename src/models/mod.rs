//! Data models
//!
//! This module contains the data structures shared by the qrdash services:
//! - Session: the current logged-in identity
//! - QrCode / QrCodeList: registry records and listing results
//! - Acknowledgement: payload-free success results

mod acknowledgement;
mod qr_code;
mod session;

pub use acknowledgement::Acknowledgement;
pub use qr_code::{DemoQrCode, QrCode, QrCodeList, DEMO_QR_CODES};
pub use session::Session;
