//! qrdash - mock service layer for a dynamic QR code dashboard
//!
//! This library provides the session store and QR registry the dashboard
//! talks to, backed by process memory and a local key/value store.

pub mod app;
pub mod config;
pub mod models;
pub mod services;
pub mod storage;

pub use app::App;
