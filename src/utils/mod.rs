//! Utility functions shared across the crate.
//!
//! ## Modules
//!
//! - [`app_data`] - Configuration file location and loading
//! - [`encoding`] - Fixed-width integer helpers for binary streams
//! - [`logging`] - `tracing` subscriber setup

pub mod app_data;
pub mod encoding;
pub mod logging;

pub use app_data::*;
pub use encoding::*;
