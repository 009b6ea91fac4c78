//! TableMask Core — configuration and shared error types.

pub mod config;
pub mod error;

pub use config::{MaskConfig, Salt};
pub use error::{Error, Result};
