//! Hoyo Core - Shared data models, configuration, and errors

pub mod config;
pub mod errors;
pub mod models;
pub mod types;

pub use config::{AppConfig, ProxyConfig, TelegramConfig};
pub use errors::{Error, Result};
pub use models::*;
pub use types::*;
