//! Retrying HTTP transport

mod client;
mod retry;

pub use client::*;
pub use retry::*;
