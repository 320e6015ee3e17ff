//! Hoyo Networking - HTTP transport, portal API, and chat-bot client

pub mod api;
pub mod http;

#[cfg(test)]
mod testing;

pub use api::{ChatApi, PortalClient, RewardApi, TelegramClient};
pub use http::{ExponentialBackoff, FixedRetry, HttpClient, HttpRequest, RetryPolicy};
