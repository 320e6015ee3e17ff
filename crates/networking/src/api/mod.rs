//! API wrappers for the reward portal and the chat bot
//!
//! The traits are the seams the check-in engine is written against; the
//! concrete clients talk HTTP through [`HttpClient`](crate::HttpClient).

mod portal;
mod telegram;

pub use portal::*;
pub use telegram::*;

use hoyo_core::{CheckInStatus, Cookie, GameProfile, Result, RewardCatalog, RoleList, SignResponse};

/// Reward portal operations for one (account, game) pair
#[allow(async_fn_in_trait)]
pub trait RewardApi {
    /// Characters bound to the account for this game
    async fn fetch_roles(&self, game: &GameProfile, cookie: &Cookie) -> Result<RoleList>;

    /// This month's reward catalog
    async fn fetch_rewards(&self, game: &GameProfile, cookie: &Cookie) -> Result<RewardCatalog>;

    /// Today's check-in state
    async fn fetch_status(&self, game: &GameProfile, cookie: &Cookie) -> Result<CheckInStatus>;

    /// Submit today's claim. A rejection is reported through the
    /// envelope's retcode, not as an error.
    async fn claim(&self, game: &GameProfile, cookie: &Cookie) -> Result<SignResponse>;
}

/// Outbound chat messages
#[allow(async_fn_in_trait)]
pub trait ChatApi {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<()>;
}
