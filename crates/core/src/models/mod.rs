//! Data models for accounts, game portals, and check-in payloads

mod account;
mod game;
mod outcome;
mod reward;
mod role;

pub use account::*;
pub use game::*;
pub use outcome::*;
pub use reward::*;
pub use role::*;
