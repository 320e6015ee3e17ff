//! Three-way check-in decision for one (account, game) pair
//!
//! Given today's status and the reward catalog, the first matching rule
//! wins:
//! 1. already claimed today, nothing to do
//! 2. the portal wants a manual first check-in, nothing is sent
//! 3. otherwise submit exactly one claim
//!
//! Retries belong to the transport; this level never repeats a claim.

use hoyo_core::{CheckInStatus, ClaimResult, Cookie, GameProfile, RewardCatalog};
use hoyo_networking::RewardApi;
use std::time::Duration;
use tracing::{info, warn};

/// Outcome plus the cumulative count to report
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub result: ClaimResult,
    pub total_sign_day: u32,
}

/// Decide and, when needed, claim today's reward.
///
/// `claim_delay` is slept right before the claim request only.
pub async fn resolve<A: RewardApi>(
    api: &A,
    game: &GameProfile,
    cookie: &Cookie,
    status: &CheckInStatus,
    catalog: &RewardCatalog,
    claim_delay: Duration,
) -> Resolution {
    let count = status.total_sign_day;

    if status.is_sign {
        return Resolution {
            result: ClaimResult::AlreadyClaimed {
                reward: catalog.claimed_reward(count),
            },
            total_sign_day: count,
        };
    }

    if status.first_bind {
        info!("{}: manual first check-in required", game.name);
        return Resolution {
            result: ClaimResult::ManualBindRequired,
            total_sign_day: count,
        };
    }

    let reward = catalog.next_reward(count);

    if !claim_delay.is_zero() {
        tokio::time::sleep(claim_delay).await;
    }

    match api.claim(game, cookie).await {
        Ok(response) if response.is_success() => {
            info!("{}: check-in completed", game.name);
            Resolution {
                result: ClaimResult::Claimed {
                    reward,
                    message: response.message,
                },
                total_sign_day: count.saturating_add(1),
            }
        }
        Ok(response) => {
            let reason = if response.message.is_empty() {
                format!("Unknown error (code: {})", response.retcode)
            } else {
                response.message
            };
            warn!("{}: claim rejected (retcode {}): {}", game.name, response.retcode, reason);
            Resolution {
                result: ClaimResult::Failed { reason, reward },
                total_sign_day: count,
            }
        }
        Err(e) => {
            warn!("{}: claim request failed: {}", game.name, e);
            Resolution {
                result: ClaimResult::Failed {
                    reason: e.to_string(),
                    reward,
                },
                total_sign_day: count,
            }
        }
    }
}
