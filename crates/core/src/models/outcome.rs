//! Outcomes of a single (account, game) check-in

use crate::RewardSlot;

/// What happened when checking in one account for one game
#[derive(Debug, Clone, PartialEq)]
pub enum ClaimResult {
    /// Today's reward was collected before this run
    AlreadyClaimed { reward: RewardSlot },
    /// The portal needs one interactive check-in first
    ManualBindRequired,
    /// Claimed by this run; `message` is the server's reply
    Claimed { reward: RewardSlot, message: String },
    Failed { reason: String, reward: RewardSlot },
}

impl ClaimResult {
    pub fn failed(reason: impl Into<String>) -> Self {
        ClaimResult::Failed {
            reason: reason.into(),
            reward: RewardSlot::Unknown,
        }
    }

    /// Whether the account holds today's reward after this run
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            ClaimResult::AlreadyClaimed { .. } | ClaimResult::Claimed { .. }
        )
    }

    /// Short status word for logs and the message line
    pub fn status_text(&self) -> String {
        match self {
            ClaimResult::AlreadyClaimed { .. } => "Already done!".to_string(),
            ClaimResult::ManualBindRequired => "Please check in manually once".to_string(),
            ClaimResult::Claimed { message, .. } if message.is_empty() => "Success".to_string(),
            ClaimResult::Claimed { message, .. } => message.clone(),
            ClaimResult::Failed { reason, .. } => format!("Error: {}", reason),
        }
    }
}

/// Rendered result for one (account, game) pair
#[derive(Debug, Clone)]
pub struct CheckInReport {
    pub account_id: String,
    pub game: String,
    pub result: ClaimResult,
    /// Human-readable block sent in the notification
    pub message: String,
}

impl CheckInReport {
    pub fn is_success(&self) -> bool {
        self.result.is_success()
    }
}
