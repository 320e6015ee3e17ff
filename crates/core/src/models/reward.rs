//! Reward-related data models for the portal's home/info/sign endpoints

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Retcode assumed when the server omits one
pub const MISSING_RETCODE: i64 = 99999;

fn missing_retcode() -> i64 {
    MISSING_RETCODE
}

/// Envelope every portal endpoint wraps its payload in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// 0 on success, anything else is a rejection
    #[serde(default = "missing_retcode")]
    pub retcode: i64,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub fn is_success(&self) -> bool {
        self.retcode == 0
    }

    /// Unwrap the payload, turning a rejection or an empty body into an error
    pub fn into_data(self) -> Result<T> {
        if self.retcode != 0 {
            return Err(Error::ApiRejected {
                retcode: self.retcode,
                message: self.message,
            });
        }
        self.data
            .ok_or_else(|| Error::InvalidData(format!("response has no data: {}", self.message)))
    }
}

/// Today's check-in state (`GET .../info`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckInStatus {
    #[serde(default)]
    pub today: String,
    /// Cumulative claims this month
    #[serde(default)]
    pub total_sign_day: u32,
    #[serde(default)]
    pub is_sign: bool,
    /// Server wants one manual check-in before automation works
    #[serde(default)]
    pub first_bind: bool,
}

/// One entry of the monthly reward catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Award {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cnt: u32,
    #[serde(default)]
    pub icon: String,
}

/// Reward catalog (`GET .../home`), indexed by cumulative claim count
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RewardCatalog {
    #[serde(default)]
    pub awards: Vec<Award>,
}

impl RewardCatalog {
    pub fn new(awards: Vec<Award>) -> Self {
        Self { awards }
    }

    pub fn len(&self) -> usize {
        self.awards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.awards.is_empty()
    }

    /// Reward already collected today, given `total_sign_day` after the claim
    pub fn claimed_reward(&self, total_sign_day: u32) -> RewardSlot {
        match total_sign_day.checked_sub(1) {
            Some(index) => self.slot(index as usize),
            None => RewardSlot::Unknown,
        }
    }

    /// Reward the next claim would collect
    pub fn next_reward(&self, total_sign_day: u32) -> RewardSlot {
        self.slot(total_sign_day as usize)
    }

    fn slot(&self, index: usize) -> RewardSlot {
        self.awards
            .get(index)
            .cloned()
            .map(RewardSlot::Known)
            .unwrap_or(RewardSlot::Unknown)
    }
}

/// A catalog lookup that may fall outside the catalog
#[derive(Debug, Clone, PartialEq)]
pub enum RewardSlot {
    Known(Award),
    Unknown,
}

impl RewardSlot {
    pub fn name(&self) -> &str {
        match self {
            RewardSlot::Known(award) => &award.name,
            RewardSlot::Unknown => "Unknown",
        }
    }

    pub fn count(&self) -> u32 {
        match self {
            RewardSlot::Known(award) => award.cnt,
            RewardSlot::Unknown => 0,
        }
    }
}

impl fmt::Display for RewardSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} × {}", self.name(), self.count())
    }
}

/// Request body for `POST .../sign`
#[derive(Debug, Clone, Serialize)]
pub struct SignRequest {
    pub act_id: String,
}

/// Response from `POST .../sign`; only the envelope matters
pub type SignResponse = ApiEnvelope<serde_json::Value>;
