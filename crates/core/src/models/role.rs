//! Game role models for the `getUserGameRolesByCookie` endpoint

use serde::{Deserialize, Serialize};

/// One in-game character bound to the account
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameRole {
    #[serde(default)]
    pub game_uid: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub region_name: String,
    #[serde(default)]
    pub region: String,
}

/// Payload of the role endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleList {
    #[serde(default)]
    pub list: Vec<GameRole>,
}

impl RoleList {
    /// The highest-level role; the first one listed wins ties
    pub fn primary(&self) -> Option<&GameRole> {
        self.list
            .iter()
            .reduce(|best, role| if role.level > best.level { role } else { best })
    }
}
