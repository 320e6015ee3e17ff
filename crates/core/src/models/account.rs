//! Account records produced by the configuration loader

use crate::Cookie;

/// One portal account and the games to check in for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub account_id: String,
    pub cookies: Cookie,
    /// Chat to report to; falls back to the default chat when `None`
    pub chat_id: Option<String>,
    pub enabled_games: Vec<String>,
}

impl Account {
    pub fn new(account_id: impl Into<String>, cookies: Cookie) -> Self {
        Self {
            account_id: account_id.into(),
            cookies,
            chat_id: None,
            enabled_games: Vec::new(),
        }
    }

    pub fn with_chat(mut self, chat_id: Option<String>) -> Self {
        self.chat_id = chat_id.filter(|id| !id.trim().is_empty());
        self
    }

    pub fn with_games<I, S>(mut self, games: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enabled_games.clear();
        for game in games {
            self.enable_game(game);
        }
        self
    }

    /// Add a game, keeping order and skipping duplicates
    pub fn enable_game(&mut self, game: impl Into<String>) {
        let game = game.into();
        if !game.is_empty() && !self.enabled_games.contains(&game) {
            self.enabled_games.push(game);
        }
    }
}
