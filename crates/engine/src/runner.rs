//! Sequential check-in over every account and enabled game
//!
//! Each (account, game) pair is independent: any failure is turned into a
//! `Failed` report and processing moves on to the next pair.

use crate::report::{failure_message, format_message, troubleshooting_message, AccountReport};
use crate::{resolve, Resolution};
use hoyo_core::{Account, AppConfig, CheckInReport, ClaimResult, Error, GameProfile, GameRole, Result};
use hoyo_networking::RewardApi;
use tracing::{error, info, warn};

/// Drives the check-in for a set of accounts against one portal API
pub struct CheckInRunner<'a, A> {
    api: A,
    config: &'a AppConfig,
}

impl<'a, A: RewardApi> CheckInRunner<'a, A> {
    pub fn new(api: A, config: &'a AppConfig) -> Self {
        Self { api, config }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Check in every account, one after another
    pub async fn run_all(&self, accounts: &[Account]) -> Vec<AccountReport> {
        let mut results = Vec::with_capacity(accounts.len());
        for account in accounts {
            info!("Processing account: {}", account.account_id);
            results.push(self.run_account(account).await);
        }
        results
    }

    /// Check in one account for each of its enabled games
    pub async fn run_account(&self, account: &Account) -> AccountReport {
        let mut reports = Vec::new();

        for game_name in &account.enabled_games {
            let Some(game) = self.config.game(game_name) else {
                warn!("Game {} not found in configuration. Skipping.", game_name);
                continue;
            };
            reports.push(self.check_in(account, game).await);
        }

        AccountReport {
            account_id: account.account_id.clone(),
            chat_id: self.config.chat_for(account).map(str::to_string),
            reports,
        }
    }

    /// Check in one account for one game; never fails
    pub async fn check_in(&self, account: &Account, game: &GameProfile) -> CheckInReport {
        let account_id = &account.account_id;
        info!("Preparing check-in for {}, account {}...", game.name, account_id);

        let missing = account.cookies.missing_fields();
        if !missing.is_empty() {
            error!("Missing fields in cookies: {}", missing.join(", "));
            return CheckInReport {
                account_id: account_id.clone(),
                game: game.name.clone(),
                result: ClaimResult::failed(format!(
                    "cookie is missing {}",
                    missing.join(", ")
                )),
                message: troubleshooting_message(&game.name),
            };
        }

        match self.attempt(account, game).await {
            Ok((role, resolution)) => {
                let message = format_message(&role, &resolution);
                info!(
                    "{} for account {}: {}",
                    game.name,
                    account_id,
                    resolution.result.status_text()
                );
                CheckInReport {
                    account_id: account_id.clone(),
                    game: game.name.clone(),
                    result: resolution.result,
                    message,
                }
            }
            Err(Error::AuthenticationError(reason)) => {
                error!("{} Check-In for account {}: {}", game.name, account_id, reason);
                CheckInReport {
                    account_id: account_id.clone(),
                    game: game.name.clone(),
                    result: ClaimResult::failed(reason),
                    message: troubleshooting_message(&game.name),
                }
            }
            Err(e) => {
                error!("{} Check-In for account {}: {}", game.name, account_id, e);
                let reason = e.to_string();
                CheckInReport {
                    account_id: account_id.clone(),
                    game: game.name.clone(),
                    message: failure_message(&game.name, account_id, &reason),
                    result: ClaimResult::failed(reason),
                }
            }
        }
    }

    async fn attempt(&self, account: &Account, game: &GameProfile) -> Result<(GameRole, Resolution)> {
        let cookie = &account.cookies;

        let roles = self.api.fetch_roles(game, cookie).await?;
        let role = roles
            .primary()
            .cloned()
            .ok_or_else(|| Error::InvalidData("Role list is empty".to_string()))?;

        match cookie.account_id() {
            Some(aid) => info!("Checking in for account id {}...", aid),
            None => warn!("Failed to extract account_id from cookies"),
        }

        let status = self.api.fetch_status(game, cookie).await?;
        let catalog = self.api.fetch_rewards(game, cookie).await?;

        let resolution = resolve(
            &self.api,
            game,
            cookie,
            &status,
            &catalog,
            self.config.claim_delay,
        )
        .await;

        Ok((role, resolution))
    }
}
