//! Message formatting and per-account aggregation

use crate::Resolution;
use hoyo_core::{CheckInReport, ClaimResult, GameRole};

const TROUBLESHOOTING: &str = "Try these troubleshooting steps:\n\
- Log out and log back in\n\
- Make sure you are on the Daily Rewards page, not the HoYoLAB forums page\n\
- Try incognito mode\n\
- Try clearing browser history/cache\n\
- Try using another browser";

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        "NA"
    } else {
        value
    }
}

/// Three-line status block for one game:
///
/// ```text
/// Traveler(800000001) - AR60
/// Reward: Primogem × 20
/// 5 days - Already done!
/// ```
pub fn format_message(role: &GameRole, resolution: &Resolution) -> String {
    let reward = match &resolution.result {
        ClaimResult::ManualBindRequired => "N/A × 0".to_string(),
        ClaimResult::AlreadyClaimed { reward }
        | ClaimResult::Claimed { reward, .. }
        | ClaimResult::Failed { reward, .. } => reward.to_string(),
    };
    let level = if role.level == 0 {
        "NA".to_string()
    } else {
        role.level.to_string()
    };

    format!(
        "{}({}) - AR{}\nReward: {}\n{} days - {}",
        or_na(&role.nickname),
        or_na(&role.game_uid),
        level,
        reward,
        resolution.total_sign_day,
        resolution.result.status_text()
    )
}

/// Guidance shown when the cookie looks malformed or expired
pub fn troubleshooting_message(game: &str) -> String {
    format!("{} Check-In: {}", game, TROUBLESHOOTING)
}

/// Message for a check-in that failed before a decision could be made
pub fn failure_message(game: &str, account_id: &str, error: &str) -> String {
    format!("{} Check-In for account {}:\n {}", game, account_id, error)
}

/// All game reports for one account
#[derive(Debug, Clone)]
pub struct AccountReport {
    pub account_id: String,
    /// Resolved target chat (account chat, else the default chat)
    pub chat_id: Option<String>,
    pub reports: Vec<CheckInReport>,
}

impl AccountReport {
    pub fn succeeded(&self) -> usize {
        self.reports.iter().filter(|r| r.is_success()).count()
    }

    pub fn total(&self) -> usize {
        self.reports.len()
    }

    /// `Account <id>: <ok>/<total> succeeded`, the date, then each game
    pub fn block(&self, date: &str) -> String {
        let mut lines = vec![
            format!(
                "Account {}: {}/{} succeeded",
                self.account_id,
                self.succeeded(),
                self.total()
            ),
            date.to_string(),
        ];
        for report in &self.reports {
            lines.push(format!("\n{}:", report.game));
            lines.push(report.message.clone());
        }
        lines.join("\n")
    }
}

/// `(succeeded, total)` across every account
pub fn run_totals(accounts: &[AccountReport]) -> (usize, usize) {
    accounts.iter().fold((0, 0), |(ok, total), account| {
        (ok + account.succeeded(), total + account.total())
    })
}

/// Escape text for Telegram's HTML parse mode
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Notification body: app name, timestamp, status and collapsible details
pub fn format_html(app: &str, timestamp: &str, status: &str, details: &str) -> String {
    format!(
        "<b>{}</b>\n<i>{}</i>\n\n<b>Status:</b> {}\n\n<b>Details:</b>\n<blockquote expandable>{}</blockquote>",
        escape_html(app),
        escape_html(timestamp),
        escape_html(status),
        escape_html(details)
    )
}
