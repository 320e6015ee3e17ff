//! Batched run notification
//!
//! Account reports are grouped by target chat and each chat gets a single
//! message carrying the run-wide success ratio. A failed delivery is logged
//! and recorded in the local error log; it never aborts the run.

use crate::report::{format_html, run_totals, AccountReport};
use crate::ErrorLog;
use chrono::Local;
use hoyo_networking::ChatApi;
use tracing::{debug, error, info, warn};

pub const APP_NAME: &str = "HoyoSignIn";

/// Delivery counts for one dispatch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub sent: usize,
    pub failed: usize,
}

/// Sends the aggregated run report through a chat backend
pub struct Notifier<C> {
    /// `None` when notifications are disabled
    chat: Option<C>,
    error_log: ErrorLog,
}

impl<C: ChatApi> Notifier<C> {
    pub fn new(chat: Option<C>, error_log: ErrorLog) -> Self {
        Self { chat, error_log }
    }

    /// Log the run report and send one message per target chat
    pub async fn dispatch(&self, accounts: &[AccountReport]) -> DispatchSummary {
        let date = Local::now().format("%d.%m.%Y").to_string();
        let (succeeded, total) = run_totals(accounts);
        let status = format!("Total: {}/{} succeeded", succeeded, total);

        let groups = group_by_chat(accounts, &date);
        for (_, details) in &groups {
            info!("Check-in result: {}\n\n{}", status, details);
        }

        let Some(chat) = &self.chat else {
            debug!("Notifications disabled, report only logged");
            return DispatchSummary::default();
        };

        let timestamp = Local::now().format("%d.%m.%Y %H:%M:%S").to_string();
        let mut summary = DispatchSummary::default();

        for (chat_id, details) in &groups {
            let Some(chat_id) = chat_id else {
                warn!("Chat ID not configured. Notification not sent.");
                continue;
            };

            let text = format_html(APP_NAME, &timestamp, &status, details);
            match chat.send_message(chat_id, &text).await {
                Ok(()) => {
                    info!("Notification successfully sent to Telegram (chat_id: {})", chat_id);
                    summary.sent += 1;
                }
                Err(e) => {
                    error!("Exception sending notification: {}", e);
                    summary.failed += 1;
                    let record = format!("Exception sending Telegram notification: {}", e);
                    if let Err(log_err) = self.error_log.append(&record).await {
                        error!(
                            "Error writing to {}: {}",
                            self.error_log.path().display(),
                            log_err
                        );
                    }
                }
            }
        }

        summary
    }
}

/// Account blocks joined per target chat, in first-seen order.
/// Accounts without any report are left out.
fn group_by_chat(accounts: &[AccountReport], date: &str) -> Vec<(Option<String>, String)> {
    let mut groups: Vec<(Option<String>, Vec<String>)> = Vec::new();

    for account in accounts.iter().filter(|a| a.total() > 0) {
        let block = account.block(date);
        match groups.iter_mut().find(|(chat, _)| *chat == account.chat_id) {
            Some((_, blocks)) => blocks.push(block),
            None => groups.push((account.chat_id.clone(), vec![block])),
        }
    }

    groups
        .into_iter()
        .map(|(chat, blocks)| (chat, blocks.join("\n")))
        .collect()
}
