//! Hoyo Engine - Check-in decisions, run orchestration, and reporting

pub mod error_log;
pub mod notify;
pub mod report;
pub mod resolver;
pub mod runner;

#[cfg(test)]
mod testing;

pub use error_log::ErrorLog;
pub use notify::{DispatchSummary, Notifier};
pub use report::AccountReport;
pub use resolver::{resolve, Resolution};
pub use runner::CheckInRunner;
