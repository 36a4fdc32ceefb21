//! Derived metrics for a community contribution dashboard.
//!
//! The metric functions (`donors`, `campaigns`, `expenses`, `dashboard`) are
//! pure functions over the flat lists the backend returns. `loader`,
//! `reports` and `output` wrap them for the command-line report generator.
pub mod campaigns;
pub mod config;
pub mod dashboard;
pub mod donors;
pub mod error;
pub mod expenses;
pub mod loader;
pub mod output;
pub mod reports;
pub mod state;
pub mod types;
pub mod util;

pub use campaigns::compute_campaign_progress;
pub use dashboard::{compute_totals, summarize_dashboard};
pub use donors::{aggregate_donors, search_donors};
pub use error::{MetricsError, MetricsResult};
pub use expenses::{compute_expense_breakdown, compute_outstanding_payments, FestivalFilter};
