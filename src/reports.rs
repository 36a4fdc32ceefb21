use crate::campaigns::compute_campaign_progress;
use crate::dashboard::summarize_dashboard;
use crate::donors::aggregate_donors;
use crate::expenses::{compute_expense_breakdown, compute_outstanding_payments, FestivalFilter};
use crate::types::{
    BreakdownRow, CampaignProgressRow, DashboardSummary, Dataset, DonorRow, OutstandingRow,
};
use crate::util::format_number;

/// All report tables for one run, already rendered to display strings.
#[derive(Debug, Clone)]
pub struct ReportSet {
    pub donors: Vec<DonorRow>,
    pub campaigns: Vec<CampaignProgressRow>,
    pub breakdown: Vec<BreakdownRow>,
    pub outstanding: Vec<OutstandingRow>,
    pub total_outstanding: f64,
    pub summary: DashboardSummary,
}

pub fn generate_reports(data: &Dataset, festival: &FestivalFilter, top_donors: usize) -> ReportSet {
    let outstanding = compute_outstanding_payments(&data.expenses, &data.vendors);
    ReportSet {
        donors: donor_rollup(data),
        campaigns: campaign_progress(data),
        breakdown: expense_breakdown(data, festival),
        outstanding: outstanding
            .payments
            .iter()
            .map(|p| OutstandingRow {
                expense: p.expense.name.clone().unwrap_or_default(),
                vendor: p.vendor_name.clone(),
                expense_head: p.expense.expense_head.clone().unwrap_or_default(),
                total_cost: format_number(p.expense.total_cost.unwrap_or(0.0), 2),
                amount_paid: format_number(p.expense.amount_paid.unwrap_or(0.0), 2),
                outstanding: format_number(p.outstanding, 2),
            })
            .collect(),
        total_outstanding: outstanding.total_outstanding,
        summary: summarize_dashboard(data, top_donors),
    }
}

pub fn donor_rollup(data: &Dataset) -> Vec<DonorRow> {
    aggregate_donors(&data.contributions)
        .into_iter()
        .enumerate()
        .map(|(idx, d)| DonorRow {
            rank: idx + 1,
            name: d.name,
            tower: d.tower_number,
            flat: d.flat_number,
            email: d.email.unwrap_or_default(),
            mobile: d.mobile_number.unwrap_or_default(),
            total_contributed: format_number(d.total_contributed, 2),
            contributions: d.contribution_count,
        })
        .collect()
}

pub fn campaign_progress(data: &Dataset) -> Vec<CampaignProgressRow> {
    compute_campaign_progress(&data.campaigns, &data.contributions)
        .into_iter()
        .map(|p| CampaignProgressRow {
            campaign: p.campaign.name.unwrap_or_else(|| "Untitled".to_string()),
            goal: format_number(p.campaign.goal.unwrap_or(0.0), 2),
            raised: format_number(p.raised, 2),
            progress: format_number(p.progress, 2),
            donors: p.donor_count,
        })
        .collect()
}

pub fn expense_breakdown(data: &Dataset, festival: &FestivalFilter) -> Vec<BreakdownRow> {
    compute_expense_breakdown(&data.expenses, festival)
        .into_iter()
        .map(|item| BreakdownRow {
            rank: item.rank,
            expense_head: item.label,
            total_cost: format_number(item.total, 2),
            share: format_number(item.percentage, 2),
            color: item.color.to_string(),
        })
        .collect()
}

/// Name of the festival a filter points at, for report captions.
pub fn festival_caption(data: &Dataset, festival: &FestivalFilter) -> String {
    match festival {
        FestivalFilter::All => "All Festivals".to_string(),
        FestivalFilter::Festival(id) => data
            .festivals
            .iter()
            .find(|f| f.id.as_ref() == Some(id))
            .and_then(|f| f.name.clone())
            .unwrap_or_else(|| format!("Festival {}", id)),
    }
}
