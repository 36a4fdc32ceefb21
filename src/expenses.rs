use crate::types::{BreakdownItem, Expense, OutstandingPayment, OutstandingReport, RecordId, Vendor};
use crate::util::non_empty;
use std::cmp::Ordering;
use std::collections::HashMap;

pub const UNCATEGORIZED: &str = "Uncategorized";
pub const UNKNOWN_VENDOR: &str = "Unknown Vendor";

/// Chart colours handed out by rank; wraps around past the end.
pub const PALETTE: [&str; 8] = [
    "#4F46E5", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#06B6D4", "#EC4899", "#84CC16",
];

/// Which expenses a breakdown covers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FestivalFilter {
    #[default]
    All,
    Festival(RecordId),
}

impl FestivalFilter {
    /// `"all"` (any case) or blank selects everything; a digit-only string is
    /// taken as a numeric id, anything else as a string id. A backend that
    /// stores digit-only ids as strings (`"3"`, `"007"`) is not matched.
    pub fn parse(s: &str) -> FestivalFilter {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return FestivalFilter::All;
        }
        match s.parse::<i64>() {
            Ok(i) => FestivalFilter::Festival(RecordId::Int(i)),
            Err(_) => FestivalFilter::Festival(RecordId::Text(s.to_string())),
        }
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        match self {
            FestivalFilter::All => true,
            FestivalFilter::Festival(id) => expense.festival_id.as_ref() == Some(id),
        }
    }
}

/// Group expenses by expense head and rank the groups by total cost.
pub fn compute_expense_breakdown(expenses: &[Expense], filter: &FestivalFilter) -> Vec<BreakdownItem> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, f64)> = Vec::new();
    let mut matched = 0usize;
    for e in expenses.iter().filter(|e| filter.matches(e)) {
        matched += 1;
        let head = non_empty(&e.expense_head).unwrap_or(UNCATEGORIZED).to_string();
        let slot = *index.entry(head.clone()).or_insert_with(|| {
            groups.push((head, 0.0));
            groups.len() - 1
        });
        groups[slot].1 += e.total_cost.unwrap_or(0.0);
    }

    if let FestivalFilter::Festival(id) = filter {
        if matched == 0 && !expenses.is_empty() {
            log::debug!("Festival filter {:?} matched none of {} expenses", id, expenses.len());
        }
    }

    groups.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    let grand_total: f64 = groups.iter().map(|(_, total)| total).sum();

    groups
        .into_iter()
        .enumerate()
        .map(|(idx, (label, total))| BreakdownItem {
            rank: idx + 1,
            label,
            total,
            percentage: if grand_total > 0.0 {
                total / grand_total * 100.0
            } else {
                0.0
            },
            color: PALETTE[idx % PALETTE.len()],
        })
        .collect()
}

/// Expenses that still have money owing, largest first, with the vendor
/// name resolved. Unknown vendor ids are labelled rather than rejected.
pub fn compute_outstanding_payments(expenses: &[Expense], vendors: &[Vendor]) -> OutstandingReport {
    let names: HashMap<&RecordId, &str> = vendors
        .iter()
        .filter_map(|v| Some((v.id.as_ref()?, non_empty(&v.name)?)))
        .collect();

    let mut payments: Vec<OutstandingPayment> = expenses
        .iter()
        .filter_map(|e| {
            let outstanding = e.outstanding_amount.filter(|amt| *amt > 0.0)?;
            let vendor_name = e
                .vendor_id
                .as_ref()
                .and_then(|id| names.get(id).copied())
                .unwrap_or(UNKNOWN_VENDOR)
                .to_string();
            Some(OutstandingPayment {
                expense: e.clone(),
                vendor_name,
                outstanding,
            })
        })
        .collect();

    payments.sort_by(|a, b| b.outstanding.partial_cmp(&a.outstanding).unwrap_or(Ordering::Equal));
    let total_outstanding: f64 = payments.iter().map(|p| p.outstanding).sum();
    OutstandingReport {
        payments,
        total_outstanding,
    }
}
