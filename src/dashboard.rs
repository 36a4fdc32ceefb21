use crate::donors::aggregate_donors;
use crate::expenses::compute_outstanding_payments;
use crate::types::{
    Contribution, ContributionStatus, DashboardSummary, Dataset, PaymentType, Sponsor, Tally,
    Totals,
};

/// Funds raised from contributions and sponsorships. Missing or unparseable
/// amounts count as zero.
pub fn compute_totals(contributions: &[Contribution], sponsors: &[Sponsor]) -> Totals {
    let total_contributions: f64 = contributions.iter().map(|c| c.amount.unwrap_or(0.0)).sum();
    let total_sponsorships: f64 = sponsors
        .iter()
        .map(|s| s.sponsorship_amount.unwrap_or(0.0))
        .sum();
    Totals {
        total_contributions,
        total_sponsorships,
        total_raised: total_contributions + total_sponsorships,
    }
}

/// Everything the dashboard cards show, computed from one dataset.
pub fn summarize_dashboard(data: &Dataset, top_donors: usize) -> DashboardSummary {
    let totals = compute_totals(&data.contributions, &data.sponsors);
    let donors = aggregate_donors(&data.contributions);
    let outstanding = compute_outstanding_payments(&data.expenses, &data.vendors);
    let total_expenses: f64 = data.expenses.iter().map(|e| e.total_cost.unwrap_or(0.0)).sum();
    let total_coupons: f64 = data
        .contributions
        .iter()
        .map(|c| c.number_of_coupons.unwrap_or(0.0))
        .sum();

    DashboardSummary {
        totals,
        contribution_count: data.contributions.len(),
        donor_count: donors.len(),
        sponsor_count: data.sponsors.len(),
        total_coupons,
        total_expenses,
        total_outstanding: outstanding.total_outstanding,
        net_balance: totals.total_raised - total_expenses,
        by_status: tally_by_status(&data.contributions),
        by_type: tally_by_type(&data.contributions),
        top_donors: donors.into_iter().take(top_donors).collect(),
    }
}

fn tally_by_status(contributions: &[Contribution]) -> Vec<Tally> {
    let buckets = [
        (Some(ContributionStatus::Completed), "Completed"),
        (Some(ContributionStatus::Pending), "Pending"),
        (Some(ContributionStatus::Failed), "Failed"),
        (None, "Unknown"),
    ];
    buckets
        .iter()
        .map(|(status, label)| tally(label, contributions.iter().filter(|c| c.status == *status)))
        .collect()
}

fn tally_by_type(contributions: &[Contribution]) -> Vec<Tally> {
    let buckets = [
        (Some(PaymentType::Online), "Online"),
        (Some(PaymentType::Cash), "Cash"),
        (None, "Unknown"),
    ];
    buckets
        .iter()
        .map(|(kind, label)| tally(label, contributions.iter().filter(|c| c.payment_type == *kind)))
        .collect()
}

fn tally<'a>(label: &str, matched: impl Iterator<Item = &'a Contribution>) -> Tally {
    let (count, amount) = matched.fold((0usize, 0.0f64), |(n, sum), c| {
        (n + 1, sum + c.amount.unwrap_or(0.0))
    });
    Tally {
        label: label.to_string(),
        count,
        amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Expense, RecordId, Vendor};

    fn paid(name: &str, amount: Option<f64>, status: Option<ContributionStatus>) -> Contribution {
        Contribution {
            donor_name: Some(name.to_string()),
            tower_number: Some("A".to_string()),
            flat_number: Some("1".to_string()),
            amount,
            number_of_coupons: Some(2.0),
            status,
            payment_type: Some(PaymentType::Cash),
            ..Default::default()
        }
    }

    fn sponsor(amount: Option<f64>) -> Sponsor {
        Sponsor {
            name: Some("Acme".to_string()),
            sponsorship_amount: amount,
            ..Default::default()
        }
    }

    #[test]
    fn totals_add_up() {
        let totals = compute_totals(
            &[paid("Sam", Some(500.0), None), paid("Ana", None, None)],
            &[sponsor(Some(2000.0)), sponsor(None)],
        );
        assert_eq!(
            totals,
            Totals {
                total_contributions: 500.0,
                total_sponsorships: 2000.0,
                total_raised: 2500.0,
            }
        );
    }

    #[test]
    fn totals_of_nothing_are_zero() {
        assert_eq!(compute_totals(&[], &[]), Totals::default());
    }

    #[test]
    fn dashboard_summary_combines_metrics() {
        let data = Dataset {
            contributions: vec![
                paid("Sam", Some(500.0), Some(ContributionStatus::Completed)),
                paid("Sam", Some(300.0), Some(ContributionStatus::Pending)),
                paid("Ana", Some(100.0), None),
            ],
            sponsors: vec![sponsor(Some(1000.0))],
            expenses: vec![Expense {
                vendor_id: Some(RecordId::Int(1)),
                total_cost: Some(600.0),
                outstanding_amount: Some(250.0),
                ..Default::default()
            }],
            vendors: vec![Vendor {
                id: Some(RecordId::Int(1)),
                name: Some("Caterer".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };
        let summary = summarize_dashboard(&data, 1);
        assert_eq!(summary.totals.total_raised, 1900.0);
        assert_eq!(summary.contribution_count, 3);
        assert_eq!(summary.donor_count, 2);
        assert_eq!(summary.total_coupons, 6.0);
        assert_eq!(summary.total_outstanding, 250.0);
        assert_eq!(summary.net_balance, 1300.0);
        assert_eq!(summary.top_donors.len(), 1);
        assert_eq!(summary.top_donors[0].total_contributed, 800.0);

        let completed = &summary.by_status[0];
        assert_eq!((completed.label.as_str(), completed.count, completed.amount), ("Completed", 1, 500.0));
        let unknown = &summary.by_status[3];
        assert_eq!((unknown.count, unknown.amount), (1, 100.0));
        assert_eq!(summary.by_type[1].count, 3);
    }
}
