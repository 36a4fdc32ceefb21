use crate::types::{Campaign, CampaignProgress, Contribution, DonorKey};
use std::collections::HashSet;

/// Percentage of `goal` covered by `raised`, capped at 100. A goal that is
/// missing, zero or negative has no meaningful progress and yields 0.
pub fn progress_pct(raised: f64, goal: Option<f64>) -> f64 {
    match goal {
        Some(g) if g > 0.0 => ((raised / g) * 100.0).clamp(0.0, 100.0),
        _ => 0.0,
    }
}

/// Attach raised amount, capped progress and distinct donor count to every
/// campaign. Contributions are matched on `campaign_id` by strict id
/// equality; a campaign without an id matches nothing.
///
/// `raised` is reported uncapped, so an overfunded campaign shows more than
/// its goal while `progress` stops at 100.
pub fn compute_campaign_progress(
    campaigns: &[Campaign],
    contributions: &[Contribution],
) -> Vec<CampaignProgress> {
    campaigns
        .iter()
        .map(|campaign| {
            let matched = contributions
                .iter()
                .filter(|c| campaign.id.is_some() && c.campaign_id == campaign.id);
            let mut raised = 0.0;
            let mut donors: HashSet<DonorKey> = HashSet::new();
            for c in matched {
                raised += c.amount.unwrap_or(0.0);
                if let Some(key) = DonorKey::from_contribution(c) {
                    donors.insert(key);
                }
            }
            CampaignProgress {
                campaign: campaign.clone(),
                raised,
                progress: progress_pct(raised, campaign.goal),
                donor_count: donors.len(),
            }
        })
        .collect()
}
