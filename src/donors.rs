use crate::types::{Contribution, Donor, DonorKey};
use crate::util::{non_empty, parse_date_safe};
use chrono::NaiveDateTime;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Roll contributions up into one `Donor` per `DonorKey`.
///
/// Contributions are taken in list order, oldest first. Totals and counts
/// accumulate over every keyed contribution; the display name, email and
/// mobile number are overwritten by each later non-empty value, so the most
/// recent one wins. Contributions without a name, tower or flat are skipped.
///
/// The result is sorted by `total_contributed`, highest first. Donors with
/// equal totals keep the order in which they first appeared.
pub fn aggregate_donors(contributions: &[Contribution]) -> Vec<Donor> {
    warn_if_out_of_order(contributions);

    let mut index: HashMap<DonorKey, usize> = HashMap::new();
    let mut donors: Vec<Donor> = Vec::new();
    let mut skipped = 0usize;

    for c in contributions {
        let Some(key) = DonorKey::from_contribution(c) else {
            skipped += 1;
            continue;
        };
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            donors.push(Donor {
                id: key.to_string(),
                key: key.clone(),
                name: String::new(),
                tower_number: String::new(),
                flat_number: String::new(),
                email: None,
                mobile_number: None,
                total_contributed: 0.0,
                contribution_count: 0,
            });
            donors.len() - 1
        });
        let d = &mut donors[slot];
        d.total_contributed += c.amount.unwrap_or(0.0);
        d.contribution_count += 1;
        // The key fields are known to be present at this point.
        d.name = c.donor_name.clone().unwrap_or_default();
        d.tower_number = c.tower_number.clone().unwrap_or_default();
        d.flat_number = c.flat_number.clone().unwrap_or_default();
        if let Some(email) = non_empty(&c.donor_email) {
            d.email = Some(email.to_string());
        }
        if let Some(mobile) = non_empty(&c.mobile_number) {
            d.mobile_number = Some(mobile.to_string());
        }
    }

    if skipped > 0 {
        log::debug!("Skipped {} contributions without donor name/tower/flat", skipped);
    }

    donors.sort_by(|a, b| {
        b.total_contributed
            .partial_cmp(&a.total_contributed)
            .unwrap_or(Ordering::Equal)
    });
    donors
}

/// Case-insensitive substring search over the donor's visible fields.
/// A blank query returns every donor.
pub fn search_donors<'a>(donors: &'a [Donor], query: &str) -> Vec<&'a Donor> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return donors.iter().collect();
    }
    donors
        .iter()
        .filter(|d| {
            [
                Some(d.name.as_str()),
                Some(d.tower_number.as_str()),
                Some(d.flat_number.as_str()),
                d.email.as_deref(),
                d.mobile_number.as_deref(),
            ]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&q))
        })
        .collect()
}

// "Latest wins" is decided by list position. When the dates disagree with
// that order, say so instead of silently picking the wrong contact details.
fn warn_if_out_of_order(contributions: &[Contribution]) {
    if let Some((later, earlier)) = first_out_of_order(contributions) {
        log::warn!(
            "Contributions are not in chronological order ({} is listed after {}); latest contact details follow list order",
            later,
            earlier
        );
    }
}

/// First pair of dated contributions where the later-listed one is older.
/// Returns `(later-listed date, date listed before it)`. Undated or
/// unparseable contributions are ignored.
pub fn first_out_of_order(contributions: &[Contribution]) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let mut prev: Option<NaiveDateTime> = None;
    for c in contributions {
        let Some(date) = parse_date_safe(c.date.as_deref()) else {
            continue;
        };
        if let Some(p) = prev {
            if date < p {
                return Some((date, p));
            }
        }
        prev = Some(date);
    }
    None
}
