use crate::error::{MetricsError, MetricsResult};
use crate::types::Dataset;
use crate::util::format_int;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;

pub const CONTRIBUTIONS_FILE: &str = "contributions.json";
pub const SPONSORS_FILE: &str = "sponsors.json";
pub const EXPENSES_FILE: &str = "expenses.json";
pub const VENDORS_FILE: &str = "vendors.json";
pub const CAMPAIGNS_FILE: &str = "campaigns.json";
pub const FESTIVALS_FILE: &str = "festivals.json";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub total_records: usize,
    pub skipped_records: usize,
    pub missing_files: Vec<String>,
}

impl LoadReport {
    /// Console lines summarizing skipped elements and missing files.
    pub fn notes(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.skipped_records > 0 {
            lines.push(format!(
                "Note: {} records skipped because they could not be read.",
                format_int(self.skipped_records)
            ));
        }
        if !self.missing_files.is_empty() {
            lines.push(format!(
                "Info: missing files treated as empty: {}",
                self.missing_files.join(", ")
            ));
        }
        lines
    }
}

/// Read every backend list export from `dir`.
///
/// A missing file is an empty list. A file that is not a JSON array is a
/// caller error and aborts the load. Array elements that cannot be read are
/// skipped and counted.
pub fn load_dataset(dir: &Path) -> MetricsResult<(Dataset, LoadReport)> {
    let mut report = LoadReport::default();
    let data = Dataset {
        contributions: load_list(dir, CONTRIBUTIONS_FILE, &mut report)?,
        sponsors: load_list(dir, SPONSORS_FILE, &mut report)?,
        expenses: load_list(dir, EXPENSES_FILE, &mut report)?,
        vendors: load_list(dir, VENDORS_FILE, &mut report)?,
        campaigns: load_list(dir, CAMPAIGNS_FILE, &mut report)?,
        festivals: load_list(dir, FESTIVALS_FILE, &mut report)?,
    };
    log::info!(
        "Loaded {} records from {} ({} skipped, {} files missing)",
        report.total_records,
        dir.display(),
        report.skipped_records,
        report.missing_files.len()
    );
    Ok((data, report))
}

fn load_list<T: DeserializeOwned>(
    dir: &Path,
    file: &str,
    report: &mut LoadReport,
) -> MetricsResult<Vec<T>> {
    let path = dir.join(file);
    if !path.exists() {
        log::warn!("{} not found, treating as empty", path.display());
        report.missing_files.push(file.to_string());
        return Ok(Vec::new());
    }
    let text = std::fs::read_to_string(&path)
        .map_err(|e| MetricsError::io(path.display().to_string(), e))?;
    let items = parse_list::<T>(&text, file)?;
    report.total_records += items.total;
    report.skipped_records += items.skipped;
    Ok(items.records)
}

pub struct ParsedList<T> {
    pub records: Vec<T>,
    pub total: usize,
    pub skipped: usize,
}

/// Parse one list export. `file` only labels errors and log lines.
pub fn parse_list<T: DeserializeOwned>(text: &str, file: &str) -> MetricsResult<ParsedList<T>> {
    let value: Value = serde_json::from_str(text).map_err(|source| MetricsError::Json {
        file: file.to_string(),
        source,
    })?;
    let Value::Array(items) = value else {
        return Err(MetricsError::NotAnArray {
            file: file.to_string(),
        });
    };

    let total = items.len();
    let mut skipped = 0usize;
    let mut records = Vec::with_capacity(total);
    for (idx, mut item) in items.into_iter().enumerate() {
        merge_mongo_id(&mut item);
        match serde_json::from_value::<T>(item) {
            Ok(r) => records.push(r),
            Err(e) => {
                skipped += 1;
                log::debug!("{}: skipping element {}: {}", file, idx, e);
            }
        }
    }
    Ok(ParsedList {
        records,
        total,
        skipped,
    })
}

/// Fold a Mongo `_id` into `id`. An explicit `id` wins; `{"$oid": ".."}`
/// is unwrapped to its string.
fn merge_mongo_id(item: &mut Value) {
    let Value::Object(map) = item else {
        return;
    };
    let Some(raw) = map.remove("_id") else {
        return;
    };
    let has_id = map.get("id").is_some_and(|v| !v.is_null());
    if has_id {
        return;
    }
    let id = match raw {
        Value::Object(mut inner) => inner.remove("$oid").unwrap_or(Value::Null),
        other => other,
    };
    map.insert("id".to_string(), id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Contribution, ContributionStatus, Expense, PaymentType, RecordId};

    #[test]
    fn coerces_backend_shapes() {
        let text = r#"[
            {"_id": "c1", "donorName": "Sam", "towerNumber": 4, "flatNumber": "402",
             "amount": "1,500", "numberOfCoupons": "3", "campaignId": 7,
             "status": "Completed", "type": "Cash", "date": "2024-03-01"},
            {"id": 2, "donorName": "Ana", "amount": "n/a", "status": "Refunded"}
        ]"#;
        let parsed = parse_list::<Contribution>(text, "contributions.json").unwrap();
        assert_eq!(parsed.total, 2);
        assert_eq!(parsed.skipped, 0);
        let first = &parsed.records[0];
        assert_eq!(first.id, Some(RecordId::Text("c1".to_string())));
        assert_eq!(first.tower_number.as_deref(), Some("4"));
        assert_eq!(first.amount, Some(1500.0));
        assert_eq!(first.number_of_coupons, Some(3.0));
        assert_eq!(first.campaign_id, Some(RecordId::Int(7)));
        assert_eq!(first.status, Some(ContributionStatus::Completed));
        assert_eq!(first.payment_type, Some(PaymentType::Cash));
        let second = &parsed.records[1];
        assert_eq!(second.amount, None);
        assert_eq!(second.status, None);
    }

    #[test]
    fn record_with_both_id_keys_is_kept() {
        let text = r#"[
            {"_id": "65a1", "id": "65a1", "donorName": "Sam", "towerNumber": "A",
             "flatNumber": "1", "amount": 500},
            {"_id": "65a2", "id": 9, "amount": 10},
            {"_id": {"$oid": "65a3"}, "amount": 20},
            {"_id": "65a4", "id": null, "amount": 30}
        ]"#;
        let parsed = parse_list::<Contribution>(text, "contributions.json").unwrap();
        assert_eq!(parsed.skipped, 0);
        assert_eq!(parsed.records.len(), 4);
        assert_eq!(parsed.records[0].id, Some(RecordId::Text("65a1".to_string())));
        assert_eq!(parsed.records[0].amount, Some(500.0));
        assert_eq!(parsed.records[1].id, Some(RecordId::Int(9)));
        assert_eq!(parsed.records[2].id, Some(RecordId::Text("65a3".to_string())));
        assert_eq!(parsed.records[3].id, Some(RecordId::Text("65a4".to_string())));
    }

    #[test]
    fn notes_describe_unreadable_records() {
        let report = LoadReport {
            total_records: 1500,
            skipped_records: 1200,
            missing_files: vec![SPONSORS_FILE.to_string(), VENDORS_FILE.to_string()],
        };
        let notes = report.notes();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0], "Note: 1,200 records skipped because they could not be read.");
        assert!(!notes[0].contains("JSON objects"));
        assert_eq!(notes[1], "Info: missing files treated as empty: sponsors.json, vendors.json");
        assert!(LoadReport::default().notes().is_empty());
    }

    #[test]
    fn non_object_elements_are_skipped() {
        let parsed = parse_list::<Expense>(r#"[{"totalCost": 10}, 42, null]"#, "expenses.json").unwrap();
        assert_eq!(parsed.total, 3);
        assert_eq!(parsed.skipped, 2);
        assert_eq!(parsed.records.len(), 1);
    }

    #[test]
    fn top_level_must_be_an_array() {
        let err = parse_list::<Expense>("null", "expenses.json").err().unwrap();
        assert!(matches!(err, MetricsError::NotAnArray { .. }));
        let err = parse_list::<Expense>(r#"{"data": []}"#, "expenses.json").err().unwrap();
        assert!(matches!(err, MetricsError::NotAnArray { .. }));
    }

    #[test]
    fn broken_json_is_reported() {
        let err = parse_list::<Expense>("[{", "expenses.json").err().unwrap();
        assert!(matches!(err, MetricsError::Json { .. }));
    }
}
