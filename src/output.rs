use crate::error::{MetricsError, MetricsResult};
use serde::Serialize;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> MetricsResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()
        .map_err(|e| MetricsError::io(path.display().to_string(), e))?;
    log::debug!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> MetricsResult<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s).map_err(|e| MetricsError::io(path.display().to_string(), e))?;
    Ok(())
}

pub fn ensure_dir(path: &Path) -> MetricsResult<()> {
    std::fs::create_dir_all(path).map_err(|e| MetricsError::io(path.display().to_string(), e))
}

/// Markdown rendering of at most `max_rows` rows.
pub fn render_table<T>(rows: &[T], max_rows: usize) -> Option<String>
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().take(max_rows).cloned().collect();
    if slice.is_empty() {
        return None;
    }
    Some(Table::new(slice).with(Style::markdown()).to_string())
}

pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    match render_table(rows, max_rows) {
        Some(table_str) => println!("{}\n", table_str),
        None => println!("(no rows)\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BreakdownRow;

    fn row(rank: usize, head: &str) -> BreakdownRow {
        BreakdownRow {
            rank,
            expense_head: head.to_string(),
            total_cost: "1.00".to_string(),
            share: "50.00".to_string(),
            color: "#4F46E5".to_string(),
        }
    }

    #[test]
    fn csv_has_renamed_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("breakdown.csv");
        write_csv(&path, &[row(1, "Food"), row(2, "Decor")]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Rank,ExpenseHead,TotalCost,SharePct,Color"));
        assert_eq!(lines.next(), Some("1,Food,1.00,50.00,#4F46E5"));
        assert_eq!(lines.count(), 1);
    }

    #[test]
    fn table_preview_is_truncated() {
        let rendered = render_table(&[row(1, "Food"), row(2, "Decor")], 1).unwrap();
        assert!(rendered.contains("Food"));
        assert!(!rendered.contains("Decor"));
        assert!(render_table::<BreakdownRow>(&[], 3).is_none());
    }

    #[test]
    fn json_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        write_json(&path, &serde_json::json!({"totalRaised": 10.0})).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"totalRaised\": 10.0"));
    }
}
