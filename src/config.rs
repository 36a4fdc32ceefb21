// Runtime settings read from the environment (and `.env`, if present).
use crate::error::{MetricsError, MetricsResult};
use crate::expenses::FestivalFilter;
use std::path::PathBuf;

pub const DATA_DIR_KEY: &str = "METRICS_DATA_DIR";
pub const OUTPUT_DIR_KEY: &str = "METRICS_OUTPUT_DIR";
/// `all`, or a festival id. Digit-only values are read as numeric ids and
/// will not match festivals whose ids are stored as strings.
pub const FESTIVAL_KEY: &str = "METRICS_FESTIVAL";
pub const PREVIEW_ROWS_KEY: &str = "METRICS_PREVIEW_ROWS";
pub const TOP_DONORS_KEY: &str = "METRICS_TOP_DONORS";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub festival: FestivalFilter,
    pub preview_rows: usize,
    pub top_donors: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("."),
            festival: FestivalFilter::All,
            preview_rows: 3,
            top_donors: 5,
        }
    }
}

impl Config {
    /// Load `.env` if there is one, then read the process environment.
    pub fn from_env() -> MetricsResult<Config> {
        // A missing `.env` is normal.
        let _ = dotenvy::dotenv();
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> MetricsResult<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Config::default();
        if let Some(v) = lookup(DATA_DIR_KEY) {
            cfg.data_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup(OUTPUT_DIR_KEY) {
            cfg.output_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup(FESTIVAL_KEY) {
            cfg.festival = FestivalFilter::parse(&v);
        }
        if let Some(v) = lookup(PREVIEW_ROWS_KEY) {
            cfg.preview_rows = positive(PREVIEW_ROWS_KEY, &v)?;
        }
        if let Some(v) = lookup(TOP_DONORS_KEY) {
            cfg.top_donors = positive(TOP_DONORS_KEY, &v)?;
        }
        Ok(cfg)
    }
}

fn positive(key: &str, value: &str) -> MetricsResult<usize> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(MetricsError::Config {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordId;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(Config::from_lookup(lookup(&[])).unwrap(), Config::default());
    }

    #[test]
    fn reads_overrides() {
        let cfg = Config::from_lookup(lookup(&[
            (DATA_DIR_KEY, "/srv/export"),
            (FESTIVAL_KEY, "3"),
            (PREVIEW_ROWS_KEY, "10"),
        ]))
        .unwrap();
        assert_eq!(cfg.data_dir, PathBuf::from("/srv/export"));
        assert_eq!(cfg.festival, FestivalFilter::Festival(RecordId::Int(3)));
        assert_eq!(cfg.preview_rows, 10);
        assert_eq!(cfg.top_donors, 5);
    }

    #[test]
    fn rejects_zero_and_garbage_counts() {
        assert!(matches!(
            Config::from_lookup(lookup(&[(PREVIEW_ROWS_KEY, "0")])),
            Err(MetricsError::Config { .. })
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[(TOP_DONORS_KEY, "lots")])),
            Err(MetricsError::Config { .. })
        ));
    }
}
