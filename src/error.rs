use thiserror::Error;

/// Errors raised at the edges of the crate: reading backend exports,
/// writing report files and reading configuration.
///
/// The aggregation functions themselves never fail; dirty records are
/// skipped or zero-valued instead.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {file}: {source}")]
    Json {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Expected a JSON array at the top level of {file}")]
    NotAnArray { file: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid configuration value for {key}: {value:?}")]
    Config { key: String, value: String },
}

impl MetricsError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        MetricsError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type MetricsResult<T> = Result<T, MetricsError>;
