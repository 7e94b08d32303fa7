//! Domain error types.

/// Top-level error type for pricecast.
#[derive(Debug, thiserror::Error)]
pub enum PricecastError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data source error: {reason}")]
    Data { reason: String },

    #[error("no data for {symbol}")]
    NoData { symbol: String },

    #[error("invalid series: {reason}")]
    InvalidSeries { reason: String },

    #[error("insufficient data: have {bars} bars, need at least {minimum}")]
    InsufficientData { bars: usize, minimum: usize },

    #[error("training failed: {reason}")]
    Training { reason: String },

    #[error("model has not been fitted")]
    NotFitted,

    #[error("cannot compute metrics on empty input")]
    EmptyInput,

    #[error("length mismatch: expected {expected}, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&PricecastError> for std::process::ExitCode {
    fn from(err: &PricecastError) -> Self {
        let code: u8 = match err {
            PricecastError::Io(_) => 1,
            PricecastError::ConfigParse { .. }
            | PricecastError::ConfigMissing { .. }
            | PricecastError::ConfigInvalid { .. } => 2,
            PricecastError::Data { .. } | PricecastError::InvalidSeries { .. } => 3,
            PricecastError::Training { .. }
            | PricecastError::NotFitted
            | PricecastError::LengthMismatch { .. } => 4,
            PricecastError::NoData { .. }
            | PricecastError::InsufficientData { .. }
            | PricecastError::EmptyInput => 5,
        };
        std::process::ExitCode::from(code)
    }
}
