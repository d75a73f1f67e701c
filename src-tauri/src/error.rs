use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EcoPackError {
    #[error("No materials to analyze")]
    EmptyResultSet,

    #[error("Please generate AI recommendation first.")]
    NoRecommendationYet,

    #[error("Please generate recommendation first!")]
    NoBestMaterialSelected,

    #[error("No data to export.")]
    NothingToExport,

    /// Comparison target missing from the searched set. Callers treat this
    /// as a no-op and never show it to the user.
    #[error("No material named '{0}'")]
    NoMatchFound(String),

    #[error("Service error: {0}")]
    Remote(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Export error: {0}")]
    Export(String),
}

impl From<EcoPackError> for String {
    fn from(err: EcoPackError) -> Self {
        err.to_string()
    }
}

impl From<reqwest::Error> for EcoPackError {
    fn from(err: reqwest::Error) -> Self {
        EcoPackError::Remote(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EcoPackError>;
