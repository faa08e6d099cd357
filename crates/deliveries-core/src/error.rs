use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("sheet not initialized: run 'deliveries init'")]
    NotInitialized,

    #[error("sheet already exists: {0}")]
    AlreadyInitialized(String),

    #[error("row {0} out of range")]
    InvalidRow(u32),

    #[error("column {0} out of range")]
    InvalidColumn(u32),

    #[error("unknown column: '{0}'")]
    UnknownColumn(String),

    #[error("unparseable due date: '{0}'")]
    DateParse(String),

    #[error("unknown frequency: '{0}'")]
    UnknownFrequency(String),

    #[error("unknown status: '{0}'")]
    UnknownStatus(String),

    #[error("unknown priority: '{0}'")]
    UnknownPriority(String),

    #[error("sheet header mismatch: expected {expected:?}, found {found:?}")]
    HeaderMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, DeliveryError>;
