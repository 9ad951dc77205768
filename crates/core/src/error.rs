#[derive(Debug, thiserror::Error)]
pub enum ValidatorError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("unknown business rule: {0}")]
    UnknownRule(String),
    #[error("failed to read purchase-order store {path}: {source}", path = path.display())]
    StoreRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse purchase-order store {path}: {source}", path = path.display())]
    StoreParse {
        path: std::path::PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

pub type ValidatorResult<T> = std::result::Result<T, ValidatorError>;
