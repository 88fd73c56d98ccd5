use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed source document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid source document: {0}")]
    Invalid(String),

    #[error("Unknown source document '{0}'")]
    UnknownDocument(String),

    #[error("No feature '{feature}' under '{category}' in document '{document}'")]
    UnknownFeature {
        document: String,
        category: String,
        feature: String,
    },
}
