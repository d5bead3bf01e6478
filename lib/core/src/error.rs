use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Catalog is missing required column: {0}")]
    MissingColumn(String),

    #[error("Duplicate disease code in catalog: {0}")]
    DuplicateCode(String),

    #[error("Disease {code} has an empty name")]
    EmptyName { code: String },

    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Catalog exceeds {limit} bytes once decompressed")]
    TooLarge { limit: usize },

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
