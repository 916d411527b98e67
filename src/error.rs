use thiserror::Error;

#[derive(Error, Debug)]
pub enum StackError {
    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("catalog parse error: {0}")]
    CatalogParse(String),

    #[error("catalog is empty: {0}")]
    EmptyCatalog(String),

    #[error("context parse error: {0}")]
    ContextParse(String),

    #[error("unknown supplement: {0}")]
    UnknownSupplement(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, StackError>;
