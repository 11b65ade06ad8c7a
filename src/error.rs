use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV read failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not parse {field} from {input:?}")]
    Parse { field: &'static str, input: String },

    #[error("Industry tagger error: {message}")]
    Tagger { message: String },

    #[error("Constraint violation on {table}: {message}")]
    Constraint { table: &'static str, message: String },

    #[cfg(feature = "db")]
    #[error("Database error: {message}")]
    Database { message: String },
}

pub type Result<T> = std::result::Result<T, LoaderError>;
