use thiserror::Error;

/// Schedule store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Decode error: {0}")]
    Decode(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
