use thiserror::Error;

/// Application-level errors (process boundary)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] classbell_service::ServiceError),

    #[error(transparent)]
    StoreError(#[from] classbell_store::StoreError),

    #[error(transparent)]
    CoreError(#[from] classbell_core::error::CoreError),

    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
