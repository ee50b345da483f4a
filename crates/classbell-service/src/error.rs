use thiserror::Error;

/// Service layer errors. Every variant is fatal for the tick.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    StoreError(#[from] classbell_store::StoreError),

    #[error(transparent)]
    CoreError(#[from] classbell_core::error::CoreError),

    #[error("Push transport rejected credentials for all {attempted} attempted deliveries")]
    TransportUnauthorized { attempted: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
