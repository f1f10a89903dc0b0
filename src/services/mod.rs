use thiserror::Error;

use crate::api::ApiError;

pub mod inquiry;
pub mod main;
pub mod products;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The API rejected the caller's token; the browser must re-login.
    #[error("unauthorized")]
    Unauthorized,
    /// The API refused access to the resource.
    #[error("You are not allowed to access this resource")]
    Forbidden,
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// A server-reported failure with a message worth showing.
    #[error("{0}")]
    Api(String),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<ApiError> for ServiceError {
    fn from(value: ApiError) -> Self {
        // Only a 401 carrying code `unauthorized` sends the browser to the
        // login page; any other 401 is handled in place like a rejection.
        if value.requires_login() {
            return ServiceError::Unauthorized;
        }
        match value {
            ApiError::Forbidden => ServiceError::Forbidden,
            ApiError::NotFound => ServiceError::NotFound,
            ApiError::Unauthorized { .. }
            | ApiError::Server
            | ApiError::Rejected { .. }
            | ApiError::Transport(_) => ServiceError::Api(value.human_message()),
            ApiError::Decode(_) => ServiceError::Internal,
        }
    }
}
