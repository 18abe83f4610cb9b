use std::error::Error as StdError;

use thiserror::Error;

use crate::config::LoadError;
use crate::infra::auth::AuthError;
use crate::infra::error::InfraError;
use crate::infra::rest::ApiError;
use crate::infra::uploads::UploadError;
use crate::pos::{SelectionError, ShiftError};

/// An error flattened into its chain of messages for logging.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub source: &'static str,
    pub messages: Vec<String>,
}

impl ErrorReport {
    pub fn from_error(source: &'static str, error: &dyn StdError) -> Self {
        let mut messages = vec![error.to_string()];
        let mut current = error.source();
        while let Some(inner) = current {
            messages.push(inner.to_string());
            current = inner.source();
        }
        Self { source, messages }
    }

    pub fn chain(&self) -> String {
        self.messages.join(": ")
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error("failed to load configuration")]
    Config(#[source] LoadError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error(transparent)]
    Shift(#[from] ShiftError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<LoadError> for AppError {
    fn from(error: LoadError) -> Self {
        Self::Config(error)
    }
}

impl AppError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// The API failure underneath, if any.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            AppError::Api(err)
            | AppError::Auth(AuthError::Api(err))
            | AppError::Upload(UploadError::Api(err)) => Some(err),
            _ => None,
        }
    }

    /// Text for the operator-facing error toast.
    pub fn presentation_message(&self) -> String {
        match self.api_error() {
            Some(err) => err.user_message(),
            None => self.to_string(),
        }
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport::from_error("application::error::AppError", self)
    }
}
