//! The module contains the errors the engine can throw.
//!
//! Every variant but [`Database`] and [`Credentials`] carries a message meant
//! for the client as-is:
//!
//! - [`Validation`] a required input is missing or malformed.
//! - [`Conflict`] a unique field is already taken.
//! - [`Unauthorized`] bad credentials or a bad/expired token.
//! - [`NotFound`] the user or the catalog entity does not exist.
//! - [`NotFavorited`] removing a favorite the user never added.
//!
//!  [`Database`]: EngineError::Database
//!  [`Credentials`]: EngineError::Credentials
//!  [`Validation`]: EngineError::Validation
//!  [`Conflict`]: EngineError::Conflict
//!  [`Unauthorized`]: EngineError::Unauthorized
//!  [`NotFound`]: EngineError::NotFound
//!  [`NotFavorited`]: EngineError::NotFavorited
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    NotFavorited(String),
    /// Hashing or token signing failed. Never caused by client input.
    #[error("credentials backend failure: {0}")]
    Credentials(String),
    #[error("invalid configuration: {0}")]
    Configuration(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::Conflict(a), Self::Conflict(b)) => a == b,
            (Self::Unauthorized(a), Self::Unauthorized(b)) => a == b,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::NotFavorited(a), Self::NotFavorited(b)) => a == b,
            (Self::Credentials(a), Self::Credentials(b)) => a == b,
            (Self::Configuration(a), Self::Configuration(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
