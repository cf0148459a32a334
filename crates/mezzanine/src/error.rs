//! Error types for configurator operations.
//!
//! This module provides the main error type [`MezzanineError`] which wraps
//! the error conditions that can occur while loading, validating, storing,
//! exporting or quoting a configuration.

use std::io;

use thiserror::Error;

use crate::{export, quote, store, validate::ValidationError};

/// The main error type for configurator operations.
///
/// # Diagnostic Variants
///
/// The `Validation` variant carries every issue found in one pass, each with a
/// stable code and a help hint, so callers can report them one by one.
#[derive(Debug, Error)]
pub enum MezzanineError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid configuration document: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Store error: {0}")]
    Store(#[from] store::Error),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),

    #[error("Quote error: {0}")]
    Quote(String),
}

impl From<export::Error> for MezzanineError {
    fn from(error: export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl From<quote::Error> for MezzanineError {
    fn from(error: quote::Error) -> Self {
        match error {
            quote::Error::Invalid(err) => Self::Validation(err),
        }
    }
}

impl MezzanineError {
    /// The validation issues carried by this error, if any.
    pub fn validation_issues(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}
