//! Error types for notesvc.
//!
//! This module defines the error type shared by the store, the configuration
//! layer and the HTTP server, along with the crate-wide `Result` alias.

use std::net::SocketAddr;

use thiserror::Error;

/// The main error type for notesvc operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Client Input Errors ===
    /// The request did not carry a note id.
    #[error("missing note id")]
    MissingNoteId,

    /// The note id was not a number, or does not address a stored note.
    #[error("invalid note id")]
    InvalidNoteId,

    /// The request body could not be decoded as a note.
    #[error("invalid note body: {0}")]
    InvalidNoteBody(#[source] serde_json::Error),

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Server Errors ===
    /// The listener could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address the server tried to listen on.
        addr: SocketAddr,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === I/O Errors ===
    /// Socket or file system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for notesvc operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Check if this error was caused by the client's request.
    ///
    /// Client errors leave the store untouched and map to `400 Bad Request`.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingNoteId | Self::InvalidNoteId | Self::InvalidNoteBody(_)
        )
    }

    /// The short reason reported to HTTP clients.
    ///
    /// Client errors use fixed phrases so the decoder's detail never leaks
    /// into the response body.
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::InvalidNoteBody(_) => "invalid note body".to_string(),
            other => other.to_string(),
        }
    }
}
