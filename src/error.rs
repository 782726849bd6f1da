//! Error types for shaping, link generation, and media-type negotiation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while registering a field table for a type.
///
/// These are programming errors: a table that fails to build means the type
/// can never be shaped, so they surface once at startup rather than per call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("field '{name}' registered more than once")]
    DuplicateField { name: String },

    #[error("identity field '{identity}' has no registered accessor")]
    MissingIdentity { identity: String },

    #[error("field names must not be empty")]
    EmptyFieldName,

    #[error("field name '{name}' is reserved for links")]
    ReservedField { name: String },
}

/// Errors while building link targets.
///
/// `UnknownRoute` and `InvalidBaseUrl` mean the route table, link routes or
/// base URL are misconfigured. `MissingRouteValue` also covers an item whose
/// identity renders as an empty string, such as a `None` or `""` id: the
/// identity must render non-empty for its links to be built.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LinkError {
    #[error("no route registered with name '{route}'")]
    UnknownRoute { route: String },

    #[error("route '{route}' requires a value for '{key}'")]
    MissingRouteValue { route: String, key: String },

    #[error("invalid base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },
}

/// Errors while extracting the response media type from an Accept header.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MediaTypeError {
    #[error("Accept header is missing")]
    Missing,

    #[error("invalid media type \"{value}\"")]
    Invalid { value: String },

    #[error("no supported media type in \"{value}\"")]
    Unsupported { value: String },
}

/// Errors while loading item collections.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },
}

impl RegistrationError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

impl LinkError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

impl MediaTypeError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::FileNotFound { .. } | LoadError::ReadError { .. } => 3,
            LoadError::InvalidJson { .. } => 2,
        }
    }
}
