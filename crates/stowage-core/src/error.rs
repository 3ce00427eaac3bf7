//! Error type shared by every Stowage crate.
//!
//! Lower layers convert their failures into [`AppError`] with
//! [`AppError::with_source`] and propagate with `?`; only the HTTP layer
//! decides how a kind is presented to clients.

use std::fmt;

use thiserror::Error;

/// What went wrong, independent of where it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// No record (or no blob) visible to the caller.
    NotFound,
    /// Missing, malformed, or expired token; bad credentials; inactive account.
    Authentication,
    /// Client input rejected before any side effect.
    Validation,
    /// Uniqueness violated (logical path, e-mail, id).
    Conflict,
    /// Upload passed the configured size cap.
    PayloadTooLarge,
    Internal,
    /// Metadata store failure.
    Database,
    /// Blob store failure.
    Storage,
    Configuration,
    Serialization,
}

impl ErrorKind {
    /// Stable machine-readable code.
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::Authentication => "AUTHENTICATION",
            Self::Validation => "VALIDATION",
            Self::Conflict => "CONFLICT",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::Internal => "INTERNAL",
            Self::Database => "DATABASE",
            Self::Storage => "STORAGE",
            Self::Configuration => "CONFIGURATION",
            Self::Serialization => "SERIALIZATION",
        }
    }

    /// True for failures on our side rather than the client's.
    pub const fn is_server_side(self) -> bool {
        matches!(
            self,
            Self::Internal
                | Self::Database
                | Self::Storage
                | Self::Configuration
                | Self::Serialization
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// A categorized failure with a client-safe message and an optional cause.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    pub kind: ErrorKind,
    /// Message shown to the client.
    pub message: String,
    /// Underlying cause, kept for logs only.
    #[source]
    pub source: Option<BoxedSource>,
}

/// One shorthand constructor per kind.
macro_rules! kind_constructors {
    ($($name:ident => $kind:ident),+ $(,)?) => {
        $(
            #[doc = concat!("Create a `", stringify!($kind), "` error.")]
            pub fn $name(message: impl Into<String>) -> Self {
                Self::new(ErrorKind::$kind, message)
            }
        )+
    };
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Attach the error that caused this one.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    kind_constructors! {
        not_found => NotFound,
        authentication => Authentication,
        validation => Validation,
        conflict => Conflict,
        payload_too_large => PayloadTooLarge,
        internal => Internal,
        database => Database,
        storage => Storage,
        configuration => Configuration,
    }

    pub fn is_server_error(&self) -> bool {
        self.kind.is_server_side()
    }
}

// The boxed source is not `Clone`; clones keep kind and message only.
impl Clone for AppError {
    fn clone(&self) -> Self {
        Self::new(self.kind, self.message.clone())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Storage, format!("I/O error: {err}"), err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorKind::Serialization, format!("Invalid JSON: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(ErrorKind::Configuration, err.to_string(), err)
    }
}
