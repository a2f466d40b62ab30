//! Durable store error types.

use derive_more::{Display, Error};

/// Which part of the store failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum StoreErrorKind {
    /// The database could not be opened.
    #[display("connection")]
    Connection,
    /// The schema could not be brought up to date.
    #[display("migration")]
    Migration,
    /// A read or write against the store failed.
    #[display("query")]
    Query,
    /// A value could not be encoded.
    #[display("encoding")]
    Encoding,
}

/// Store failure tagged with its kind and the call site that raised it.
#[derive(Debug, Clone, Display, Error)]
#[display("Store {} error: {} at {}:{}", kind, message, file, line)]
pub struct StoreError {
    /// What failed.
    pub kind: StoreErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a store error located at the caller.
    #[track_caller]
    pub fn new(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Wraps a failed migration run, whose error type is boxed by diesel.
    #[track_caller]
    pub fn migration(err: &(dyn std::error::Error + Send + Sync)) -> Self {
        Self::new(StoreErrorKind::Migration, err.to_string())
    }
}

impl From<diesel::result::Error> for StoreError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(StoreErrorKind::Query, err.to_string())
    }
}

impl From<diesel::ConnectionError> for StoreError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(StoreErrorKind::Connection, err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(StoreErrorKind::Encoding, err.to_string())
    }
}
