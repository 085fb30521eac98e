//! Error type shared by every isim operation.

use thiserror::Error;

use crate::device::DeviceRecord;

/// Errors that can occur while enumerating, selecting or launching simulators.
#[derive(Error, Debug)]
pub enum IsimError {
    /// `simctl` could not be run, exited non-zero, or printed output we could not parse.
    #[error("Failed to enumerate simulators: {0}")]
    Enumeration(String),

    /// A boot or foreground command failed.
    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    /// The query or UDID matched no device.
    #[error("No simulator found matching '{0}'")]
    NotFound(String),

    /// The query matched more than one device.
    #[error(
        "'{query}' matches {} simulators; use a more specific query or a UDID",
        .candidates.len()
    )]
    AmbiguousQuery {
        query: String,
        candidates: Vec<DeviceRecord>,
    },

    /// A stored or supplied default UDID is not among the available simulators.
    #[error("UDID '{0}' not found in available simulators")]
    InvalidDefault(String),

    /// No default simulator has been stored yet.
    #[error("No default simulator set")]
    NoDefault,

    /// Malformed invocation.
    #[error("{0}")]
    Usage(String),

    /// Reading or writing the default store failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IsimError>;
