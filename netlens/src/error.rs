//! Error types for netlens.

use std::io;
use std::time::Duration;

use thiserror::Error;

use crate::catalog::{Capability, Vendor};

/// Main error type for netlens operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Command catalog errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Transport-level errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Output parsing errors
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Command catalog errors (capability resolution, parameter substitution).
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The vendor has no command template for the requested capability.
    ///
    /// This is a configuration defect on the caller's side; the catalog
    /// never substitutes another vendor's template silently.
    #[error("vendor '{vendor}' has no command for capability '{capability}'")]
    UnsupportedCapability {
        vendor: Vendor,
        capability: Capability,
    },

    /// A template placeholder had no corresponding parameter value.
    #[error("command for '{capability}' requires parameter '{name}'")]
    MissingParameter {
        capability: Capability,
        name: &'static str,
    },

    /// A parameter value failed the caller-side whitelist.
    #[error("parameter '{name}' contains disallowed characters: {value:?}")]
    InvalidParameter { name: &'static str, value: String },
}

/// Transport layer errors (remote command execution).
#[derive(Error, Debug)]
pub enum TransportError {
    /// Command did not complete within the allowed time
    #[error("command timed out after {0:?}")]
    Timeout(Duration),

    /// Session was closed unexpectedly
    #[error("session disconnected")]
    Disconnected,

    /// The remote side reported an error on stderr
    #[error("remote command error: {stderr}")]
    Remote { stderr: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Output parsing errors.
///
/// Malformed individual lines inside a larger reply are skipped rather
/// than reported here; a `ParseError` means a mandatory aggregate field
/// could not be located, so the whole capability result is unusable.
#[derive(Error, Debug)]
pub enum ParseError {
    /// A mandatory field was absent from the device output.
    #[error("'{capability}' output is missing mandatory field '{field}'")]
    MissingField {
        capability: Capability,
        field: &'static str,
    },
}

/// Result type alias using netlens's Error.
pub type Result<T> = std::result::Result<T, Error>;
