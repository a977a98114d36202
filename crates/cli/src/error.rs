//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: core error (bad density, degenerate transform, bad dimensions)
//! - 11: I/O error (spec file read, PNG or cells write)
//! - 12: input error (unknown palette or light, bad hex, bad spec JSON)
//! - 13: serialization error

use chipfield_core::ChipfieldError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    Core(ChipfieldError),
    Io(String),
    Input(String),
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Core(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Core(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) | CliError::Serialization(msg) => {
                write!(f, "{msg}")
            }
        }
    }
}

impl From<ChipfieldError> for CliError {
    fn from(e: ChipfieldError) -> Self {
        match e {
            ChipfieldError::Io(msg) => CliError::Io(msg),
            e @ (ChipfieldError::UnknownLight(_)
            | ChipfieldError::UnknownPalette(_)
            | ChipfieldError::InvalidHex(_)) => CliError::Input(e.to_string()),
            other => CliError::Core(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
