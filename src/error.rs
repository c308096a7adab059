//! Error types for the rotor machine library.

use std::fmt;

use thiserror::Error;

/// Errors produced by the rotor machine library.
///
/// Every variant aborts the operation that raised it. There is no partial
/// recovery: a bad rotor name, setting or message symbol ends the run.
#[derive(Debug, Error)]
pub enum EnigmaError {
    /// Malformed machine description, rotor list, setting or plugboard.
    #[error("{0}")]
    Configuration(String),
    /// A symbol that is not a member of the configured alphabet, or that a
    /// permutation lists more than once.
    #[error("character '{0}' {1}")]
    Alphabet(char, SymbolFault),
    /// Bad command-line usage or an unreadable/unwritable path.
    #[error("{0}")]
    Usage(String),
    /// Failure reading messages or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EnigmaError {
    /// Shorthand for a [`EnigmaError::Configuration`] with a formatted message.
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        EnigmaError::Configuration(msg.into())
    }
}

/// Why a symbol was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolFault {
    NotInAlphabet,
    Repeated,
}

impl fmt::Display for SymbolFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolFault::NotInAlphabet => write!(f, "not in the alphabet"),
            SymbolFault::Repeated => write!(f, "appears more than once in a permutation"),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EnigmaError>;
