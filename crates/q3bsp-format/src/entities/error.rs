//! Error types for entity text parsing

use thiserror::Error;

/// Errors that can occur when parsing entity text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityParseError {
    /// A token appeared where another was required
    #[error("Line {line}: expected {expected}, found {found:?}")]
    UnexpectedToken {
        /// 1-based line number
        line: usize,
        /// What the parser was looking for
        expected: &'static str,
        /// The token that was found
        found: String,
    },

    /// A quoted string was not closed before the end of the text
    #[error("Line {line}: unterminated string")]
    UnterminatedString {
        /// Line where the string started
        line: usize,
    },

    /// An entity block was not closed before the end of the text
    #[error("Line {line}: unterminated entity")]
    UnterminatedEntity {
        /// Line where the entity started
        line: usize,
    },
}
