//! Error types for describing, matching, and naming symbols.
//!
//! Structural mismatches and naming collisions are not errors: the resolver
//! reports a mismatch as `Ok(false)` and the page namers resolve collisions by
//! construction. Only malformed input crosses this boundary.

use thiserror::Error;

use crate::descriptor::DescriptorId;

/// Errors raised by the descriptor factory, the resolver, and the namers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefdocError {
    /// A live symbol or descriptor that cannot be used at all.
    #[error("Invalid {what}: {message}")]
    InvalidInput {
        what: &'static str,
        message: String,
    },

    /// A descriptor id that does not belong to the arena it was used with.
    #[error("Unknown descriptor: {0}")]
    UnknownDescriptor(DescriptorId),
}

impl RefdocError {
    /// Create an invalid live-symbol error.
    pub fn invalid_symbol(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            what: "live symbol",
            message: message.into(),
        }
    }

    /// Create an invalid descriptor error.
    pub fn invalid_descriptor(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            what: "descriptor",
            message: message.into(),
        }
    }

    /// Returns true for the `InvalidInput` family.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::UnknownDescriptor(_))
    }
}

pub type Result<T> = std::result::Result<T, RefdocError>;
