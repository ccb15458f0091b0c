//! Common error infrastructure for game-core.
//!
//! This module provides the shared severity classification plus the error
//! types surfaced by the registry and by modifier lifecycle calls.
//!
//! # Design Principles
//!
//! - **Returned, not thrown**: lookup and validation failures are plain values
//! - **Severity Classification**: errors are categorized for recovery strategies
//! - **Isolation**: a [`ModifierFault`] never escapes the orchestration layer

use thiserror::Error;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: Temporary conditions that may succeed on retry
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: A modifier or adapter misbehaved; logged and isolated
/// - **Fatal**: Startup cannot continue (e.g. conflicting registrations)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative input.
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown modifier name, negative weight
    Validation,

    /// Internal error - a component misbehaved at runtime.
    ///
    /// Examples: a modifier's revert failed or panicked
    Internal,

    /// Fatal error - the plugin cannot finish loading.
    ///
    /// Examples: two modifiers registered under the same name
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug or broken content.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for log fields and for asserting on error kinds in tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Failures of registry lookups and administrative mutations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A modifier with this name is already registered.
    #[error("modifier `{0}` is already registered")]
    DuplicateName(String),

    /// No modifier with this name is registered.
    #[error("unknown modifier `{0}`")]
    NotFound(String),

    /// Weights must be non-negative and fit in 32 bits.
    #[error("invalid weight {weight} for `{name}`: weights must be between 0 and {}", u32::MAX)]
    InvalidWeight { name: String, weight: i64 },
}

impl GameError for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DuplicateName(_) => ErrorSeverity::Fatal,
            Self::NotFound(_) | Self::InvalidWeight { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateName(_) => "DUPLICATE_NAME",
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidWeight { .. } => "INVALID_WEIGHT",
        }
    }
}

/// A modifier's lifecycle or damage hook failed.
///
/// Modifiers return this from `apply`/`revert`; the orchestration layer also
/// synthesizes it when a modifier panics. It is logged and never propagated
/// past the round handler.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ModifierFault {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl ModifierFault {
    /// Creates a fault with a plain message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps an underlying error (usually an [`EngineError`](crate::EngineError)).
    pub fn from_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns the fault message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl GameError for ModifierFault {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        "MODIFIER_FAULT"
    }
}

impl From<crate::EngineError> for ModifierFault {
    fn from(error: crate::EngineError) -> Self {
        Self::from_source("engine call failed", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_name_is_fatal() {
        let err = RegistryError::DuplicateName("LowGravity".into());
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
        assert!(err.severity().is_internal());
        assert_eq!(err.error_code(), "DUPLICATE_NAME");
    }

    #[test]
    fn invalid_weight_message_names_modifier() {
        let err = RegistryError::InvalidWeight {
            name: "Juggernaut".into(),
            weight: -4,
        };
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert!(err.to_string().contains("Juggernaut"));
        assert!(err.to_string().contains("-4"));
    }
}
