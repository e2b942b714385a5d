//! Common error infrastructure for battle-core.
//!
//! Domain errors live next to the code that raises them (`RejectReason` with
//! action validation, `DataIntegrityError` with battle setup, `OracleError`
//! with the table traits). This module holds what they share: a severity
//! classification and a stable error code for logs and UI mapping.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the caller may resubmit a different action
/// - **Validation**: malformed input that will never succeed unchanged
/// - **Internal**: an engine invariant was broken
/// - **Fatal**: the battle cannot be instantiated or continued
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - retry with an alternative action.
    ///
    /// Examples: ability on cooldown, target already fainted
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: ability not in loadout, unknown combatant id
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - battle setup aborted or battle already over.
    ///
    /// Examples: unknown species id, submit after the battle ended
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
        matches!(self, Self::Recoverable | Self::Validation)
    }
}

/// Common trait for all battle-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity by recoverability, not impact
/// - Error codes are stable, SCREAMING_SNAKE_CASE and prefixed by domain
pub trait EngineError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
