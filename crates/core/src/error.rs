//! Domain error model.

use thiserror::Error;

use crate::id::MachineId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// The taxonomy is deliberately narrow: the only failures this system can
/// produce are registry lookups for identities that were never created and
/// double registration of an identity. A missing subscriber on the bus is
/// not an error at all (events without a subscriber are dropped).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A referenced machine identity has no registered machine.
    ///
    /// Callers treat this as a wiring bug (the bus only routes events for
    /// machines created at bootstrap), not a recoverable condition.
    #[error("machine not found: {0}")]
    NotFound(MachineId),

    /// A machine identity was registered a second time.
    #[error("machine already registered: {0}")]
    AlreadyRegistered(MachineId),
}
