//! Error types raised by generated code

use thiserror::Error;

/// Result type alias for contract-checked operations
pub type ContractResult<T> = Result<T, ContractViolation>;

/// Where a violated contract was attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractKind {
    /// Checked on entry, before a value is stored
    Precondition,
    /// Checked on exit, before a value is returned
    Postcondition,
    /// Checked on demand over the whole object
    Invariant,
}

impl std::fmt::Display for ContractKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContractKind::Precondition => write!(f, "precondition"),
            ContractKind::Postcondition => write!(f, "postcondition"),
            ContractKind::Invariant => write!(f, "invariant"),
        }
    }
}

/// A generated contract did not hold
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} violated: {message}")]
pub struct ContractViolation {
    kind: ContractKind,
    message: String,
}

impl ContractViolation {
    pub fn new(kind: ContractKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        Self::new(ContractKind::Precondition, message)
    }

    pub fn postcondition(message: impl Into<String>) -> Self {
        Self::new(ContractKind::Postcondition, message)
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        Self::new(ContractKind::Invariant, message)
    }

    pub fn kind(&self) -> ContractKind {
        self.kind
    }

    /// The interpolated violation message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Abort the current operation with this violation.
    ///
    /// Used by generated methods whose signature cannot carry an error,
    /// such as getters and setters returning `()`.
    #[track_caller]
    pub fn raise(self) -> ! {
        tracing::error!(kind = %self.kind, "{}", self.message);
        panic!("{self}")
    }
}

/// Error type for converting to and from [`Value`](crate::Value)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// The value has a different variant than the target type expects
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A record had the wrong number of fields
    #[error("{type_name} expects {expected} fields, found {found}")]
    WrongArity {
        type_name: &'static str,
        expected: usize,
        found: usize,
    },

    /// A record ended before the named field could be recovered
    #[error("missing field {field} of {type_name}")]
    MissingField {
        type_name: &'static str,
        field: &'static str,
    },

    /// A numeric value does not fit the target type
    #[error("value out of range: {0}")]
    OutOfRange(String),

    /// The recovered values were rejected by the type's contracts
    #[error(transparent)]
    Violation(#[from] ContractViolation),
}
