//! blueprint-core - Runtime support for generated code
//!
//! This crate provides the types that code emitted by the blueprint generators
//! calls into at runtime:
//! - [`ContractViolation`] raised by generated preconditions, postconditions and invariants
//! - [`Level`] for logged method interceptors
//! - [`validation`] helpers backing the generated contract conditions
//! - [`RepresentingHash`] for folding representing fields into a hash code
//! - [`Value`] and [`Convertible`] for generated converters

mod convert;
mod error;
mod hashing;
mod level;
pub mod validation;

pub use convert::{Convertible, RecordReader, Value};
pub use error::{ContractKind, ContractResult, ContractViolation, ConversionError};
pub use hashing::{HASH_PRIME, HASH_SEED, RepresentingHash};
pub use level::Level;

/// Types whose invariants can be checked on demand.
///
/// Implemented by `#[derive(Validate)]`, which checks every field contract.
pub trait Validated {
    /// Check every invariant, returning the first violation.
    fn validate(&self) -> ContractResult<()>;
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ContractKind, ContractResult, ContractViolation, ConversionError, Convertible, Level,
        RepresentingHash, Validated, Value,
    };
}
