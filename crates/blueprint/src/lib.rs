//! # blueprint
//!
//! Compile-time generation of the boilerplate around plain data types:
//! - Staged builders that only offer `build()` once every mandatory field is set
//! - Design-by-contract validators checked on construction, access and demand
//! - Equality, hashing, display and ordering over chosen fields
//! - Structs implementing accessor traits, with logged method interceptors
//! - Conversion to and from a generic [`Value`] tree
//!
//! ## Builders
//!
//! ```
//! use blueprint::Builder;
//!
//! #[derive(Debug, Builder)]
//! struct Person {
//!     name: String,
//!     age: u32,
//!     nickname: Option<String>,
//! }
//!
//! let person = PersonBuilder::with_name("Ada".to_string())
//!     .with_age(36)
//!     .with_nickname(Some("Countess".to_string()))
//!     .build();
//!
//! assert_eq!(person.age, 36);
//! ```
//!
//! Leaving out a mandatory field does not compile:
//!
//! ```compile_fail
//! use blueprint::Builder;
//!
//! #[derive(Builder)]
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! let person = PersonBuilder::with_name("Ada".to_string()).build();
//! ```
//!
//! ## Contracts
//!
//! Fields carrying `#[validate(...)]` make `build()` return a [`ContractResult`]:
//!
//! ```
//! use blueprint::Builder;
//!
//! #[derive(Debug, Builder)]
//! struct Account {
//!     #[validate(non_empty, max_size = 16)]
//!     owner: String,
//!     #[validate(non_negative)]
//!     balance: i64,
//! }
//!
//! let err = AccountBuilder::with_owner(String::new())
//!     .with_balance(10)
//!     .build()
//!     .unwrap_err();
//!
//! assert_eq!(err.message(), "The owner may not be empty.");
//! ```
//!
//! There are no dedicated index validators. Within `#[derive(Validate)]` the
//! checks run against `&self`, so an index is bounded by a `check`:
//!
//! ```
//! use blueprint::{Validate, Validated};
//!
//! #[derive(Debug, Validate)]
//! struct Cursor {
//!     items: Vec<char>,
//!     // an insertion point may sit one past the end
//!     #[validate(check = *value <= self.items.len())]
//!     position: usize,
//! }
//!
//! assert!(Cursor { items: vec!['a', 'b'], position: 2 }.validate().is_ok());
//! assert!(Cursor { items: vec!['a', 'b'], position: 3 }.validate().is_err());
//! ```
//!
//! ## Accessor traits
//!
//! ```
//! use blueprint::generate;
//!
//! #[generate]
//! pub trait Counter {
//!     #[validate(non_negative)]
//!     fn count(&self) -> i32;
//!     fn set_count(&mut self, count: i32);
//!
//!     fn increment(&mut self) {
//!         let next = self.count() + 1;
//!         self.set_count(next);
//!     }
//! }
//!
//! let mut counter = CounterSubclass::new(1).unwrap();
//! counter.increment();
//!
//! assert_eq!(counter.count(), 2);
//! assert_eq!(counter.to_string(), "CounterSubclass(count: 2)");
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`blueprint_core`] - Contract violations, validation helpers, hashing and values
//! - [`blueprint_logging`] - Runtime of the `#[logged]` interceptor
//! - [`blueprint_macros`] - The derives and the `#[generate]` attribute

// Re-export core types
pub use blueprint_core::{
    ContractKind, ContractResult, ContractViolation, ConversionError, Convertible, Level,
    RecordReader, RepresentingHash, Validated, Value, validation,
};

// Re-export logging runtime
pub use blueprint_logging::{CaptureLayer, CapturedEvent, LOGGED_TARGET, LoggedCall, init_logging};

// Re-export macros
pub use blueprint_macros::{Builder, Convert, Representing, Validate, generate};

pub use tracing;

/// Paths used by generated code. Not part of the public API.
#[doc(hidden)]
pub mod __private {
    pub use blueprint_core::{
        ContractResult, ContractViolation, ConversionError, Convertible, RepresentingHash,
        Validated, Value, validation,
    };
    pub use blueprint_logging::{Level, LoggedCall};
}

/// Prelude module for convenient imports.
///
/// Use `use blueprint::prelude::*;` to import the macros together with the
/// traits and errors their output refers to.
pub mod prelude {
    pub use crate::{
        Builder, ContractResult, ContractViolation, Convert, ConversionError, Convertible, Level,
        Representing, Validate, Validated, Value, generate,
    };
}
