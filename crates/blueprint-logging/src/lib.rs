//! blueprint-logging - Runtime for generated logging interceptors
//!
//! This crate provides:
//! - [`LoggedCall`] guard that generated `#[logged]` methods wrap their body in
//! - [`CaptureLayer`] tracing layer that records events in memory
//! - [`init_logging`] subscriber setup with `RUST_LOG` override

mod capture;
mod interceptor;
mod subscriber;

pub use blueprint_core::Level;
pub use capture::{CaptureLayer, CapturedEvent};
pub use interceptor::{LOGGED_TARGET, LoggedCall};
pub use subscriber::{env_filter, init_logging, level_filter};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{CaptureLayer, Level, LoggedCall, init_logging};
}
