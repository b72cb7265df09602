//! Entry and exit logging around intercepted method calls

use blueprint_core::Level;
use std::fmt::{self, Debug};

/// Target every logged-call event is emitted under
pub const LOGGED_TARGET: &str = "blueprint::logged";

/// Logs the entry of a method and, once finished or dropped, its exit.
///
/// The exit line is written from `Drop` when [`LoggedCall::finish`] was never
/// reached, so it still appears when the intercepted call unwinds.
#[must_use = "the exit line is logged when the guard is finished or dropped"]
#[derive(Debug)]
pub struct LoggedCall {
    level: Level,
    method: &'static str,
    finished: bool,
}

impl LoggedCall {
    /// Log `method() {` and return the guard for the exit line.
    pub fn enter(level: Level, method: &'static str) -> Self {
        emit(level, method, format_args!("{method}() {{"));
        Self {
            level,
            method,
            finished: false,
        }
    }

    /// Log `} = (result)`.
    pub fn finish<T: Debug + ?Sized>(mut self, result: &T) {
        self.finished = true;
        emit(self.level, self.method, format_args!("}} = ({result:?})"));
    }

    /// Run `call` between the entry and exit lines, logging its result.
    pub fn run<T: Debug>(level: Level, method: &'static str, call: impl FnOnce() -> T) -> T {
        let guard = Self::enter(level, method);
        let result = call();
        guard.finish(&result);
        result
    }

    /// Run a call without a result; the exit line is a bare `}`.
    pub fn run_unit(level: Level, method: &'static str, call: impl FnOnce()) {
        let _guard = Self::enter(level, method);
        call();
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn method(&self) -> &'static str {
        self.method
    }
}

impl Drop for LoggedCall {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if std::thread::panicking() {
            emit(self.level, self.method, format_args!("}} unwound"));
        } else {
            emit(self.level, self.method, format_args!("}}"));
        }
    }
}

fn emit(level: Level, method: &'static str, message: fmt::Arguments<'_>) {
    match level {
        Level::Verbose => tracing::trace!(target: LOGGED_TARGET, method = method, "{message}"),
        Level::Debugging => tracing::debug!(target: LOGGED_TARGET, method = method, "{message}"),
        Level::Information => tracing::info!(target: LOGGED_TARGET, method = method, "{message}"),
        Level::Warning => tracing::warn!(target: LOGGED_TARGET, method = method, "{message}"),
        Level::Error => tracing::error!(target: LOGGED_TARGET, method = method, "{message}"),
        Level::Off => {}
    }
}
