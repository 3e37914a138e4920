//! Stack safety for deeply recursive grammars.
//!
//! Grammars close their cycles through lazy indirections, so the native
//! call depth of a parse is bounded only by the input. Two mechanisms keep
//! that from taking the process down:
//!
//! - **Stack growth**: [`ensure_sufficient_stack`] uses the `stacker` crate to
//!   switch to a fresh heap-allocated segment when the current stack runs low.
//! - **Depth budget**: [`recurse`] charges one unit per nested entry against a
//!   per-thread budget. Exceeding it raises [`StackExhausted`] as a panic
//!   payload, which [`catch_exhaustion`] turns back into a value.
//!
//! The budget is a property of the thread running the parse, not of the
//! grammar, so grammars stay immutable and shareable.
//!
//! # Platform Support
//!
//! - **Native targets**: stack growth via `stacker`.
//! - **WASM targets**: no-op passthrough (WASM has its own stack management).
//!   The depth budget still applies.

use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use tracing::warn;

/// Minimum stack space to keep available (100KB red zone).
///
/// If less than this amount remains, we'll grow the stack.
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Nested recursion points allowed per thread unless overridden with
/// [`with_depth_limit`].
pub const DEFAULT_DEPTH_LIMIT: usize = 10_000;

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
    static LIMIT: Cell<usize> = const { Cell::new(DEFAULT_DEPTH_LIMIT) };
}

/// The depth budget of the current thread ran out.
///
/// Raised with [`std::panic::panic_any`] so that it unwinds through every
/// parser frame at once; it is never folded into an ordinary parse failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("recursion depth limit of {limit} exceeded")]
pub struct StackExhausted {
    /// The budget that was in force.
    pub limit: usize,
}

/// Ensure sufficient stack space is available before executing `f`.
///
/// # Platform Behavior
///
/// - **Native**: Uses `stacker::maybe_grow` to dynamically grow the stack
/// - **WASM**: Simply calls `f()` directly (WASM manages its own stack)
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - just call directly (WASM has its own stack management).
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Run `f` as one level of recursion.
///
/// Charges one unit against the current thread's budget for the duration of
/// `f` and makes sure there is stack to run it on.
///
/// # Panics
///
/// Panics with a [`StackExhausted`] payload when the budget is already spent.
pub fn recurse<R>(f: impl FnOnce() -> R) -> R {
    let depth = current_depth();
    let limit = depth_limit();
    if depth >= limit {
        warn!(depth, limit, "recursion depth budget exhausted");
        panic::panic_any(StackExhausted { limit });
    }
    let _entered = DepthGuard::enter();
    ensure_sufficient_stack(f)
}

/// Run `f` with the current thread's depth budget set to `limit`.
///
/// The previous budget is restored afterwards, also when `f` unwinds.
pub fn with_depth_limit<R>(limit: usize, f: impl FnOnce() -> R) -> R {
    let _restore = LimitGuard {
        previous: LIMIT.with(|l| l.replace(limit)),
    };
    f()
}

/// Run `f`, returning `Err` if it raised [`StackExhausted`].
///
/// Any other panic is resumed unchanged.
pub fn catch_exhaustion<R>(f: impl FnOnce() -> R) -> Result<R, StackExhausted> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Ok(value),
        Err(payload) => match payload.downcast::<StackExhausted>() {
            Ok(exhausted) => Err(*exhausted),
            Err(other) => panic::resume_unwind(other),
        },
    }
}

/// Keep the process panic hook from reporting [`StackExhausted`] payloads.
///
/// Exhaustion unwinds as a panic, so the default hook would print a
/// `thread panicked` message (and a backtrace under `RUST_BACKTRACE`) even
/// though [`catch_exhaustion`] recovers it. The installed hook forwards every
/// other payload to the hook that was in place before. Installing twice is a
/// no-op.
pub fn silence_exhaustion_reports() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if info.payload().downcast_ref::<StackExhausted>().is_none() {
                previous(info);
            }
        }));
    });
}

/// Number of [`recurse`] frames currently active on this thread.
pub fn current_depth() -> usize {
    DEPTH.with(Cell::get)
}

/// The depth budget in force on this thread.
pub fn depth_limit() -> usize {
    LIMIT.with(Cell::get)
}

struct DepthGuard;

impl DepthGuard {
    fn enter() -> Self {
        DEPTH.with(|d| d.set(d.get() + 1));
        DepthGuard
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

struct LimitGuard {
    previous: usize,
}

impl Drop for LimitGuard {
    fn drop(&mut self) {
        LIMIT.with(|l| l.set(self.previous));
    }
}

#[cfg(test)]
mod tests;
