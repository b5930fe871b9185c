//! Stack growth for the recursive passes over the AST.
//!
//! Parsing folds long operator chains into left-deep trees and closures may
//! recurse up to `max_call_depth`, so the checker and evaluator can nest far
//! deeper than a default thread stack allows. Each recursive step goes
//! through [`ensure_sufficient_stack`], which moves onto a fresh segment when
//! the current one runs low.

/// Grow when less than this remains.
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
