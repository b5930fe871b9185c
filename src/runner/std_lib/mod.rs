//! Native functions available to every program.

pub mod core;
mod string;
mod system;

pub use self::core::{builtin_names, register_core_builtins};
