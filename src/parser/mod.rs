mod api;
pub mod ast;
mod static_semantics;

pub use self::api::{IxParser, Rule};
pub use self::static_semantics::check_program;
