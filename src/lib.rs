//! # ix - lexical environments and closures for a tree-walking evaluator
//!
//! A small expression language whose runtime centres on scope chains:
//! - PEG parser (pest) producing a located AST
//! - Environments shared by reference, so closures capture bindings, not values
//! - Calls that run in a child of the callee's captured scope
//! - `return` unwinding as a completion record
//!
//! ## Quick Start
//!
//! ### Running a script
//!
//! ```
//! use ix::runner::api::Interpreter;
//! use ix::runner::ds::value::Value;
//! use ix::runner::sink::BufferSink;
//!
//! let script = r#"
//!     fn makeCounter() {
//!         let i = 0;
//!         fn count() {
//!             i = i + 1;
//!             print i;
//!         }
//!         return count;
//!     }
//!     let counter = makeCounter();
//!     counter();
//!     counter();
//!     return "True";
//! "#;
//!
//! let mut sink = BufferSink::new();
//! let result = Interpreter::new().run_script(script, &mut sink).unwrap();
//! assert_eq!(sink.lines(), vec!["1", "2"]);
//! assert_eq!(result, Some(Value::from("True")));
//! ```
//!
//! ### Executing a parsed program in a host environment
//!
//! ```
//! use ix::parser::IxParser;
//! use ix::runner::api::execute;
//! use ix::runner::config::RedeclarationPolicy;
//! use ix::runner::ds::lex_env::Environment;
//! use ix::runner::ds::value::Value;
//!
//! let env = Environment::new_global(RedeclarationPolicy::Allow);
//! env.define("base", Value::from(40)).unwrap();
//!
//! let program = IxParser::parse_to_ast_from_str("let answer = base + 2;").unwrap();
//! let mut printed: Vec<String> = vec![];
//! execute(&program, &env, &mut printed).unwrap();
//! assert_eq!(env.get("answer").unwrap(), Value::from(42));
//! ```
//!
//! ## Architecture
//!
//! - **[`parser`]** - PEG grammar, AST types and static semantics
//! - **[`runner`]** - Evaluation
//!   - **[`runner::ds`]** - Values, function objects, environments, errors
//!   - **[`runner::eval`]** - Tree-walking evaluator
//!   - **[`runner::std_lib`]** - Native functions
//!   - **[`runner::api`]** - `execute` and [`runner::api::Interpreter`]

#[macro_use]
extern crate lazy_static;

pub mod parser;
pub mod runner;
mod stack;
