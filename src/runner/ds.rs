pub mod env_record;
pub mod error;
pub mod function_object;
pub mod lex_env;
pub mod operations;
pub mod value;
