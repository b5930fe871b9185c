use tracing::warn;

use crate::parser::ast::ProgramData;
use crate::parser::{check_program, IxParser};
use crate::runner::config::InterpreterConfig;
use crate::runner::ds::error::IxError;
use crate::runner::ds::lex_env::Environment;
use crate::runner::ds::value::Value;
use crate::runner::eval::context::EvalContext;
use crate::runner::eval::statement::execute_program;
use crate::runner::sink::OutputSink;
use crate::runner::std_lib::register_core_builtins;

/// Runs `program` in `environment`, writing `print` output to `sink`.
///
/// Returns the value of a top-level `return`, or `None` if the program ran
/// off its end. The first failure aborts the run; lines already printed stay
/// in the sink.
pub fn execute(
    program: &ProgramData,
    environment: &Environment,
    sink: &mut dyn OutputSink,
) -> Result<Option<Value>, IxError> {
    execute_with_config(program, environment, sink, &InterpreterConfig::default())
}

pub fn execute_with_config(
    program: &ProgramData,
    environment: &Environment,
    sink: &mut dyn OutputSink,
    config: &InterpreterConfig,
) -> Result<Option<Value>, IxError> {
    let mut ctx = EvalContext::new(environment.clone(), config.clone(), sink);
    let result = execute_program(program, &mut ctx);
    if let Err(e) = &result {
        warn!(error = %e, env = %environment.id(), "execution aborted");
    }
    result
}

/// A root scope holding the native functions, with a globals scope under it
/// that persists across runs.
pub struct Interpreter {
    config: InterpreterConfig,
    prelude: Environment,
    globals: Environment,
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter::with_config(InterpreterConfig::default())
    }

    pub fn with_config(config: InterpreterConfig) -> Self {
        let prelude = Environment::new_global(config.redeclaration);
        register_core_builtins(&prelude);
        let globals = prelude.child_scope();
        Interpreter {
            config,
            prelude,
            globals,
        }
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Scope that top-level declarations land in.
    pub fn globals(&self) -> &Environment {
        &self.globals
    }

    /// Scope holding the natives. Parent of [`Interpreter::globals`].
    pub fn prelude(&self) -> &Environment {
        &self.prelude
    }

    pub fn execute(
        &self,
        program: &ProgramData,
        sink: &mut dyn OutputSink,
    ) -> Result<Option<Value>, IxError> {
        execute_with_config(program, &self.globals, sink, &self.config)
    }

    /// Parses, checks and executes `script`.
    pub fn run_script(
        &self,
        script: &str,
        sink: &mut dyn OutputSink,
    ) -> Result<Option<Value>, IxError> {
        let program = IxParser::parse_to_ast_from_str(script)?;
        check_program(&program)?;
        self.execute(&program, sink)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new()
    }
}
