use std::mem;

use crate::runner::config::InterpreterConfig;
use crate::runner::ds::lex_env::Environment;
use crate::runner::sink::OutputSink;

/// State threaded through one `execute` run and handed to native functions.
pub struct EvalContext<'a> {
    /// The innermost scope of the code being evaluated.
    pub lex_env: Environment,
    pub config: InterpreterConfig,
    /// Closure and native calls currently on the Rust stack.
    pub call_depth: usize,
    sink: &'a mut dyn OutputSink,
}

impl<'a> EvalContext<'a> {
    pub fn new(
        lex_env: Environment,
        config: InterpreterConfig,
        sink: &'a mut dyn OutputSink,
    ) -> Self {
        EvalContext {
            lex_env,
            config,
            call_depth: 0,
            sink,
        }
    }

    /// Enters a fresh child scope of the current one and returns the scope
    /// to restore afterwards.
    pub fn push_block_scope(&mut self) -> Environment {
        let block_env = self.lex_env.child_scope();
        self.replace_lex_env(block_env)
    }

    /// Swaps in `env` as the current scope, returning the previous one.
    pub fn replace_lex_env(&mut self, env: Environment) -> Environment {
        mem::replace(&mut self.lex_env, env)
    }

    pub fn print_line(&mut self, line: &str) {
        self.sink.write_line(line);
    }
}
