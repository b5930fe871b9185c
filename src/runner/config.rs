//! Interpreter configuration.

use std::env;
use std::fmt;
use std::str::FromStr;

use tracing::warn;

pub const DEFAULT_MAX_CALL_DEPTH: usize = 512;

pub const REDECLARATION_VAR: &str = "IX_REDECLARATION";
pub const MAX_CALL_DEPTH_VAR: &str = "IX_MAX_CALL_DEPTH";

/// What `define` does when the name already exists in the same scope.
/// Shadowing from an inner scope is always allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedeclarationPolicy {
    /// The later definition replaces the earlier one.
    Allow,
    /// The second definition fails with `Redeclaration`.
    Forbid,
}

impl Default for RedeclarationPolicy {
    fn default() -> Self {
        RedeclarationPolicy::Allow
    }
}

impl FromStr for RedeclarationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allow" => Ok(RedeclarationPolicy::Allow),
            "forbid" => Ok(RedeclarationPolicy::Forbid),
            other => Err(format!("unknown redeclaration policy '{}'", other)),
        }
    }
}

impl fmt::Display for RedeclarationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedeclarationPolicy::Allow => write!(f, "allow"),
            RedeclarationPolicy::Forbid => write!(f, "forbid"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterConfig {
    pub redeclaration: RedeclarationPolicy,
    /// Closure and native calls nested deeper than this fail with `StackOverflow`.
    pub max_call_depth: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        InterpreterConfig {
            redeclaration: RedeclarationPolicy::default(),
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

impl InterpreterConfig {
    pub fn with_redeclaration(mut self, redeclaration: RedeclarationPolicy) -> Self {
        self.redeclaration = redeclaration;
        self
    }

    pub fn with_max_call_depth(mut self, max_call_depth: usize) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }

    /// Reads `IX_REDECLARATION` and `IX_MAX_CALL_DEPTH` from the process
    /// environment. Missing or malformed values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = InterpreterConfig::default();
        if let Some(raw) = lookup(REDECLARATION_VAR) {
            match raw.parse::<RedeclarationPolicy>() {
                Ok(policy) => config.redeclaration = policy,
                Err(e) => warn!(var = REDECLARATION_VAR, value = %raw, "{}, using default", e),
            }
        }
        if let Some(raw) = lookup(MAX_CALL_DEPTH_VAR) {
            match raw.trim().parse::<usize>() {
                Ok(depth) if depth > 0 => config.max_call_depth = depth,
                _ => warn!(
                    var = MAX_CALL_DEPTH_VAR,
                    value = %raw,
                    "invalid call depth, using default"
                ),
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = InterpreterConfig::default();
        assert_eq!(config.redeclaration, RedeclarationPolicy::Allow);
        assert_eq!(config.max_call_depth, DEFAULT_MAX_CALL_DEPTH);
    }

    #[test]
    fn lookup_overrides_both_settings() {
        let config = InterpreterConfig::from_lookup(lookup_from(&[
            (REDECLARATION_VAR, "Forbid"),
            (MAX_CALL_DEPTH_VAR, "64"),
        ]));
        assert_eq!(config.redeclaration, RedeclarationPolicy::Forbid);
        assert_eq!(config.max_call_depth, 64);
    }

    #[test]
    fn malformed_values_fall_back() {
        let config = InterpreterConfig::from_lookup(lookup_from(&[
            (REDECLARATION_VAR, "sometimes"),
            (MAX_CALL_DEPTH_VAR, "0"),
        ]));
        assert_eq!(config, InterpreterConfig::default());
    }

    #[test]
    fn from_env_reads_process_variables() {
        env::set_var(REDECLARATION_VAR, "forbid");
        env::set_var(MAX_CALL_DEPTH_VAR, "64");
        let config = InterpreterConfig::from_env();
        env::remove_var(REDECLARATION_VAR);
        env::remove_var(MAX_CALL_DEPTH_VAR);
        assert_eq!(config.redeclaration, RedeclarationPolicy::Forbid);
        assert_eq!(config.max_call_depth, 64);
    }

    #[test]
    fn builder_setters() {
        let config = InterpreterConfig::default()
            .with_redeclaration(RedeclarationPolicy::Forbid)
            .with_max_call_depth(8);
        assert_eq!(config.redeclaration, RedeclarationPolicy::Forbid);
        assert_eq!(config.max_call_depth, 8);
    }
}
