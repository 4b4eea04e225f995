//! Environment variable overrides.

use crate::error::ConfigError;
use crate::types::{Config, LogLevel};

/// Overrides the configured log level.
pub const LOG_LEVEL_VAR: &str = "REVUE_LOG_LEVEL";
/// Any non-empty value silences parser errors.
pub const SILENCE_PARSER_ERRORS_VAR: &str = "REVUE_SILENCE_PARSER_ERRORS";
/// Any non-empty value silences template codegen errors.
pub const SILENCE_TEMPLATE_COMPILER_ERRORS_VAR: &str = "REVUE_SILENCE_TEMPLATE_COMPILER_ERRORS";
/// Any non-empty value silences template codegen tips.
pub const SILENCE_TEMPLATE_COMPILER_TIPS_VAR: &str = "REVUE_SILENCE_TEMPLATE_COMPILER_TIPS";

/// Snapshot of the `REVUE_*` environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    /// Raw value of `REVUE_LOG_LEVEL`, if set and non-empty.
    pub log_level: Option<String>,
    /// `REVUE_SILENCE_PARSER_ERRORS` is set.
    pub silence_parser_errors: bool,
    /// `REVUE_SILENCE_TEMPLATE_COMPILER_ERRORS` is set.
    pub silence_template_compiler_errors: bool,
    /// `REVUE_SILENCE_TEMPLATE_COMPILER_TIPS` is set.
    pub silence_template_compiler_tips: bool,
}

impl EnvOverrides {
    /// Reads the overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the overrides through `lookup`, treating empty values as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        Self {
            log_level: get(LOG_LEVEL_VAR),
            silence_parser_errors: get(SILENCE_PARSER_ERRORS_VAR).is_some(),
            silence_template_compiler_errors: get(SILENCE_TEMPLATE_COMPILER_ERRORS_VAR).is_some(),
            silence_template_compiler_tips: get(SILENCE_TEMPLATE_COMPILER_TIPS_VAR).is_some(),
        }
    }
}

impl Config {
    /// Applies environment overrides on top of the file configuration.
    ///
    /// Silencing variables can only turn output off. An unrecognized
    /// `REVUE_LOG_LEVEL` is rejected.
    pub fn apply_env(&mut self, env: &EnvOverrides) -> Result<(), ConfigError> {
        if let Some(level) = &env.log_level {
            self.log_level = level
                .parse::<LogLevel>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: LOG_LEVEL_VAR.to_string(),
                    value: level.clone(),
                })?;
        }
        self.no_log_parser_errors |= env.silence_parser_errors;
        self.no_log_template_compiler_errors |= env.silence_template_compiler_errors;
        self.no_log_template_compiler_tips |= env.silence_template_compiler_tips;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> EnvOverrides {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvOverrides::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn empty_environment_changes_nothing() {
        let mut config = Config::default();
        config.apply_env(&lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn log_level_override() {
        let mut config = Config::default();
        config
            .apply_env(&lookup(&[(LOG_LEVEL_VAR, "debug")]))
            .unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn invalid_log_level_names_variable() {
        let mut config = Config::default();
        let err = config
            .apply_env(&lookup(&[(LOG_LEVEL_VAR, "chatty")]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value 'chatty' for 'REVUE_LOG_LEVEL'"
        );
    }

    #[test]
    fn silencing_vars_only_disable() {
        let env = lookup(&[
            (SILENCE_PARSER_ERRORS_VAR, "1"),
            (SILENCE_TEMPLATE_COMPILER_TIPS_VAR, ""),
        ]);
        assert!(env.silence_parser_errors);
        assert!(!env.silence_template_compiler_tips);

        let mut config = Config {
            no_log_template_compiler_errors: true,
            ..Config::default()
        };
        config.apply_env(&env).unwrap();
        assert!(config.no_log_parser_errors);
        assert!(config.no_log_template_compiler_errors);
        assert!(!config.no_log_template_compiler_tips);
    }
}
