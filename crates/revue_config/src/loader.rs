//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::{Config, TranspileSetting};
use std::path::Path;

/// Name of the configuration file looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "revue.toml";

/// Loads and validates the configuration of the project at `project_dir`.
///
/// Reads `<project_dir>/revue.toml`; a missing file yields the defaults.
pub fn load_config(project_dir: &Path) -> Result<Config, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE_NAME);
    if !config_path.is_file() {
        tracing::debug!(path = %config_path.display(), "no configuration file, using defaults");
        return Ok(Config::default());
    }
    load_config_file(&config_path)
}

/// Loads and validates a configuration file at an explicit path.
pub fn load_config_file(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<Config, ConfigError> {
    let config: Config =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Rejects configurations that would only fail once a file is compiled.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.compiler.command.first().map_or(true, |p| p.is_empty()) {
        return Err(ConfigError::EmptyCommand("compiler.command".to_string()));
    }
    if let TranspileSetting::Configured(transpile) = &config.transpile {
        if let Some(command) = &transpile.command {
            if command.first().map_or(true, |p| p.is_empty()) {
                return Err(ConfigError::EmptyCommand("transpile.command".to_string()));
            }
        }
    }
    if matches!(&config.cache_dir, Some(dir) if dir.as_os_str().is_empty()) {
        return Err(ConfigError::InvalidValue {
            key: "cache_dir".to_string(),
            value: String::new(),
        });
    }
    config.diagnostic_policy()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LogLevel, ModuleFormat};

    #[test]
    fn parse_empty_config() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.log_level, LogLevel::Warn);
        assert!(!config.permanent_cache);
        assert!(!config.transpile_enabled());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
log_level = "info"
module_format = "static"
permanent_cache = true
cache_dir = ".cache/revue"
no_log_parser_errors = true
no_log_template_compiler_errors = false
no_log_template_compiler_tips = true
transpile = true

[compiler]
command = ["node", "bridge.js"]

[parser.errors]
exclude = ["a"]

[template_compiler.errors]
exclude = [{ regex = "^b" }]

[template_compiler.tips]
exclude = ["c", "d"]
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.module_format, ModuleFormat::Static);
        assert!(config.permanent_cache);
        assert!(config.no_log_parser_errors);
        assert!(config.transpile_enabled());
        assert_eq!(config.compiler.command, vec!["node", "bridge.js"]);
        assert_eq!(config.template_compiler.tips.exclude.len(), 2);
    }

    #[test]
    fn unknown_key_errors() {
        let err = load_config_from_str("emit_esmodule = true").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn invalid_toml_errors() {
        let err = load_config_from_str("this is not valid toml {{{}}}").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn invalid_regex_errors() {
        let toml = r#"
[template_compiler.tips]
exclude = [{ regex = "(unclosed" }]
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }

    #[test]
    fn empty_compiler_command_errors() {
        let err = load_config_from_str("[compiler]\ncommand = []").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyCommand(ref key) if key == "compiler.command"));
    }

    #[test]
    fn empty_transpile_command_errors() {
        let err = load_config_from_str("[transpile]\ncommand = []").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyCommand(ref key) if key == "transpile.command"));
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_from_project_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "permanent_cache = true\n").unwrap();
        let config = load_config(dir.path()).unwrap();
        assert!(config.permanent_cache);
    }

    #[test]
    fn io_error_names_path() {
        let err = load_config_file(Path::new("/nonexistent/dir/revue.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/dir/revue.toml"));
    }
}
