//! Configuration types deserialized from `revue.toml`.

use crate::error::ConfigError;
use revue_diagnostics::{CategoryPolicy, DiagnosticPolicy, ExcludeRule, MessageFilter};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

/// Cache directory used when `cache_dir` is not set, relative to the project root.
pub const DEFAULT_CACHE_DIR: &str = "node_modules/.cache/revue";

/// The project configuration parsed from `revue.toml`.
///
/// Every key is optional. A missing file is equivalent to an empty one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Log level used when neither the environment nor the CLI sets one.
    #[serde(default)]
    pub log_level: LogLevel,
    /// Module convention of the generated code.
    #[serde(default)]
    pub module_format: ModuleFormat,
    /// Whether compiled modules persist across runs.
    #[serde(default)]
    pub permanent_cache: bool,
    /// Overrides the cache directory; relative paths are resolved against the project root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
    /// Silences descriptor parser errors.
    #[serde(default)]
    pub no_log_parser_errors: bool,
    /// Silences template codegen errors.
    #[serde(default)]
    pub no_log_template_compiler_errors: bool,
    /// Silences template codegen tips.
    #[serde(default)]
    pub no_log_template_compiler_tips: bool,
    /// Script transpilation: `false`, `true`, or a table of options.
    #[serde(default)]
    pub transpile: TranspileSetting,
    /// How the component compiler bridge is launched.
    #[serde(default)]
    pub compiler: CompilerConfig,
    /// Parser diagnostic filters.
    #[serde(default)]
    pub parser: ParserConfig,
    /// Template codegen diagnostic filters.
    #[serde(default)]
    pub template_compiler: TemplateCompilerConfig,
}

impl Config {
    /// Returns the cache directory for a project rooted at `root`.
    pub fn cache_dir(&self, root: &Path) -> PathBuf {
        match &self.cache_dir {
            Some(dir) => root.join(dir),
            None => root.join(DEFAULT_CACHE_DIR),
        }
    }

    /// Returns `true` if script transpilation runs.
    pub fn transpile_enabled(&self) -> bool {
        match &self.transpile {
            TranspileSetting::Enabled(enabled) => *enabled,
            TranspileSetting::Configured(_) => true,
        }
    }

    /// Returns the dedicated transpiler command, if one is configured.
    ///
    /// Without one, transpile requests go to the compiler bridge.
    pub fn transpile_command(&self) -> Option<&[String]> {
        match &self.transpile {
            TranspileSetting::Configured(t) => t.command.as_deref(),
            TranspileSetting::Enabled(_) => None,
        }
    }

    /// Returns the options passed to the transpiler.
    ///
    /// Configured options are used verbatim; otherwise the defaults from
    /// [`default_transpile_options`] apply.
    pub fn transpile_options(&self) -> toml::Table {
        match &self.transpile {
            TranspileSetting::Configured(TranspileConfig {
                options: Some(options),
                ..
            }) if !options.is_empty() => options.clone(),
            _ => default_transpile_options(),
        }
    }

    /// Builds the diagnostic logging policy from the `no_log_*` switches and
    /// exclude lists.
    pub fn diagnostic_policy(&self) -> Result<DiagnosticPolicy, ConfigError> {
        Ok(DiagnosticPolicy {
            parser_errors: CategoryPolicy {
                enabled: !self.no_log_parser_errors,
                filter: self.parser.errors.to_filter()?,
            },
            template_errors: CategoryPolicy {
                enabled: !self.no_log_template_compiler_errors,
                filter: self.template_compiler.errors.to_filter()?,
            },
            template_tips: CategoryPolicy {
                enabled: !self.no_log_template_compiler_tips,
                filter: self.template_compiler.tips.to_filter()?,
            },
        })
    }
}

/// Log verbosity accepted by `log_level` and `REVUE_LOG_LEVEL`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything, including per-step traces.
    Trace,
    /// Descriptors, generated code and final output.
    Debug,
    /// Progress of each compile and cache decision.
    Info,
    /// Template tips and above (default).
    #[default]
    Warn,
    /// Parser and codegen errors only.
    Error,
    /// No output at all.
    Silent,
}

impl LogLevel {
    /// Returns the `tracing` filter directive for this level.
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Silent => "off",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "silent" => Ok(LogLevel::Silent),
            _ => Err(ConfigError::InvalidValue {
                key: "log_level".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// The module convention of generated code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleFormat {
    /// `export default` / `export { render }` syntax.
    Static,
    /// `exports = module.exports = ...` assignments and `require` calls (default).
    #[default]
    Dynamic,
}

/// The `transpile` key: a switch or a table of settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TranspileSetting {
    /// `transpile = true|false`.
    Enabled(bool),
    /// `[transpile]` table; its presence enables transpilation.
    Configured(TranspileConfig),
}

impl Default for TranspileSetting {
    fn default() -> Self {
        TranspileSetting::Enabled(false)
    }
}

/// Settings of the `[transpile]` table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranspileConfig {
    /// Dedicated transpiler process; defaults to the compiler bridge.
    #[serde(
        default,
        deserialize_with = "deserialize_opt_command",
        skip_serializing_if = "Option::is_none"
    )]
    pub command: Option<Vec<String>>,
    /// Options handed to the transpiler verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<toml::Table>,
}

/// Default transpiler options: preset-env targeting the running node,
/// skipping `node_modules`.
pub fn default_transpile_options() -> toml::Table {
    let mut targets = toml::Table::new();
    targets.insert(
        "targets".to_string(),
        toml::Value::String("current node".to_string()),
    );
    let preset = toml::Value::Array(vec![
        toml::Value::String("@babel/preset-env".to_string()),
        toml::Value::Table(targets),
    ]);

    let mut options = toml::Table::new();
    options.insert("presets".to_string(), toml::Value::Array(vec![preset]));
    options.insert(
        "exclude".to_string(),
        toml::Value::String("node_modules".to_string()),
    );
    options
}

/// The `[compiler]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompilerConfig {
    /// Program and arguments of the compiler bridge process.
    #[serde(default = "default_compiler_command", deserialize_with = "deserialize_command")]
    pub command: Vec<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            command: default_compiler_command(),
        }
    }
}

fn default_compiler_command() -> Vec<String> {
    vec![
        "node".to_string(),
        "node_modules/revue-bridge/index.js".to_string(),
    ]
}

/// The `[parser]` table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParserConfig {
    /// Filters for parser errors.
    #[serde(default)]
    pub errors: ExcludeList,
}

/// The `[template_compiler]` table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateCompilerConfig {
    /// Filters for codegen errors.
    #[serde(default)]
    pub errors: ExcludeList,
    /// Filters for codegen tips.
    #[serde(default)]
    pub tips: ExcludeList,
}

/// An `exclude = [...]` list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExcludeList {
    /// Messages to drop.
    #[serde(default)]
    pub exclude: Vec<ExcludePattern>,
}

impl ExcludeList {
    /// Compiles the list into a [`MessageFilter`].
    pub fn to_filter(&self) -> Result<MessageFilter, ConfigError> {
        let rules = self
            .exclude
            .iter()
            .map(ExcludePattern::to_rule)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(MessageFilter::new(rules))
    }
}

/// One exclude list entry: an exact message, or `{ regex = "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExcludePattern {
    /// Matches a message exactly.
    Exact(String),
    /// Matches messages the regex finds a match in.
    Regex {
        /// The regex source.
        regex: String,
    },
}

impl ExcludePattern {
    /// Compiles this entry into an [`ExcludeRule`].
    pub fn to_rule(&self) -> Result<ExcludeRule, ConfigError> {
        match self {
            ExcludePattern::Exact(text) => Ok(ExcludeRule::Exact(text.clone())),
            ExcludePattern::Regex { regex } => regex::Regex::new(regex)
                .map(ExcludeRule::Pattern)
                .map_err(|source| ConfigError::InvalidPattern {
                    pattern: regex.clone(),
                    source,
                }),
        }
    }
}

/// Deserializes a command given either as one string or as a list of strings.
fn deserialize_command<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct CommandVisitor;

    impl<'de> Visitor<'de> for CommandVisitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            formatter.write_str("a program path or a list of program and arguments")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut command = Vec::new();
            while let Some(part) = seq.next_element::<String>()? {
                command.push(part);
            }
            Ok(command)
        }
    }

    deserializer.deserialize_any(CommandVisitor)
}

fn deserialize_opt_command<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_command(deserializer).map(Some)
}
