//! Shared helpers for CLI commands: project root resolution, configuration
//! loading and logging setup.

use std::path::{Path, PathBuf};

use revue_config::{load_config, load_config_file, Config, EnvOverrides, LogLevel, CONFIG_FILE_NAME};

use crate::GlobalArgs;

/// A project root and its effective configuration.
pub struct Project {
    /// Directory cache keys and relative paths are resolved against.
    pub root: PathBuf,
    /// Configuration with environment overrides applied.
    pub config: Config,
}

/// Walks up from `start` looking for the nearest directory containing `revue.toml`.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(CONFIG_FILE_NAME).is_file())
        .map(Path::to_path_buf)
}

/// Loads the project the command runs in and installs the log subscriber.
///
/// With `--config`, that file is loaded and its directory is the project
/// root. Otherwise the nearest `revue.toml` above the current directory is
/// used, falling back to defaults rooted at the current directory.
pub fn load_project(global: &GlobalArgs) -> Result<Project, Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let (root, mut config) = match &global.config {
        Some(path) => {
            let path = cwd.join(path);
            let root = path.parent().map_or_else(|| cwd.clone(), Path::to_path_buf);
            (root, load_config_file(&path)?)
        }
        None => {
            let root = find_project_root(&cwd).unwrap_or(cwd);
            let config = load_config(&root)?;
            (root, config)
        }
    };
    config.apply_env(&EnvOverrides::from_env())?;
    init_logging(log_filter(config.log_level, global));
    tracing::debug!(root = %root.display(), "loaded project configuration");
    Ok(Project { root, config })
}

/// Returns the filter directive for the configured level, with the
/// `--verbose` and `--quiet` flags taking precedence.
pub fn log_filter(level: LogLevel, global: &GlobalArgs) -> &'static str {
    if global.verbose {
        LogLevel::Debug.as_filter()
    } else if global.quiet {
        LogLevel::Error.as_filter()
    } else {
        level.as_filter()
    }
}

/// Installs a stderr `tracing` subscriber filtered at `directive`.
fn init_logging(directive: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(directive))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
