//! The entry point a module loader calls for every component file.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use revue_cache::Cache;
use revue_config::Config;

use crate::bridge::ProcessBridge;
use crate::collaborator::Transpiler;
use crate::error::CompileError;
use crate::orchestrator::{CompileOptions, Orchestrator};

/// Where the persistent cache lives; opened on the first compile.
struct CacheSlot {
    root: PathBuf,
    dir: PathBuf,
    cache: Mutex<Option<Cache>>,
}

/// Marks a compile as in flight until dropped.
struct CompilingGuard<'a>(&'a AtomicBool);

impl<'a> CompilingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for CompilingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Compiles component files on behalf of a module loader.
///
/// Only one compile runs at a time. A request that arrives while another is
/// in flight (a component loading another component while it is being
/// compiled) gets its source back unchanged.
pub struct CompileHook {
    orchestrator: Orchestrator,
    cache: Option<CacheSlot>,
    compiling: AtomicBool,
}

impl CompileHook {
    /// A hook without persistent caching.
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator,
            cache: None,
            compiling: AtomicBool::new(false),
        }
    }

    /// Enables the persistent cache in `cache_dir`, keyed relative to `root`.
    ///
    /// The cache metadata is not read until the first compile.
    pub fn with_cache(mut self, root: impl Into<PathBuf>, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache = Some(CacheSlot {
            root: root.into(),
            dir: cache_dir.into(),
            cache: Mutex::new(None),
        });
        self
    }

    /// Builds a hook from configuration, starting the collaborator processes.
    ///
    /// Fails before any file is compiled if the compiler cannot be started,
    /// or if transpilation is enabled with a command that cannot be started.
    pub fn from_config(config: &Config, root: &Path) -> Result<Self, CompileError> {
        let options = CompileOptions::from_config(config)?;
        let bridge = ProcessBridge::spawn(&config.compiler.command, root)
            .map(Arc::new)
            .map_err(CompileError::Bridge)?;
        let mut orchestrator = Orchestrator::new(bridge.clone(), options)?;

        if config.transpile_enabled() {
            let transpiler: Arc<dyn Transpiler> = match config.transpile_command() {
                Some(command) => Arc::new(ProcessBridge::spawn(command, root).map_err(|source| {
                    CompileError::MissingTranspiler {
                        command: command.join(" "),
                        source,
                    }
                })?),
                None => bridge,
            };
            orchestrator = orchestrator.with_transpiler(transpiler);
        }

        let hook = Self::new(orchestrator);
        Ok(if config.permanent_cache {
            hook.with_cache(root, config.cache_dir(root))
        } else {
            hook
        })
    }

    /// The orchestrator compiles are delegated to.
    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    /// Returns `true` while a compile is in flight.
    pub fn is_compiling(&self) -> bool {
        self.compiling.load(Ordering::Acquire)
    }

    /// Returns the module text for a component file.
    ///
    /// Serves a fresh cached module when there is one; otherwise compiles
    /// and, with caching enabled, stores the result.
    pub fn hook(&self, source: &str, filename: &Path) -> Result<String, CompileError> {
        let Some(_guard) = CompilingGuard::acquire(&self.compiling) else {
            tracing::debug!(file = %filename.display(), "compile in progress, returning source unchanged");
            return Ok(source.to_string());
        };

        let Some(slot) = &self.cache else {
            return Ok(self.orchestrator.compile(source, filename)?.code);
        };

        let mut opened = slot.cache.lock().unwrap_or_else(PoisonError::into_inner);
        let cache = match opened.take() {
            Some(cache) => cache,
            None => Cache::initialize(&slot.root, &slot.dir, self.orchestrator.compiler_version())?,
        };
        let cache = opened.insert(cache);

        if let Some(code) = cache.get_cached(filename) {
            return Ok(code);
        }
        let output = self.orchestrator.compile(source, filename)?;
        cache.set_cached(&output.metadata, &output.code)?;
        Ok(output.code)
    }
}
