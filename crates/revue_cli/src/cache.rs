//! `revue cache`: report on or empty the persistent cache.

use std::path::Path;

use revue_cache::{ArtifactStore, Cache, CacheMetadata, EntryStatus};

use crate::pipeline::load_project;
use crate::{CacheAction, GlobalArgs};

/// Runs a cache action against the project's cache directory.
///
/// Neither action starts the compiler; the compiler version is taken from
/// the existing metadata.
pub fn run(action: CacheAction, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project = load_project(global)?;
    let cache_dir = project.config.cache_dir(&project.root);
    let opened = open_existing(&project.root, &cache_dir)?;

    match action {
        CacheAction::Status => {
            let Some(cache) = opened else {
                println!("no cache at {}", cache_dir.display());
                return Ok(0);
            };
            print!("{}", format_status(&cache));
        }
        CacheAction::Clean => {
            let removed = match opened {
                Some(mut cache) => cache.clean()?,
                None => ArtifactStore::new(&cache_dir).clear()?,
            };
            println!("removed {removed} entries from {}", cache_dir.display());
        }
    }
    Ok(0)
}

/// Opens the cache if its directory holds metadata.
fn open_existing(root: &Path, cache_dir: &Path) -> Result<Option<Cache>, revue_cache::CacheError> {
    CacheMetadata::load(cache_dir)
        .map(|metadata| Cache::initialize(root, cache_dir, &metadata.compiler_version))
        .transpose()
}

fn format_status(cache: &Cache) -> String {
    let entries = cache.status();
    let mut out = format!(
        "cache: {}\ncompiler version: {}\nentries: {}\n",
        cache.cache_dir().display(),
        cache.metadata().compiler_version,
        entries.len()
    );
    for EntryStatus { key, fresh } in entries {
        out.push_str(&format!("  {} {key}\n", if fresh { "fresh" } else { "stale" }));
    }
    out
}
