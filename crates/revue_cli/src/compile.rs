//! `revue compile`: run one component through the compile hook.

use std::path::Path;

use revue_compiler::CompileHook;

use crate::pipeline::load_project;
use crate::{CompileArgs, GlobalArgs};

/// Compiles `args.file` and prints or writes the module text.
///
/// Uses the persistent cache when the configuration enables it, exactly as a
/// module loader would.
pub fn run(args: &CompileArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project = load_project(global)?;
    let file = std::env::current_dir()?.join(&args.file);
    let source = std::fs::read_to_string(&file)
        .map_err(|e| format!("failed to read {}: {e}", file.display()))?;

    let hook = CompileHook::from_config(&project.config, &project.root)?;
    let code = hook.hook(&source, &file)?;

    match &args.output {
        Some(out) => write_output(out, &code)?,
        None => print!("{code}"),
    }
    Ok(0)
}

fn write_output(path: &Path, code: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, code).map_err(|e| format!("failed to write {}: {e}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote compiled module");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("dist/components/App.js");
        write_output(&out, "module.exports = {}\n").unwrap();
        assert_eq!(std::fs::read_to_string(out).unwrap(), "module.exports = {}\n");
    }
}
