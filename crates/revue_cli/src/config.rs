//! `revue config`: print the effective configuration.

use revue_config::Config;

use crate::pipeline::load_project;
use crate::GlobalArgs;

/// Loads and validates the configuration, then prints it as TOML.
pub fn run(global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project = load_project(global)?;
    println!("# project root: {}", project.root.display());
    print!("{}", render(&project.config)?);
    Ok(0)
}

fn render(config: &Config) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use revue_config::{load_config_from_str, ModuleFormat};

    #[test]
    fn rendered_config_loads_back() {
        let config = load_config_from_str(
            "module_format = \"static\"\npermanent_cache = true\n[parser.errors]\nexclude = [\"Invalid end tag.\"]\n",
        )
        .unwrap();
        let text = render(&config).unwrap();
        let back = load_config_from_str(&text).unwrap();
        assert_eq!(back.module_format, ModuleFormat::Static);
        assert!(back.permanent_cache);
        assert_eq!(back, config);
    }
}
