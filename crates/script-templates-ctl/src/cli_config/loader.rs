//! Config file discovery and loading for `.script-templates.toml`.
//!
//! Checks two locations in precedence order:
//! 1. `./.script-templates.toml` (project-local)
//! 2. `~/.config/script-templates.toml` (user-global)
//!
//! An explicit `--config` path skips discovery, and problems with it are fatal.

use std::path::{Path, PathBuf};

use anyhow::Context;

use super::CliConfig;

const CONFIG_FILENAME: &str = ".script-templates.toml";
const GLOBAL_CONFIG_DIR: &str = ".config";
const GLOBAL_CONFIG_FILENAME: &str = "script-templates.toml";

/// Load CLI config from `explicit`, or from the first discovered location, or defaults.
pub(crate) fn load_cli_config(explicit: Option<&Path>) -> anyhow::Result<CliConfig> {
    if let Some(path) = explicit {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
        tracing::debug!(?path, "Loaded CLI config");
        return Ok(config);
    }

    if let Some(path) = find_config_file() {
        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    tracing::debug!(?path, "Loaded CLI config");
                    return Ok(config);
                }
                Err(e) => {
                    tracing::warn!(?path, error = %e, "Failed to parse CLI config, using defaults");
                }
            },
            Err(e) => {
                tracing::warn!(?path, error = %e, "Failed to read CLI config, using defaults");
            }
        }
    }

    Ok(CliConfig::default())
}

/// Search for config file in precedence order.
fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILENAME);
    if local.is_file() {
        return Some(local);
    }

    if let Some(home) = home_dir() {
        let global = home.join(GLOBAL_CONFIG_DIR).join(GLOBAL_CONFIG_FILENAME);
        if global.is_file() {
            return Some(global);
        }
    }

    None
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.templates_dir, PathBuf::from("editor/script_templates"));
        assert_eq!(
            config.output,
            PathBuf::from("editor/script_templates/templates.gen.h")
        );
        assert!(!config.strict);
        assert_eq!(config.extensions, vec!["cs", "gd"]);
        assert_eq!(config.artifact_layout().struct_name, "AbilitySystemScriptTemplate");
    }

    #[test]
    fn test_parse_config_toml() {
        let toml_str = r#"
templates-dir = "modules/gas/editor/script_templates"
output = "gen/templates.gen.h"
strict = true
extensions = ["gd", "cs", "gdshader"]

[delimiters]
gdshader = "//"

[layout]
struct-name = "GasScriptTemplate"
array-name = "GAS_TEMPLATES"
size-constant = "GAS_TEMPLATES_ARRAY_SIZE"
includes = ["core/object/object.h"]
"#;
        let config: CliConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.templates_dir,
            PathBuf::from("modules/gas/editor/script_templates")
        );
        assert!(config.strict);
        assert_eq!(config.extensions.len(), 3);

        let table = config.delimiter_table();
        assert_eq!(table.delimiter_for(Path::new("Node/a.gdshader")), "//");
        assert_eq!(table.delimiter_for(Path::new("Node/a.cs")), "//");
        assert_eq!(table.delimiter_for(Path::new("Node/a.gd")), "#");

        let layout = config.artifact_layout();
        assert_eq!(layout.struct_name, "GasScriptTemplate");
        assert_eq!(layout.array_name, "GAS_TEMPLATES");
        assert_eq!(layout.size_constant, "GAS_TEMPLATES_ARRAY_SIZE");
        assert_eq!(layout.includes, vec!["core/object/object.h"]);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: CliConfig = toml::from_str(r#"output = "out.h""#).unwrap();
        assert_eq!(config.output, PathBuf::from("out.h"));
        assert_eq!(config.templates_dir, PathBuf::from("editor/script_templates"));
        assert_eq!(config.artifact_layout().array_name, "ABILITY_SYSTEM_TEMPLATES");
    }

    #[test]
    fn test_strict_flag_only_tightens() {
        let config = CliConfig::default();
        assert!(!config.generate_options(false).strict);
        assert!(config.generate_options(true).strict);
    }

    #[test]
    fn test_explicit_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "strict = true\n").unwrap();

        let config = load_cli_config(Some(&path)).unwrap();
        assert!(config.strict);
    }

    #[test]
    fn test_explicit_config_errors_are_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(load_cli_config(Some(&missing)).is_err());

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "strict = [not toml").unwrap();
        assert!(load_cli_config(Some(&broken)).is_err());
    }
}
