//! Command handlers for `script-templates-ctl`.

pub(crate) mod generate;
pub(crate) mod install;
pub(crate) mod list;

pub(crate) use generate::handle_generate_command;
pub(crate) use install::handle_install_command;
pub(crate) use list::handle_list_command;

use std::path::{Path, PathBuf};

use anyhow::Context;
use script_templates::discovery::discover_template_files;
use script_templates::TemplateSource;

use crate::cli_config::CliConfig;

/// Resolve generator inputs. Explicit files keep their command-line order;
/// otherwise the templates directory is scanned.
pub(crate) fn collect_sources(
    cli_config: &CliConfig,
    templates_dir: Option<&Path>,
    files: &[PathBuf],
) -> anyhow::Result<Vec<TemplateSource>> {
    let delimiters = cli_config.delimiter_table();

    let paths = if files.is_empty() {
        let root = templates_dir.unwrap_or(cli_config.templates_dir.as_path());
        discover_template_files(root, cli_config.extensions.as_slice())
            .with_context(|| format!("failed to discover templates in '{}'", root.display()))?
    } else {
        files.to_vec()
    };

    Ok(paths
        .into_iter()
        .map(|path| TemplateSource::from_path(path, &delimiters))
        .collect())
}
