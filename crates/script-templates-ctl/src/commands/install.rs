//! `install`: write templates out as script files for the editor.

use std::path::{Path, PathBuf};

use anyhow::Context;
use script_templates::template_generator::parse_sources;
use script_templates::template_installer::install_templates;

use super::collect_sources;
use crate::cli_config::CliConfig;
use crate::output;

pub(crate) fn handle_install_command(
    cli_config: &CliConfig,
    target: &Path,
    templates_dir: Option<&Path>,
    files: &[PathBuf],
) -> anyhow::Result<()> {
    let sources = collect_sources(cli_config, templates_dir, files)?;
    let records = parse_sources(&sources, cli_config.strict)?;

    let report = install_templates(&records, target)
        .with_context(|| format!("failed to install templates into '{}'", target.display()))?;

    for path in &report.skipped {
        output::warning(format!("{} already exists, skipped", path.display()));
    }
    output::success(format!(
        "Installed {} script template(s) into {} ({} skipped)",
        report.written.len(),
        target.display(),
        report.skipped.len()
    ));
    Ok(())
}
