//! `generate`: write the C++ template table header.

use std::path::{Path, PathBuf};

use anyhow::Context;
use script_templates::generate_to_file;

use super::collect_sources;
use crate::cli_config::CliConfig;
use crate::output;

pub(crate) fn handle_generate_command(
    cli_config: &CliConfig,
    templates_dir: Option<&Path>,
    output_path: Option<&Path>,
    strict: bool,
    files: &[PathBuf],
) -> anyhow::Result<()> {
    let sources = collect_sources(cli_config, templates_dir, files)?;
    if sources.is_empty() {
        output::warning("No script templates found, generating an empty table.");
    }

    let output_path = output_path.unwrap_or(cli_config.output.as_path());
    let options = cli_config.generate_options(strict);

    let artifact = generate_to_file(&sources, &options, output_path)
        .with_context(|| format!("failed to generate '{}'", output_path.display()))?;

    output::success(format!(
        "Generated {} script template(s) into {}",
        artifact.count(),
        output_path.display()
    ));
    Ok(())
}
