//! `list`: show what the generator would emit.

use std::path::{Path, PathBuf};

use script_templates::template_generator::parse_sources;

use super::collect_sources;
use crate::cli_config::CliConfig;
use crate::output;

pub(crate) fn handle_list_command(
    cli_config: &CliConfig,
    templates_dir: Option<&Path>,
    files: &[PathBuf],
) -> anyhow::Result<()> {
    let sources = collect_sources(cli_config, templates_dir, files)?;
    if sources.is_empty() {
        output::warning("No script templates found.");
        return Ok(());
    }

    let records = parse_sources(&sources, cli_config.strict)?;

    output::header("Script templates:");
    for (source, record) in sources.iter().zip(&records) {
        output::item(format!("{} [{}]", record.name, record.inherits));
        if !record.description.is_empty() {
            output::dim(format!("    {}", record.description));
        }
        output::dim(format!("    {}", source.path.display()));
        if !record.version.is_empty() {
            output::label("  Version", &record.version);
        }
        for meta in &record.unrecognized_meta {
            output::warning(format!("    ignored metadata: {meta}"));
        }
    }
    Ok(())
}
