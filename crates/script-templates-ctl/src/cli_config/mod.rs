//! CLI configuration (`.script-templates.toml`).
//!
//! Every key is optional; defaults match the ability system module layout.

pub(crate) mod loader;

pub(crate) use loader::load_cli_config;

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use script_templates::discovery::DEFAULT_TEMPLATE_EXTENSIONS;
use script_templates::template_generator::ArtifactLayout;
use script_templates::{DelimiterTable, GenerateOptions};

const DEFAULT_TEMPLATES_DIR: &str = "editor/script_templates";
const DEFAULT_OUTPUT: &str = "editor/script_templates/templates.gen.h";

/// Overrides for the emitted C++ declaration names.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct LayoutConfig {
    pub struct_name: Option<String>,
    pub array_name: Option<String>,
    pub size_constant: Option<String>,
    pub includes: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "kebab-case", default)]
pub(crate) struct CliConfig {
    /// Root holding `<TypeName>/<template>` files.
    pub templates_dir: PathBuf,

    /// Generated header path.
    pub output: PathBuf,

    /// Fail on meta-lines with unknown keys.
    pub strict: bool,

    /// File extensions picked up by discovery.
    pub extensions: Vec<String>,

    /// Extra extension → comment delimiter mappings (`cs = "//"` is built in).
    pub delimiters: BTreeMap<String, String>,

    pub layout: LayoutConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from(DEFAULT_TEMPLATES_DIR),
            output: PathBuf::from(DEFAULT_OUTPUT),
            strict: false,
            extensions: DEFAULT_TEMPLATE_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            delimiters: BTreeMap::new(),
            layout: LayoutConfig::default(),
        }
    }
}

impl CliConfig {
    pub fn delimiter_table(&self) -> DelimiterTable {
        let mut table = DelimiterTable::default();
        for (extension, delimiter) in &self.delimiters {
            table.insert(extension, delimiter);
        }
        table
    }

    pub fn artifact_layout(&self) -> ArtifactLayout {
        let mut layout = ArtifactLayout::default();
        if let Some(name) = &self.layout.struct_name {
            layout.struct_name = name.clone();
        }
        if let Some(name) = &self.layout.array_name {
            layout.array_name = name.clone();
        }
        if let Some(name) = &self.layout.size_constant {
            layout.size_constant = name.clone();
        }
        if let Some(includes) = &self.layout.includes {
            layout.includes = includes.clone();
        }
        layout
    }

    /// Generator options; `strict_flag` from the command line only ever tightens.
    pub fn generate_options(&self, strict_flag: bool) -> GenerateOptions {
        GenerateOptions {
            layout: self.artifact_layout(),
            strict: self.strict || strict_flag,
        }
    }
}
