//! Script template table generation.
//!
//! Runs the parser over an ordered list of [`TemplateSource`]s and renders a
//! C++ header holding one struct literal per template:
//!
//! ```text
//! abilities/fireball.gd     ─┐
//! CharacterBody2D/adv.cs    ─┼→ parse_template → TemplateRecord → templates.gen.h
//! ...                       ─┘
//! ```
//!
//! Generation is pure; [`write_artifact`] is the only step that touches the
//! output path, and it replaces the target atomically.

mod artifact;

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::template_parser::{parse_template, ParseError, TemplateRecord};

pub use artifact::{
    ArtifactLayout, DEFAULT_ARRAY_NAME, DEFAULT_INCLUDES, DEFAULT_SIZE_CONSTANT,
    DEFAULT_STRUCT_NAME, ENTRY_SEPARATOR,
};

/// Comment delimiter used for any extension missing from the table.
pub const DEFAULT_DELIMITER: &str = "#";

/// Error during table generation.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("unrecognized template metadata '{line}' in '{}'", path.display())]
    UnrecognizedMetadata { path: PathBuf, line: String },
    #[error("failed to render generated table: {0}")]
    Render(String),
    #[error("failed to write generated table '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Maps file extensions to line-comment delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimiterTable {
    by_extension: BTreeMap<String, String>,
}

impl Default for DelimiterTable {
    fn default() -> Self {
        Self::empty().with_extension("cs", "//")
    }
}

impl DelimiterTable {
    /// A table where every extension falls back to [`DEFAULT_DELIMITER`].
    pub fn empty() -> Self {
        Self {
            by_extension: BTreeMap::new(),
        }
    }

    /// Add or replace a mapping (extension without the leading dot).
    pub fn with_extension(mut self, extension: &str, delimiter: &str) -> Self {
        self.insert(extension, delimiter);
        self
    }

    pub fn insert(&mut self, extension: &str, delimiter: &str) {
        self.by_extension.insert(
            extension.trim_start_matches('.').to_string(),
            delimiter.to_string(),
        );
    }

    /// Delimiter for a template file, chosen by its extension.
    pub fn delimiter_for(&self, path: &Path) -> &str {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.by_extension.get(ext))
            .map(String::as_str)
            .unwrap_or(DEFAULT_DELIMITER)
    }
}

/// Name of the template's parent directory, which is the type it extends.
///
/// `templates/CharacterBody2D/advanced_abilities.cs` → `CharacterBody2D`.
/// A bare filename yields an empty label.
pub fn inherits_label(path: &Path) -> String {
    path.parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// One generator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    pub path: PathBuf,
    pub inherits: String,
    pub delimiter: String,
}

impl TemplateSource {
    pub fn new(
        path: impl Into<PathBuf>,
        inherits: impl Into<String>,
        delimiter: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            inherits: inherits.into(),
            delimiter: delimiter.into(),
        }
    }

    /// Derive the inherits label and delimiter from the path itself.
    pub fn from_path(path: impl Into<PathBuf>, delimiters: &DelimiterTable) -> Self {
        let path = path.into();
        let inherits = inherits_label(&path);
        let delimiter = delimiters.delimiter_for(&path).to_string();
        Self {
            path,
            inherits,
            delimiter,
        }
    }

    pub fn parse(&self) -> Result<TemplateRecord, ParseError> {
        parse_template(&self.inherits, &self.path, &self.delimiter)
    }
}

/// Options controlling table generation.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub layout: ArtifactLayout,
    /// Reject meta-lines that match no known key instead of dropping them.
    pub strict: bool,
}

/// The rendered header and the entries it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    entries: Vec<String>,
    contents: String,
}

impl GeneratedArtifact {
    /// Serialized records, in input order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Value of the emitted size constant.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Full header text.
    pub fn contents(&self) -> &str {
        &self.contents
    }
}

/// Parse every source, in order. Stops at the first failure.
pub fn parse_sources(
    sources: &[TemplateSource],
    strict: bool,
) -> Result<Vec<TemplateRecord>, GenerateError> {
    sources
        .iter()
        .map(|source| {
            let record = source.parse()?;
            if strict {
                if let Some(line) = record.unrecognized_meta.first() {
                    return Err(GenerateError::UnrecognizedMetadata {
                        path: source.path.clone(),
                        line: line.clone(),
                    });
                }
            }
            Ok(record)
        })
        .collect()
}

/// Render already-parsed records into a header.
pub fn build_artifact(
    records: &[TemplateRecord],
    layout: &ArtifactLayout,
) -> Result<GeneratedArtifact, GenerateError> {
    let entries: Vec<String> = records.iter().map(TemplateRecord::to_entry).collect();
    let contents =
        artifact::render(&entries, layout).map_err(|e| GenerateError::Render(e.to_string()))?;
    Ok(GeneratedArtifact { entries, contents })
}

/// Parse the sources and render the header, without touching the filesystem
/// beyond reading the inputs.
pub fn generate_table(
    sources: &[TemplateSource],
    options: &GenerateOptions,
) -> Result<GeneratedArtifact, GenerateError> {
    let records = parse_sources(sources, options.strict)?;
    build_artifact(&records, &options.layout)
}

/// Atomically replace `output` with the artifact contents.
///
/// The header is written to a temporary file beside `output` and renamed over
/// it. On failure the temporary file is removed and `output` is untouched.
pub fn write_artifact(artifact: &GeneratedArtifact, output: &Path) -> Result<(), GenerateError> {
    let write_err = |source: std::io::Error| GenerateError::Write {
        path: output.to_path_buf(),
        source,
    };

    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(write_err)?;

    let mut tmp = temp_file_in(dir).map_err(write_err)?;
    // Regeneration keeps whatever mode the existing header was given.
    if let Ok(existing) = std::fs::metadata(output) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(write_err)?;
    }
    tmp.write_all(artifact.contents().as_bytes())
        .map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(output).map_err(|e| write_err(e.error))?;

    tracing::info!(
        path = %output.display(),
        templates = artifact.count(),
        "Wrote script template table"
    );
    Ok(())
}

/// Temporary file in `dir` created with the same mode a plain `File::create`
/// would get (0666 filtered by the umask), not tempfile's owner-only 0600.
pub(crate) fn temp_file_in(dir: &Path) -> std::io::Result<tempfile::NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    set_create_mode(&mut builder);
    builder.tempfile_in(dir)
}

#[cfg(unix)]
fn set_create_mode(builder: &mut tempfile::Builder<'_, '_>) {
    use std::os::unix::fs::PermissionsExt;
    builder.permissions(std::fs::Permissions::from_mode(0o666));
}

#[cfg(not(unix))]
fn set_create_mode(_builder: &mut tempfile::Builder<'_, '_>) {}

/// Generate the table and write it to `output`. Nothing is written unless
/// every source parsed.
pub fn generate_to_file(
    sources: &[TemplateSource],
    options: &GenerateOptions,
    output: &Path,
) -> Result<GeneratedArtifact, GenerateError> {
    let artifact = generate_table(sources, options)?;
    write_artifact(&artifact, output)?;
    Ok(artifact)
}
