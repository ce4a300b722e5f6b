//! Script template parsing.
//!
//! A template source is a GDScript or C# file whose header carries
//! `<delimiter> meta-<key>: <value>` comment lines. Parsing strips those lines,
//! tokenizes indentation, escapes the body and yields a [`TemplateRecord`]
//! that serializes to one C++ struct literal.

mod escape;
mod metadata;

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

pub use escape::{escape_body, escape_field, unescape_content, BODY_ESCAPES, INDENT_PLACEHOLDER};
pub use metadata::MetaKey;

use metadata::MetaLine;

const DEFAULT_SPACE_INDENT: &str = "4";

/// Error during template parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to read template file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// One parsed script template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateRecord {
    /// Base type that scripts created from this template extend.
    pub inherits: String,
    /// Display name in the script picker.
    pub name: String,
    pub description: String,
    /// Parsed from `meta-version` but never emitted.
    pub version: String,
    /// Script body, indentation tokenized and string-literal escaped.
    pub body: String,
    /// Raw `meta-space-indent` value. Empty disables indentation conversion.
    pub space_indent: String,
    /// Meta-lines that matched no known key, prefix stripped.
    pub unrecognized_meta: Vec<String>,
}

impl TemplateRecord {
    /// Indentation width in spaces, if conversion is enabled and the value is usable.
    pub fn indent_width(&self) -> Option<usize> {
        self.space_indent
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|width| *width > 0)
    }

    /// The struct-literal entry for the generated table, trailing comma included.
    pub fn to_entry(&self) -> String {
        self.to_string()
    }

    fn set_field(&mut self, key: MetaKey, value: &str) {
        let field = match key {
            MetaKey::Name => &mut self.name,
            MetaKey::Description => &mut self.description,
            MetaKey::Version => &mut self.version,
            MetaKey::SpaceIndent => &mut self.space_indent,
        };
        *field = value.to_string();
    }
}

impl fmt::Display for TemplateRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ \"{}\", \"{}\", \"{}\", \"{}\" }},",
            escape_field(&self.inherits),
            escape_field(&self.name),
            escape_field(&self.description),
            self.body
        )
    }
}

/// Parse a template source file.
///
/// `inherits` is the base type label and `delimiter` the line-comment marker
/// of the file's language (`#` or `//`).
pub fn parse_template(
    inherits: &str,
    path: &Path,
    delimiter: &str,
) -> Result<TemplateRecord, ParseError> {
    let source = std::fs::read_to_string(path).map_err(|e| ParseError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let record = parse_template_str(inherits, &stem, &source, delimiter);
    tracing::debug!(
        path = %path.display(),
        inherits,
        name = %record.name,
        "Parsed script template"
    );
    Ok(record)
}

/// Parse template source text. `file_stem` supplies the fallback display name.
pub fn parse_template_str(
    inherits: &str,
    file_stem: &str,
    source: &str,
    delimiter: &str,
) -> TemplateRecord {
    let mut record = TemplateRecord {
        inherits: inherits.to_string(),
        space_indent: DEFAULT_SPACE_INDENT.to_string(),
        ..TemplateRecord::default()
    };

    let prefix = metadata::meta_prefix(delimiter);
    let source = normalize_line_endings(source);
    let mut body = String::with_capacity(source.len());

    for line in source.split_inclusive('\n') {
        match metadata::classify(line, &prefix) {
            MetaLine::Body => body.push_str(line),
            MetaLine::Field(key, value) => record.set_field(key, value),
            MetaLine::Unrecognized(rest) => {
                tracing::debug!(meta = rest, "Ignoring unrecognized template metadata");
                record.unrecognized_meta.push(rest.to_string());
            }
        }
    }

    if !record.space_indent.is_empty() {
        match record.indent_width() {
            Some(width) => body = body.replace(&" ".repeat(width), INDENT_PLACEHOLDER),
            None => tracing::debug!(
                space_indent = %record.space_indent,
                "space-indent is not a positive integer, leaving spaces as-is"
            ),
        }
    }

    if record.name.is_empty() {
        record.name = display_name_from_stem(file_stem);
    }

    record.body = escape_body(&body);
    record
}

/// `basic_ability` -> `Basic Ability`.
pub fn display_name_from_stem(stem: &str) -> String {
    title_case(&stem.replace('_', " "))
}

// A letter is uppercased when it starts a run of letters and lowercased
// otherwise, so `2d_body` becomes `2D Body`.
fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_word = false;

    for c in input.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}

fn normalize_line_endings(source: &str) -> Cow<'_, str> {
    if source.contains('\r') {
        Cow::Owned(source.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(source)
    }
}
