//! Askama template for the generated C++ header.

use askama::Template;

/// Separator between struct-literal entries inside the array initializer.
pub const ENTRY_SEPARATOR: &str = "\n\t";

pub const DEFAULT_STRUCT_NAME: &str = "AbilitySystemScriptTemplate";
pub const DEFAULT_ARRAY_NAME: &str = "ABILITY_SYSTEM_TEMPLATES";
pub const DEFAULT_SIZE_CONSTANT: &str = "ABILITY_SYSTEM_TEMPLATES_ARRAY_SIZE";
pub const DEFAULT_INCLUDES: [&str; 2] = ["core/object/object.h", "core/object/script_language.h"];

/// Names of the declarations emitted into the generated header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLayout {
    /// Record struct (`inherit`, `name`, `description`, `content`).
    pub struct_name: String,
    /// Static array holding one entry per template.
    pub array_name: String,
    /// `inline constexpr int` holding the entry count.
    pub size_constant: String,
    /// Headers included before the struct declaration.
    pub includes: Vec<String>,
}

impl Default for ArtifactLayout {
    fn default() -> Self {
        Self {
            struct_name: DEFAULT_STRUCT_NAME.to_string(),
            array_name: DEFAULT_ARRAY_NAME.to_string(),
            size_constant: DEFAULT_SIZE_CONSTANT.to_string(),
            includes: DEFAULT_INCLUDES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Template, Debug)]
#[template(path = "codegen/script_templates.gen.h", escape = "none")]
struct ScriptTemplatesHeader<'a> {
    layout: &'a ArtifactLayout,
    count: usize,
    entries: String,
}

/// Render the header. Output always ends with exactly one newline.
pub(super) fn render(entries: &[String], layout: &ArtifactLayout) -> Result<String, askama::Error> {
    let header = ScriptTemplatesHeader {
        layout,
        count: entries.len(),
        entries: entries.join(ENTRY_SEPARATOR),
    };

    let mut rendered = header.render()?;
    let content_len = rendered.trim_end().len();
    rendered.truncate(content_len);
    rendered.push('\n');
    Ok(rendered)
}
