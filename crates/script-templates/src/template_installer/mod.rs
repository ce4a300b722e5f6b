//! Installs parsed templates into an editor script templates directory.
//!
//! This is the consumer side of the generated table: every record becomes
//! `<target>/<inherits>/<snake_case(name)>.<ext>` with its `meta-` header
//! restored and `_TS_` placeholders turned back into tabs. Files that already
//! exist are left alone so local edits survive reinstalls.

use std::io::Write;
use std::path::{Path, PathBuf};

use heck::ToSnakeCase;

use crate::template_generator::temp_file_in;
use crate::template_parser::{unescape_content, TemplateRecord};

/// Marker that identifies C# template content.
pub const CSHARP_MARKER: &str = "using _BINDINGS_NAMESPACE_;";

/// Script language of an installed template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptLanguage {
    GdScript,
    CSharp,
}

impl ScriptLanguage {
    /// Detect the language from template content.
    pub fn detect(content: &str) -> Self {
        if content.contains(CSHARP_MARKER) {
            ScriptLanguage::CSharp
        } else {
            ScriptLanguage::GdScript
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ScriptLanguage::GdScript => "gd",
            ScriptLanguage::CSharp => "cs",
        }
    }

    /// Line-comment delimiter used for the meta header.
    pub fn delimiter(self) -> &'static str {
        match self {
            ScriptLanguage::GdScript => "#",
            ScriptLanguage::CSharp => "//",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error("failed to create template directory '{}': {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write template '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Outcome of an install run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// Newly written template files.
    pub written: Vec<PathBuf>,
    /// Files that already existed and were left untouched.
    pub skipped: Vec<PathBuf>,
}

/// A template ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledTemplate {
    /// Path relative to the install target.
    pub relative_path: PathBuf,
    pub language: ScriptLanguage,
    pub contents: String,
}

impl InstalledTemplate {
    pub fn from_record(record: &TemplateRecord) -> Self {
        let content = unescape_content(&record.body);
        let language = ScriptLanguage::detect(&content);
        let delimiter = language.delimiter();

        let file_name = format!("{}.{}", record.name.to_snake_case(), language.extension());
        let relative_path = Path::new(&record.inherits).join(file_name);

        let contents = format!(
            "{delimiter} meta-name: {name}\n{delimiter} meta-description: {description}\n\n{content}",
            name = record.name,
            description = record.description,
        );

        Self {
            relative_path,
            language,
            contents,
        }
    }
}

/// Write every record under `target_dir`, never overwriting existing files.
pub fn install_templates(
    records: &[TemplateRecord],
    target_dir: &Path,
) -> Result<InstallReport, InstallError> {
    let mut report = InstallReport::default();

    for record in records {
        let template = InstalledTemplate::from_record(record);
        let path = target_dir.join(&template.relative_path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| InstallError::CreateDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        // Content is staged beside the destination and linked into place only
        // once complete, so a failed write never leaves a partial template
        // that later runs would mistake for an installed one.
        let dir = path.parent().unwrap_or(target_dir);
        let write_err = |source: std::io::Error| InstallError::Write {
            path: path.clone(),
            source,
        };
        let mut tmp = temp_file_in(dir).map_err(write_err)?;
        tmp.write_all(template.contents.as_bytes())
            .map_err(write_err)?;

        match tmp.persist_noclobber(&path) {
            Ok(_) => {}
            Err(e) if e.error.kind() == std::io::ErrorKind::AlreadyExists => {
                tracing::debug!(path = %path.display(), "Template already installed, skipping");
                report.skipped.push(path);
                continue;
            }
            Err(e) => return Err(write_err(e.error)),
        }

        tracing::debug!(path = %path.display(), "Installed script template");
        report.written.push(path);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template_parser::parse_template_str;
    use std::fs;

    fn csharp_record() -> TemplateRecord {
        parse_template_str(
            "CharacterBody2D",
            "advanced_abilities",
            "// meta-description: Advanced controller\nusing _BINDINGS_NAMESPACE_;\n\npublic partial class _CLASS_ : _BASE_\n{\n    private string _name = \"Player\";\n}\n",
            "//",
        )
    }

    fn gdscript_record() -> TemplateRecord {
        parse_template_str(
            "abilities",
            "fireball",
            "# meta-name: Fireball\n# meta-description: A ranged attack\nextends GameplayAbility\n\nfunc activate():\n\tpass\n",
            "#",
        )
    }

    #[test]
    fn test_language_detection() {
        assert_eq!(
            ScriptLanguage::detect("using _BINDINGS_NAMESPACE_;\n"),
            ScriptLanguage::CSharp
        );
        assert_eq!(ScriptLanguage::detect("extends Node\n"), ScriptLanguage::GdScript);
    }

    #[test]
    fn test_installed_csharp_template() {
        let installed = InstalledTemplate::from_record(&csharp_record());
        assert_eq!(
            installed.relative_path,
            PathBuf::from("CharacterBody2D/advanced_abilities.cs")
        );
        assert_eq!(
            installed.contents,
            "// meta-name: Advanced Abilities\n\
             // meta-description: Advanced controller\n\
             \n\
             using _BINDINGS_NAMESPACE_;\n\
             \n\
             public partial class _CLASS_ : _BASE_\n\
             {\n\
             \tprivate string _name = \"Player\";\n\
             }\n"
        );
    }

    #[test]
    fn test_installed_gdscript_template() {
        let installed = InstalledTemplate::from_record(&gdscript_record());
        assert_eq!(installed.relative_path, PathBuf::from("abilities/fireball.gd"));
        assert_eq!(installed.language, ScriptLanguage::GdScript);
        assert!(installed
            .contents
            .starts_with("# meta-name: Fireball\n# meta-description: A ranged attack\n\n"));
        assert!(installed.contents.ends_with("func activate():\n\tpass\n"));
    }

    #[test]
    fn test_install_writes_then_skips() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![gdscript_record(), csharp_record()];

        let first = install_templates(&records, dir.path()).unwrap();
        assert_eq!(first.written.len(), 2);
        assert!(first.skipped.is_empty());
        assert!(dir.path().join("abilities/fireball.gd").is_file());
        assert!(dir
            .path()
            .join("CharacterBody2D/advanced_abilities.cs")
            .is_file());

        let second = install_templates(&records, dir.path()).unwrap();
        assert!(second.written.is_empty());
        assert_eq!(second.skipped.len(), 2);
    }

    #[test]
    fn test_install_preserves_user_edits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abilities/fireball.gd");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "# my edits\n").unwrap();

        let report = install_templates(&[gdscript_record()], dir.path()).unwrap();
        assert_eq!(report.skipped, vec![path.clone()]);
        assert_eq!(fs::read_to_string(&path).unwrap(), "# my edits\n");
    }

    #[test]
    fn test_install_leaves_no_staging_files() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![gdscript_record()];
        install_templates(&records, dir.path()).unwrap();
        install_templates(&records, dir.path()).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path().join("abilities"))
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("fireball.gd")]);
    }

    #[test]
    fn test_removed_template_is_reinstalled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abilities/fireball.gd");
        install_templates(&[gdscript_record()], dir.path()).unwrap();
        fs::remove_file(&path).unwrap();

        let report = install_templates(&[gdscript_record()], dir.path()).unwrap();
        assert_eq!(report.written, vec![path.clone()]);
        assert!(fs::read_to_string(&path)
            .unwrap()
            .starts_with("# meta-name: Fireball\n"));
    }

    #[cfg(unix)]
    #[test]
    fn test_installed_template_gets_default_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain.gd");
        fs::write(&plain, "x").unwrap();
        install_templates(&[gdscript_record()], dir.path()).unwrap();

        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&dir.path().join("abilities/fireball.gd")), mode(&plain));
    }

    #[test]
    fn test_install_into_unwritable_target() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("abilities");
        fs::write(&blocker, "not a directory").unwrap();

        let result = install_templates(&[gdscript_record()], dir.path());
        assert!(matches!(result, Err(InstallError::CreateDir { .. })));
    }
}
