//! Template file discovery.
//!
//! Templates live one directory below the templates root, grouped by the type
//! they extend:
//!
//! ```text
//! script_templates/
//! ├── CharacterBody2D/advanced_abilities.cs
//! └── CharacterBody3D/advanced_abilities.cs
//! ```
//!
//! Files placed directly in the root have no inherits label and are skipped.

use std::path::{Path, PathBuf};

/// Extensions picked up when no explicit list is configured.
pub const DEFAULT_TEMPLATE_EXTENSIONS: [&str; 2] = ["cs", "gd"];

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("failed to read templates directory '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Find template files under `root`, sorted by path so the generated table
/// order is stable between builds.
///
/// Any directory or entry that cannot be read is an error: a silently skipped
/// type directory would shrink the table without failing the build.
pub fn discover_template_files<S: AsRef<str>>(
    root: &Path,
    extensions: &[S],
) -> Result<Vec<PathBuf>, DiscoveryError> {
    let mut found = Vec::new();

    for subdir in read_entries(root)? {
        if !subdir.is_dir() {
            tracing::debug!(path = %subdir.display(), "Skipping file outside a type directory");
            continue;
        }
        found.extend(
            read_entries(&subdir)?
                .into_iter()
                .filter(|path| path.is_file() && has_template_extension(path, extensions)),
        );
    }

    found.sort();
    tracing::debug!(root = %root.display(), count = found.len(), "Discovered script templates");
    Ok(found)
}

fn read_entries(dir: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    let io_err = |source: std::io::Error| DiscoveryError::Io {
        path: dir.to_path_buf(),
        source,
    };
    std::fs::read_dir(dir)
        .map_err(io_err)?
        .map(|entry| entry.map(|e| e.path()).map_err(io_err))
        .collect()
}

fn has_template_extension<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.as_ref() == ext))
}
