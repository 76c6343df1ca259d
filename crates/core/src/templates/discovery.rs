use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

/// A template file found under the templates directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateInfo {
    /// Relative path with the extension stripped, `/`-separated.
    pub logical_name: String,
    pub path: PathBuf,
}

#[derive(Debug, Error)]
pub enum TemplateDiscoveryError {
    #[error("templates directory does not exist: {0}")]
    MissingDir(String),

    #[error("failed to read templates directory {0}: {1}")]
    WalkError(String, #[source] walkdir::Error),
}

/// Walk `root` and list every template file, sorted by logical name.
pub fn discover_templates(
    root: &Path,
) -> Result<Vec<TemplateInfo>, TemplateDiscoveryError> {
    if !root.is_dir() {
        return Err(TemplateDiscoveryError::MissingDir(root.display().to_string()));
    }

    let mut templates = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry
            .map_err(|e| TemplateDiscoveryError::WalkError(root.display().to_string(), e))?;
        if !entry.file_type().is_file() || !is_template_file(entry.path()) {
            continue;
        }
        let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
        templates.push(TemplateInfo {
            logical_name: logical_name_from_relative(rel),
            path: entry.path().to_path_buf(),
        });
    }

    templates.sort_by(|a, b| a.logical_name.cmp(&b.logical_name));
    Ok(templates)
}

fn is_template_file(path: &Path) -> bool {
    matches!(path.extension().and_then(|e| e.to_str()), Some("md" | "txt"))
}

fn logical_name_from_relative(rel: &Path) -> String {
    rel.with_extension("")
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
