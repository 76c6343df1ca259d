//! Subcommand implementations.

pub mod completions;
pub mod fill;
pub mod list;
pub mod vars;

use std::fs;
use std::io::Read;
use std::path::Path;

use fillin_core::config::ResolvedConfig;
use fillin_core::templates::{TemplateRepoError, TemplateRepository};

/// Resolve the `<TEMPLATE>` argument to text. `-` reads stdin, an existing
/// file path is read directly, anything else is looked up as a logical name
/// in the configured templates directory.
pub(crate) fn load_template_text(
    cfg: &ResolvedConfig,
    template: &str,
) -> Result<String, String> {
    if template == "-" {
        let mut text = String::new();
        return match std::io::stdin().read_to_string(&mut text) {
            Ok(_) => Ok(text),
            Err(e) => Err(format!("failed to read stdin: {e}")),
        };
    }

    let path = Path::new(template);
    if path.is_file() {
        return fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()));
    }

    let Some(ref dir) = cfg.templates_dir else {
        return Err(format!(
            "'{template}' is not a file and no templates_dir is configured"
        ));
    };

    let repo = TemplateRepository::new(dir).map_err(|e| e.to_string())?;
    match repo.get_by_name(template) {
        Ok(loaded) => Ok(loaded.content),
        Err(TemplateRepoError::NotFound(name)) => {
            let names: Vec<&str> =
                repo.list_all().iter().map(|t| t.logical_name.as_str()).collect();
            if names.is_empty() {
                Err(format!(
                    "template not found: {name}\n(no templates under {})",
                    dir.display()
                ))
            } else {
                Err(format!(
                    "template not found: {name}\navailable: {}",
                    names.join(", ")
                ))
            }
        }
        Err(other) => Err(other.to_string()),
    }
}
