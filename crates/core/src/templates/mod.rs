//! Template preparation, rendering, and the on-disk template library.

pub mod discovery;
pub mod engine;
pub mod repository;

pub use discovery::{TemplateDiscoveryError, TemplateInfo, discover_templates};
pub use engine::{prepare_text, render};
pub use repository::{LoadedTemplate, TemplateRepoError, TemplateRepository};
