//! Input field specifications derived from extracted variables.
//!
//! One field per variable, in order of first appearance. The field carries
//! the kind of input to collect and the default the prompt starts from:
//! today for dates, `false` for booleans, empty string for text.

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::vars::{VarType, Variables};

/// What kind of input a variable needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldKind {
    Date { default: NaiveDate },
    Bool { default: bool },
    Text { default: String },
}

/// One input to collect, interactively or from a batch source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(flatten)]
    pub kind: FieldKind,
}

/// Derive the fields to collect for `vars`, seeding date defaults with the
/// current local date.
#[must_use]
pub fn derive_field_specs(vars: &Variables) -> Vec<FieldSpec> {
    derive_field_specs_at(vars, Local::now().date_naive())
}

/// Like [`derive_field_specs`] but with an explicit "today".
#[must_use]
pub fn derive_field_specs_at(vars: &Variables, today: NaiveDate) -> Vec<FieldSpec> {
    vars.iter()
        .map(|var| {
            let kind = match var.ty() {
                VarType::Date => FieldKind::Date { default: today },
                VarType::Bool => FieldKind::Bool { default: false },
                VarType::Text => FieldKind::Text { default: String::new() },
            };
            FieldSpec { name: var.name.clone(), kind }
        })
        .collect()
}
