//! Variable metadata collected from template text.
//!
//! Placeholders look like `{{[type:][modifier]name[?][offset]}}`:
//!
//! - `{{title}}`: plain text variable
//! - `{{date:due}}`: date variable
//! - `{{date:due+1w}}`: same variable, shifted a week forward
//! - `{{bool:urgent}}`: boolean variable
//! - `{{#tags}}`: answer may be a comma-separated list; the placeholder
//!   doubles as a section opener for the renderer
//!
//! Every occurrence of the same name folds into one [`Variable`]. The first
//! type tag and the first modifier seen win; later conflicting declarations
//! are ignored rather than rejected.

use serde::Serialize;

use super::datemath::Offset;

/// Resolved type of a variable. Untyped placeholders are plain text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VarType {
    #[default]
    Text,
    Date,
    Bool,
}

impl VarType {
    /// The `type:` tag spelling, or `None` for plain text.
    #[must_use]
    pub fn tag(self) -> Option<&'static str> {
        match self {
            VarType::Text => None,
            VarType::Date => Some("date"),
            VarType::Bool => Some("bool"),
        }
    }
}

/// Marker ahead of the name. `#` declares that the answer may hold a
/// comma-separated list and opens a section over it in the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    List,
}

impl Modifier {
    /// The character as written in the placeholder.
    #[must_use]
    pub fn sigil(self) -> char {
        match self {
            Modifier::List => '#',
        }
    }
}

/// One concrete appearance of a placeholder in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    /// Exact matched substring, braces included. Used for the literal
    /// rewrite before rendering.
    pub raw: String,
    /// The expression between the braces.
    pub expr: String,
    /// Type tag written on this occurrence, if any.
    pub declared: Option<VarType>,
    /// List marker written on this occurrence, if any.
    pub modifier: Option<Modifier>,
    /// Base identifier, shared by all occurrences of the variable.
    pub name: String,
    /// Relative date adjustment requested by this occurrence.
    pub offset: Option<Offset>,
    /// Key this occurrence resolves through in the substitution table.
    /// Equals `name` unless an offset is present.
    pub key: String,
}

/// All occurrences sharing one name, plus the merged type and modifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    /// First non-absent type tag seen across occurrences.
    pub declared: Option<VarType>,
    /// First modifier seen across occurrences.
    pub modifier: Option<Modifier>,
    /// In order of appearance in the text.
    pub occurrences: Vec<Occurrence>,
}

impl Variable {
    fn new(name: String) -> Self {
        Self { name, declared: None, modifier: None, occurrences: Vec::new() }
    }

    /// Resolved type: the first declared tag, or plain text.
    #[must_use]
    pub fn ty(&self) -> VarType {
        self.declared.unwrap_or_default()
    }

    /// Whether answers should be split on commas.
    #[must_use]
    pub fn wants_list(&self) -> bool {
        matches!(self.modifier, Some(Modifier::List))
    }

    /// Occurrences that request a shifted date.
    pub fn offset_occurrences(&self) -> impl Iterator<Item = &Occurrence> {
        self.occurrences.iter().filter(|o| o.offset.is_some())
    }
}

/// Variables in order of first appearance in the text.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Variables {
    items: Vec<Variable>,
}

impl Variables {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct variable names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.items.iter().find(|v| v.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Variable> {
        self.items.iter()
    }

    /// Fold one occurrence into the collection, creating the variable on
    /// first sight and applying first-write-wins for type and modifier.
    pub(crate) fn record(&mut self, occ: Occurrence) {
        let idx = match self.items.iter().position(|v| v.name == occ.name) {
            Some(i) => i,
            None => {
                self.items.push(Variable::new(occ.name.clone()));
                self.items.len() - 1
            }
        };
        let var = &mut self.items[idx];
        if var.declared.is_none() {
            var.declared = occ.declared;
        }
        if var.modifier.is_none() {
            var.modifier = occ.modifier;
        }
        var.occurrences.push(occ);
    }
}

impl<'a> IntoIterator for &'a Variables {
    type Item = &'a Variable;
    type IntoIter = std::slice::Iter<'a, Variable>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
