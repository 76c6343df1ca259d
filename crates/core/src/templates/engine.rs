//! Text preparation and rendering.
//!
//! Rendering happens in two passes. [`prepare_text`] rewrites every raw
//! occurrence (`{{date:due+1w}}`) to its sanitized key
//! (`{{due_offset_forward_1w}}`), re-emitting the `#` sigil for list
//! variables so their placeholders still open sections. [`render`] then
//! substitutes from the table.
//!
//! The renderer is a deliberately small logic-less dialect:
//!
//! - `{{key}}` interpolates; booleans print as `true`/`false`, lists join
//!   with `", "`.
//! - `{{#name}}...{{/name}}` iterates a list (each item visible as `{{.}}`),
//!   gates on a boolean, and renders once for non-empty text.
//! - `{{^name}}...{{/name}}` renders when the value is missing, `false`,
//!   empty text, or an empty list.
//! - Tags with no table entry are kept verbatim, including their braces.
//!
//! No partials, no escaping, no dotted paths.

use crate::reconcile::{SubstitutionTable, TagValue};
use crate::vars::Variables;

/// Rewrite each raw placeholder to its sanitized key form.
///
/// Type tags, `?` markers, and offset suffixes disappear; the list sigil
/// stays. Text with no variables comes back unchanged.
#[must_use]
pub fn prepare_text(text: &str, vars: &Variables) -> String {
    let mut out = text.to_string();
    for var in vars {
        for occ in &var.occurrences {
            let replacement = match occ.modifier {
                Some(m) => format!("{{{{{}{}}}}}", m.sigil(), occ.key),
                None => format!("{{{{{}}}}}", occ.key),
            };
            out = out.replace(&occ.raw, &replacement);
        }
    }
    out
}

/// Substitute table values into prepared text.
#[must_use]
pub fn render(template: &str, table: &SubstitutionTable) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        let Some(rel) = rest[open + 2..].find("}}") else { break };
        let close = open + 2 + rel;

        out.push_str(&rest[..open]);
        let tag = &rest[open + 2..close];
        let span = &rest[open..close + 2];
        let after = &rest[close + 2..];

        if let Some(name) = tag.strip_prefix('#') {
            match split_section(after, name) {
                Some((inner, remainder)) => {
                    render_section(&mut out, name, inner, table);
                    rest = remainder;
                }
                None => {
                    // Opener without a closer stays in the output.
                    out.push_str(span);
                    rest = after;
                }
            }
        } else if let Some(name) = tag.strip_prefix('^') {
            match split_section(after, name) {
                Some((inner, remainder)) => {
                    if is_falsy(table.get(name)) {
                        out.push_str(&render(inner, table));
                    }
                    rest = remainder;
                }
                None => {
                    out.push_str(span);
                    rest = after;
                }
            }
        } else {
            match table.get(tag) {
                Some(value) => out.push_str(&interpolate(value)),
                None => out.push_str(span),
            }
            rest = after;
        }
    }

    out.push_str(rest);
    out
}

/// Split `rest` at the closer matching `name`, skipping nested sections of
/// the same name. Returns the inner text and everything after the closer.
fn split_section<'a>(rest: &'a str, name: &str) -> Option<(&'a str, &'a str)> {
    let opener_list = format!("{{{{#{name}}}}}");
    let opener_inverted = format!("{{{{^{name}}}}}");
    let closer = format!("{{{{/{name}}}}}");

    let mut depth = 0usize;
    let mut pos = 0;

    while let Some(rel) = rest[pos..].find("{{") {
        let at = pos + rel;
        let tail = &rest[at..];

        if tail.starts_with(&closer) {
            if depth == 0 {
                return Some((&rest[..at], &rest[at + closer.len()..]));
            }
            depth -= 1;
            pos = at + closer.len();
        } else if tail.starts_with(&opener_list) || tail.starts_with(&opener_inverted) {
            depth += 1;
            pos = at + opener_list.len();
        } else {
            pos = at + 2;
        }
    }

    None
}

fn render_section(out: &mut String, name: &str, inner: &str, table: &SubstitutionTable) {
    match table.get(name) {
        Some(TagValue::List(items)) => {
            for item in items {
                let mut scoped = table.clone();
                scoped.insert(".".to_string(), TagValue::Text(item.clone()));
                out.push_str(&render(inner, &scoped));
            }
        }
        Some(TagValue::Bool(true)) => out.push_str(&render(inner, table)),
        Some(TagValue::Text(text)) if !text.is_empty() => {
            let mut scoped = table.clone();
            scoped.insert(".".to_string(), TagValue::Text(text.clone()));
            out.push_str(&render(inner, &scoped));
        }
        // false, empty text, empty list, or no entry: the section collapses.
        _ => {}
    }
}

fn is_falsy(value: Option<&TagValue>) -> bool {
    match value {
        None => true,
        Some(TagValue::Bool(b)) => !b,
        Some(TagValue::Text(t)) => t.is_empty(),
        Some(TagValue::List(items)) => items.is_empty(),
    }
}

fn interpolate(value: &TagValue) -> String {
    match value {
        TagValue::Text(t) => t.clone(),
        TagValue::Bool(b) => b.to_string(),
        TagValue::List(items) => items.join(", "),
    }
}
