//! Placeholder scanner.
//!
//! Walks the text for `{{...}}` spans and parses each one as
//! `[type:][modifier]name[?][offset]`. Spans that do not conform (interior
//! whitespace, empty name, section closers like `{{/tags}}`) are left for the
//! renderer to deal with and are not variables. A suffix that starts with `+`
//! or `-` but does not scan as an offset is an error rather than a skip, so
//! typos like `{{due+1q}}` surface immediately.

use thiserror::Error;

use super::datemath::{Offset, OffsetParseError, offset_key_token, parse_offset};
use super::types::{Modifier, Occurrence, VarType, Variables};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error(transparent)]
    Offset(#[from] OffsetParseError),

    #[error("offset '{offset}' on '{name}' needs a date; declare it as {{{{date:{name}}}}}")]
    OffsetRequiresDate { name: String, offset: String },
}

/// Scan `text` and collect every variable occurrence.
///
/// Offsets are only meaningful on date variables. The check runs after the
/// whole text is scanned, so a bare `{{due+1d}}` is fine as long as some
/// other occurrence declares `{{date:due}}`.
pub fn extract_variables(text: &str) -> Result<Variables, ExtractError> {
    let mut vars = Variables::default();
    let mut cursor = 0;

    while let Some(rel) = text[cursor..].find("{{") {
        let open = cursor + rel;
        let Some(rel) = text[open + 2..].find("}}") else { break };
        let close = open + 2 + rel;
        let expr = &text[open + 2..close];

        match parse_expr(expr)? {
            Some(parsed) => {
                let key = match parsed.key_suffix {
                    Some(ref suffix) => format!("{}{suffix}", parsed.name),
                    None => parsed.name.clone(),
                };
                vars.record(Occurrence {
                    raw: text[open..close + 2].to_string(),
                    expr: expr.to_string(),
                    declared: parsed.declared,
                    modifier: parsed.modifier,
                    name: parsed.name,
                    offset: parsed.offset,
                    key,
                });
                cursor = close + 2;
            }
            // Not a variable. Step past the first brace only, an opener
            // may still start inside this span.
            None => cursor = open + 1,
        }
    }

    ensure_offsets_are_dates(&vars)?;
    Ok(vars)
}

struct ParsedExpr {
    declared: Option<VarType>,
    modifier: Option<Modifier>,
    name: String,
    offset: Option<Offset>,
    /// Key fragment spelled from the raw offset text, so `+03d` and `+3d`
    /// stay distinct keys.
    key_suffix: Option<String>,
}

/// Parse the contents of one `{{...}}` span. `Ok(None)` means the span is
/// not a variable at all; `Err` means it tried to be one and failed.
fn parse_expr(expr: &str) -> Result<Option<ParsedExpr>, ExtractError> {
    let (declared, rest) = if let Some(r) = expr.strip_prefix("date:") {
        (Some(VarType::Date), r)
    } else if let Some(r) = expr.strip_prefix("bool:") {
        (Some(VarType::Bool), r)
    } else {
        (None, expr)
    };

    let (modifier, rest) = match rest.strip_prefix('#') {
        Some(r) => (Some(Modifier::List), r),
        None => (None, rest),
    };

    let name_len = rest.find(|c: char| !is_word(c)).unwrap_or(rest.len());
    if name_len == 0 {
        return Ok(None);
    }
    let (name, rest) = rest.split_at(name_len);

    // A trailing '?' is tolerated and carries no meaning.
    let rest = rest.strip_prefix('?').unwrap_or(rest);

    let (offset, key_suffix) = if rest.is_empty() {
        (None, None)
    } else if rest.starts_with(['+', '-']) {
        (Some(parse_offset(rest)?), Some(offset_key_token(rest)))
    } else {
        return Ok(None);
    };

    Ok(Some(ParsedExpr { declared, modifier, name: name.to_string(), offset, key_suffix }))
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn ensure_offsets_are_dates(vars: &Variables) -> Result<(), ExtractError> {
    for var in vars {
        if var.ty() == VarType::Date {
            continue;
        }
        if let Some(off) = var.occurrences.iter().find_map(|o| o.offset) {
            return Err(ExtractError::OffsetRequiresDate {
                name: var.name.clone(),
                offset: off.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_placeholders_yields_empty() {
        let vars = extract_variables("plain text, no braces").unwrap();
        assert!(vars.is_empty());
    }

    #[test]
    fn test_plain_variable() {
        let vars = extract_variables("Hello {{name}}!").unwrap();
        assert_eq!(vars.len(), 1);
        let var = vars.get("name").unwrap();
        assert_eq!(var.ty(), VarType::Text);
        assert_eq!(var.occurrences[0].raw, "{{name}}");
        assert_eq!(var.occurrences[0].key, "name");
    }

    #[test]
    fn test_typed_variables() {
        let vars = extract_variables("{{date:due}} {{bool:urgent}}").unwrap();
        assert_eq!(vars.get("due").unwrap().ty(), VarType::Date);
        assert_eq!(vars.get("urgent").unwrap().ty(), VarType::Bool);
    }

    #[test]
    fn test_list_modifier() {
        let vars = extract_variables("{{#tags}}").unwrap();
        let var = vars.get("tags").unwrap();
        assert!(var.wants_list());
        assert_eq!(var.occurrences[0].key, "tags");
    }

    #[test]
    fn test_modifier_after_type_tag() {
        let vars = extract_variables("{{bool:#flags}}").unwrap();
        let var = vars.get("flags").unwrap();
        assert_eq!(var.ty(), VarType::Bool);
        assert!(var.wants_list());
    }

    #[test]
    fn test_offset_key_shape() {
        let vars = extract_variables("{{date:due+1w}} {{date:due-3d}}").unwrap();
        let var = vars.get("due").unwrap();
        assert_eq!(var.occurrences.len(), 2);
        assert_eq!(var.occurrences[0].key, "due_offset_forward_1w");
        assert_eq!(var.occurrences[1].key, "due_offset_backwards_3d");
    }

    #[test]
    fn test_keys_preserve_offset_spelling() {
        let vars = extract_variables("{{date:due+3d}} {{due+03d}} {{due-0d}}").unwrap();
        let var = vars.get("due").unwrap();
        let keys: Vec<&str> = var.occurrences.iter().map(|o| o.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["due_offset_forward_3d", "due_offset_forward_03d", "due_offset_backwards_0d"]
        );
    }

    #[test]
    fn test_repeated_extraction_is_stable() {
        let text = "{{date:due+1w}} {{#tags}} {{due-2d}}";
        let first = extract_variables(text).unwrap();
        let second = extract_variables(text).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_occurrences_fold_into_one_variable() {
        let vars = extract_variables("{{x}} and {{x}} and {{x}}").unwrap();
        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get("x").unwrap().occurrences.len(), 3);
    }

    #[test]
    fn test_first_type_declaration_wins() {
        // An untyped occurrence first, then a tag: the tag still lands.
        let vars = extract_variables("{{x}} {{date:x}}").unwrap();
        assert_eq!(vars.get("x").unwrap().ty(), VarType::Date);

        // With two tags the first one wins.
        let vars = extract_variables("{{bool:x}} {{date:x}}").unwrap();
        assert_eq!(vars.get("x").unwrap().ty(), VarType::Bool);
    }

    #[test]
    fn test_question_mark_is_tolerated() {
        let vars = extract_variables("{{name?}} {{date:due?+1d}}").unwrap();
        assert_eq!(vars.get("name").unwrap().occurrences[0].key, "name");
        assert_eq!(
            vars.get("due").unwrap().occurrences[0].key,
            "due_offset_forward_1d"
        );
    }

    #[test]
    fn test_section_closers_are_not_variables() {
        let vars = extract_variables("{{#tags}}{{.}}{{/tags}} {{^tags}}none{{/tags}}")
            .unwrap();
        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get("tags").unwrap().occurrences.len(), 1);
    }

    #[test]
    fn test_whitespace_inside_braces_is_not_a_variable() {
        let vars = extract_variables("{{ name }} {{na me}}").unwrap();
        assert!(vars.is_empty());
    }

    #[test]
    fn test_empty_and_malformed_spans_pass() {
        let vars = extract_variables("{{}} {{date:}} {{#}} {{!}}").unwrap();
        assert!(vars.is_empty());
    }

    #[test]
    fn test_unclosed_braces_ignored() {
        let vars = extract_variables("{{name").unwrap();
        assert!(vars.is_empty());
    }

    #[test]
    fn test_brace_noise_around_variable() {
        let vars = extract_variables("{{{x}}}").unwrap();
        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get("x").unwrap().occurrences[0].raw, "{{x}}");
    }

    #[test]
    fn test_malformed_offset_is_an_error() {
        let err = extract_variables("{{date:due+1q}}").unwrap_err();
        assert_eq!(err, ExtractError::Offset(OffsetParseError::Malformed("+1q".into())));

        // Same for a missing unit
        assert!(extract_variables("{{date:due-3}}").is_err());
    }

    #[test]
    fn test_oversized_offset_fails_extraction() {
        let err = extract_variables("{{date:due}} {{due+100000000d}}").unwrap_err();
        assert_eq!(err, ExtractError::Offset(OffsetParseError::OutOfRange("+100000000d".into())));
    }

    #[test]
    fn test_offset_on_non_date_is_an_error() {
        let err = extract_variables("{{due+1d}}").unwrap_err();
        assert_eq!(
            err,
            ExtractError::OffsetRequiresDate { name: "due".into(), offset: "+1d".into() }
        );
        assert!(err.to_string().contains("{{date:due}}"));
    }

    #[test]
    fn test_offset_allowed_when_date_declared_elsewhere() {
        // The declaration may come after the offset occurrence.
        let vars = extract_variables("{{due+1d}} {{date:due}}").unwrap();
        assert_eq!(vars.get("due").unwrap().ty(), VarType::Date);
    }

    #[test]
    fn test_offset_on_bool_is_an_error() {
        assert!(extract_variables("{{bool:flag}} {{flag+1d}}").is_err());
    }

    #[test]
    fn test_names_are_ascii_word_characters() {
        let vars = extract_variables("{{a_b2}} {{weird.name}} {{héllo}}").unwrap();
        assert_eq!(vars.len(), 1);
        assert!(vars.get("a_b2").is_some());
    }

    #[test]
    fn test_hyphenated_span_reads_as_bad_offset() {
        // A '-' right after the name starts an offset, so this fails loudly
        // instead of silently passing through.
        let err = extract_variables("{{kebab-case}}").unwrap_err();
        assert_eq!(
            err,
            ExtractError::Offset(OffsetParseError::Malformed("-case".into()))
        );
    }
}
