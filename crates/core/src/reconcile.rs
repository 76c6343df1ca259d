//! Turning collected answers into a substitution table.
//!
//! Answers stay typed all the way here. A date answer lands once under the
//! variable name and once more under every offset key, already shifted and
//! formatted. A text answer with commas splits into a list when the variable
//! carries the `#` modifier, otherwise commas are just text.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::vars::{Variables, apply_offset, short_date};

/// A typed answer for one variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Date(NaiveDate),
    Bool(bool),
    Text(String),
}

/// A value the renderer can interpolate or open a section over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValue {
    Text(String),
    Bool(bool),
    List(Vec<String>),
}

/// Substitution keys to renderer values.
pub type SubstitutionTable = HashMap<String, TagValue>;

/// Build the substitution table for `vars` from collected answers.
///
/// Variables without an answer are left out; their placeholders survive
/// rendering untouched. Answers for unknown names are ignored.
#[must_use]
pub fn reconcile(vars: &Variables, answers: &HashMap<String, Answer>) -> SubstitutionTable {
    let mut table = SubstitutionTable::new();

    for var in vars {
        let Some(answer) = answers.get(&var.name) else { continue };

        match answer {
            Answer::Date(date) => {
                table.insert(var.name.clone(), TagValue::Text(short_date(*date)));
                for occ in var.offset_occurrences() {
                    let Some(off) = occ.offset else { continue };
                    let shifted = apply_offset(*date, off);
                    table.insert(occ.key.clone(), TagValue::Text(short_date(shifted)));
                }
            }
            Answer::Bool(flag) => {
                table.insert(var.name.clone(), TagValue::Bool(*flag));
            }
            Answer::Text(text) => {
                let value = if var.wants_list() && text.contains(',') {
                    TagValue::List(text.split(',').map(|s| s.trim().to_string()).collect())
                } else {
                    TagValue::Text(text.clone())
                };
                table.insert(var.name.clone(), value);
            }
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vars::extract_variables;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn answers(pairs: &[(&str, Answer)]) -> HashMap<String, Answer> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), v.clone())).collect()
    }

    #[test]
    fn test_date_fills_base_and_offset_keys() {
        let vars = extract_variables("{{date:due}} {{due+1w}} {{due-2d}}").unwrap();
        let table =
            reconcile(&vars, &answers(&[("due", Answer::Date(date(2021, 6, 1)))]));

        assert_eq!(table["due"], TagValue::Text("2021-06-01".into()));
        assert_eq!(table["due_offset_forward_1w"], TagValue::Text("2021-06-08".into()));
        assert_eq!(table["due_offset_backwards_2d"], TagValue::Text("2021-05-30".into()));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_offset_only_date_still_fills_base_key() {
        let vars = extract_variables("{{date:due+1m}}").unwrap();
        let table =
            reconcile(&vars, &answers(&[("due", Answer::Date(date(2021, 1, 31)))]));

        assert_eq!(table["due"], TagValue::Text("2021-01-31".into()));
        // Month arithmetic clamps to the end of February.
        assert_eq!(table["due_offset_forward_1m"], TagValue::Text("2021-02-28".into()));
    }

    #[test]
    fn test_offset_at_calendar_edge_stays_in_range() {
        let vars = extract_variables("{{date:due}} {{due+1w}}").unwrap();
        let table =
            reconcile(&vars, &answers(&[("due", Answer::Date(NaiveDate::MAX))]));

        // The shift clamps at the calendar's edge instead of overflowing.
        assert_eq!(
            table["due_offset_forward_1w"],
            TagValue::Text(short_date(NaiveDate::MAX))
        );
    }

    #[test]
    fn test_bool_stays_typed() {
        let vars = extract_variables("{{bool:urgent}}").unwrap();
        let table = reconcile(&vars, &answers(&[("urgent", Answer::Bool(true))]));

        assert_eq!(table["urgent"], TagValue::Bool(true));
    }

    #[test]
    fn test_list_splits_on_commas_and_trims() {
        let vars = extract_variables("{{#tags}}").unwrap();
        let table =
            reconcile(&vars, &answers(&[("tags", Answer::Text("a, b ,c".into()))]));

        assert_eq!(
            table["tags"],
            TagValue::List(vec!["a".into(), "b".into(), "c".into()])
        );
    }

    #[test]
    fn test_list_modifier_without_comma_stays_text() {
        let vars = extract_variables("{{#tags}}").unwrap();
        let table = reconcile(&vars, &answers(&[("tags", Answer::Text("solo".into()))]));

        assert_eq!(table["tags"], TagValue::Text("solo".into()));
    }

    #[test]
    fn test_comma_without_modifier_stays_text() {
        let vars = extract_variables("{{duration}}").unwrap();
        let table =
            reconcile(&vars, &answers(&[("duration", Answer::Text("1,5 hours".into()))]));

        assert_eq!(table["duration"], TagValue::Text("1,5 hours".into()));
    }

    #[test]
    fn test_modifier_from_any_occurrence_splits() {
        let vars = extract_variables("{{tags}} {{#tags}}").unwrap();
        let table = reconcile(&vars, &answers(&[("tags", Answer::Text("x,y".into()))]));

        assert_eq!(table["tags"], TagValue::List(vec!["x".into(), "y".into()]));
    }

    #[test]
    fn test_empty_segments_survive_the_split() {
        let vars = extract_variables("{{#tags}}").unwrap();
        let table = reconcile(&vars, &answers(&[("tags", Answer::Text("a,,b,".into()))]));

        assert_eq!(
            table["tags"],
            TagValue::List(vec!["a".into(), String::new(), "b".into(), String::new()])
        );
    }

    #[test]
    fn test_unknown_and_missing_answers_are_skipped() {
        let vars = extract_variables("{{title}}").unwrap();
        let table = reconcile(&vars, &answers(&[("other", Answer::Bool(true))]));

        assert!(table.is_empty());
    }
}
