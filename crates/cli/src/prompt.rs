//! Collecting answers for a template's fields.
//!
//! Values arrive three ways: `--var` pairs, an answers file, or an
//! interactive prompt per field. Prompting is skipped whenever stdin is not
//! a terminal, and `--batch` turns it off outright; a missing value is then
//! an error instead of a question.

use std::collections::HashMap;
use std::io::{self, IsTerminal};

use chrono::NaiveDate;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};
use fillin_core::{Answer, AnswerSource, FieldKind, FieldSpec, FormOutcome};

/// Error raised while collecting values.
#[derive(Debug)]
pub enum PromptError {
    /// No value for a variable and prompting is off.
    MissingValue(String),
    /// A supplied value does not parse as the kind the template declares.
    BadValue { name: String, value: String, wanted: &'static str },
    /// IO error during prompting.
    Io(io::Error),
}

impl std::fmt::Display for PromptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PromptError::MissingValue(name) => {
                write!(
                    f,
                    "missing value for variable: {name}\n  Hint: pass --var {name}=\"...\" or drop --batch"
                )
            }
            PromptError::BadValue { name, value, wanted } => {
                write!(f, "bad value for {name}: {value:?} (expected {wanted})")
            }
            PromptError::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for PromptError {}

impl From<PromptError> for io::Error {
    fn from(e: PromptError) -> Self {
        match e {
            PromptError::Io(io_err) => io_err,
            other => io::Error::other(other.to_string()),
        }
    }
}

/// Answer source backed by pre-supplied values and the terminal.
pub struct CliAnswerSource {
    provided: HashMap<String, String>,
    batch_mode: bool,
}

impl CliAnswerSource {
    pub fn new(provided: HashMap<String, String>, batch_mode: bool) -> Self {
        Self { provided, batch_mode }
    }
}

impl AnswerSource for CliAnswerSource {
    fn collect(&mut self, fields: &[FieldSpec]) -> io::Result<FormOutcome> {
        let interactive = io::stdin().is_terminal() && !self.batch_mode;
        let mut answers = HashMap::new();

        for field in fields {
            let answer = if let Some(raw) = self.provided.get(&field.name) {
                parse_provided(&field.name, &field.kind, raw)?
            } else if interactive {
                match prompt_for(field)? {
                    Some(answer) => answer,
                    // One canceled prompt abandons the whole form.
                    None => return Ok(FormOutcome::Canceled),
                }
            } else {
                return Err(PromptError::MissingValue(field.name.clone()).into());
            };
            answers.insert(field.name.clone(), answer);
        }

        Ok(FormOutcome::Submitted(answers))
    }
}

/// Parse a value supplied via `--var` or an answers file.
fn parse_provided(
    name: &str,
    kind: &FieldKind,
    raw: &str,
) -> Result<Answer, PromptError> {
    match kind {
        FieldKind::Date { .. } => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map(Answer::Date)
            .map_err(|_| PromptError::BadValue {
                name: name.to_string(),
                value: raw.to_string(),
                wanted: "a date like 2021-06-01",
            }),
        FieldKind::Bool { .. } => match raw.trim().to_lowercase().as_str() {
            "true" | "yes" | "y" | "1" => Ok(Answer::Bool(true)),
            "false" | "no" | "n" | "0" => Ok(Answer::Bool(false)),
            _ => Err(PromptError::BadValue {
                name: name.to_string(),
                value: raw.to_string(),
                wanted: "true/false",
            }),
        },
        FieldKind::Text { .. } => Ok(Answer::Text(raw.to_string())),
    }
}

/// Prompt for one field. `None` means the user canceled.
fn prompt_for(field: &FieldSpec) -> Result<Option<Answer>, PromptError> {
    let theme = ColorfulTheme::default();

    let result = match &field.kind {
        FieldKind::Date { default } => Input::<NaiveDate>::with_theme(&theme)
            .with_prompt(&field.name)
            .default(*default)
            .interact_text()
            .map(Answer::Date),
        FieldKind::Bool { default } => Confirm::with_theme(&theme)
            .with_prompt(&field.name)
            .default(*default)
            .interact()
            .map(Answer::Bool),
        FieldKind::Text { .. } => Input::<String>::with_theme(&theme)
            .with_prompt(&field.name)
            .allow_empty(true)
            .interact_text()
            .map(Answer::Text),
    };

    match result {
        Ok(answer) => Ok(Some(answer)),
        Err(dialoguer::Error::IO(e)) if is_cancel(&e) => Ok(None),
        Err(dialoguer::Error::IO(e)) => Err(PromptError::Io(e)),
    }
}

fn is_cancel(e: &io::Error) -> bool {
    matches!(e.kind(), io::ErrorKind::UnexpectedEof | io::ErrorKind::Interrupted)
}

/// Parse repeated `--var NAME=VALUE` arguments. Entries without `=` are
/// dropped.
pub fn parse_var_args(args: &[String]) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for arg in args {
        if let Some((key, value)) = arg.split_once('=') {
            map.insert(key.to_string(), value.to_string());
        }
    }
    map
}
