//! End-to-end text processing: extract, collect, reconcile, render.
//!
//! The pipeline is pure apart from the [`AnswerSource`], which is where an
//! interactive prompt (or a batch of pre-supplied answers) plugs in.

use std::collections::HashMap;
use std::io;

use thiserror::Error;
use tracing::debug;

use crate::fields::{FieldSpec, derive_field_specs};
use crate::reconcile::{Answer, reconcile};
use crate::templates::{prepare_text, render};
use crate::vars::{ExtractError, extract_variables};

/// What an [`AnswerSource`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Submitted(HashMap<String, Answer>),
    /// The user declined to submit the form.
    Canceled,
}

/// Supplies answers for derived fields.
pub trait AnswerSource {
    fn collect(&mut self, fields: &[FieldSpec]) -> io::Result<FormOutcome>;
}

/// Result of processing one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    Rendered(String),
    /// Processing was aborted before rendering. Distinct from an empty
    /// result; callers must not write anything out.
    Canceled,
}

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("failed to collect answers: {0}")]
    Collect(#[from] io::Error),
}

/// Run the whole pipeline over `text`.
///
/// Text with zero placeholders short-circuits: it comes back unchanged and
/// the source is never asked for anything.
pub fn process<S: AnswerSource>(
    text: &str,
    source: &mut S,
) -> Result<ProcessOutcome, ProcessError> {
    let vars = extract_variables(text)?;
    if vars.is_empty() {
        debug!("no variables found, passing text through");
        return Ok(ProcessOutcome::Rendered(text.to_string()));
    }

    let fields = derive_field_specs(&vars);
    debug!(fields = fields.len(), "collecting answers");

    let answers = match source.collect(&fields)? {
        FormOutcome::Submitted(answers) => answers,
        FormOutcome::Canceled => return Ok(ProcessOutcome::Canceled),
    };

    let table = reconcile(&vars, &answers);
    let prepared = prepare_text(text, &vars);
    Ok(ProcessOutcome::Rendered(render(&prepared, &table)))
}
