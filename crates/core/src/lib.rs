#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Core library for `fillin`: extract mustache-style variables from text,
//! derive the inputs they need, reconcile typed answers into substitutions,
//! and render the result.
//!
//! The stages compose left to right:
//!
//! ```text
//! extract_variables -> derive_field_specs -> AnswerSource::collect
//!                   -> reconcile -> prepare_text -> render
//! ```
//!
//! [`pipeline::process`] wires them together; every stage is also public on
//! its own for callers that need only part of the flow.

pub mod config;
pub mod fields;
pub mod pipeline;
pub mod reconcile;
pub mod templates;
pub mod vars;

pub use fields::{FieldKind, FieldSpec, derive_field_specs, derive_field_specs_at};
pub use pipeline::{AnswerSource, FormOutcome, ProcessError, ProcessOutcome, process};
pub use reconcile::{Answer, SubstitutionTable, TagValue, reconcile};
pub use templates::{prepare_text, render};
pub use vars::{ExtractError, Variables, extract_variables};
