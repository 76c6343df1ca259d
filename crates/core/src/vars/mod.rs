//! Variable extraction and date offsets for template text.
//!
//! This module owns the placeholder grammar:
//! - Scanning text for `{{...}}` occurrences and folding them into variables
//! - Type tags (`date:`, `bool:`) and the `#` list modifier
//! - Relative date offsets (`+1d`, `-2w`, `+3m`) and their key spelling

pub mod datemath;
pub mod extract;
pub mod types;

pub use datemath::{
    Offset, OffsetParseError, OffsetUnit, apply_offset, offset_key_token, parse_offset,
    short_date,
};
pub use extract::{ExtractError, extract_variables};
pub use types::{Modifier, Occurrence, VarType, Variable, Variables};
