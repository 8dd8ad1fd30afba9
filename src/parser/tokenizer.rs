use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;

use crate::constants::{RANGE_SEPARATOR_SOURCE, RANGE_SEPARATOR_TARGET};
use crate::error::Result;
use crate::fixpoint::{apply_until_stable, pass_bound};
use crate::ir::Line;

lazy_static! {
    // First separator inside an innermost `{...}` span: a whitespace run,
    // optionally around a comma.
    static ref BRACE_GAP: Regex = Regex::new(r"(\{[^{}]*?)(?:\s+,\s*|,\s+|\s+)([^{}]*\})").unwrap();
    static ref BRACE_OPEN_PAD: Regex = Regex::new(r"\{\s+").unwrap();
    static ref BRACE_CLOSE_PAD: Regex = Regex::new(r"\s+\}").unwrap();
}

/// Collapse every `{a b c}` concatenation list into `{a,b,c}` so it survives
/// whitespace splitting as one token.
pub fn fix_brace_lists(raw: &str) -> Result<String> {
    let trimmed = BRACE_OPEN_PAD.replace_all(raw, "{");
    let trimmed = BRACE_CLOSE_PAD.replace_all(&trimmed, "}").into_owned();

    // one rewrite per whitespace run at most
    let max_passes = pass_bound(trimmed.len());
    apply_until_stable("brace-list", trimmed, max_passes, |text| {
        let next = match BRACE_GAP.replace(text, "$1,$2") {
            Cow::Borrowed(_) => return false,
            Cow::Owned(next) => next,
        };
        *text = next;
        true
    })
}

/// `a[3..0]` -> `a[3:0]`
pub fn normalize_range(token: &str) -> String {
    token.replace(RANGE_SEPARATOR_SOURCE, RANGE_SEPARATOR_TARGET)
}

/// Split one raw source line into normalized tokens.
pub fn tokenize(raw: &str) -> Result<Line> {
    let fixed = fix_brace_lists(raw)?;
    Ok(fixed.split_whitespace().map(normalize_range).collect())
}
