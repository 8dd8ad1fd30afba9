use crate::constants::{is_operator, ASSIGN_KEYWORD, COMMENT_PREFIX, EMPTY_INDEX, IMPLICIT_AND};
use crate::error::Result;
use crate::fixpoint::{apply_until_stable, pass_bound};
use crate::ir::Line;

/// Remove every `[]` marker: `d[];` becomes `d;` and a bare `[]` token goes.
pub fn strip_empty_index(line: Line) -> Line {
    line.into_iter()
        .map(|token| token.replace(EMPTY_INDEX, ""))
        .filter(|token| !token.is_empty())
        .collect()
}

/// Read `+` as OR unless the line increments a register (`[]` present).
pub fn plus_as_or(line: Line) -> Line {
    if line.iter().any(|token| token.contains(EMPTY_INDEX)) {
        return line;
    }
    line.into_iter()
        .map(|token| if token == "+" { "|".to_string() } else { token })
        .collect()
}

/// Index of the first adjacent pair at or after `from` in which neither
/// token is an operator.
fn first_bare_pair(line: &[String], from: usize) -> Option<usize> {
    line.get(from..)?
        .windows(2)
        .position(|pair| !is_operator(&pair[0]) && !is_operator(&pair[1]))
        .map(|i| i + from)
}

/// Make implicit concatenation explicit: `a = b c` becomes `a = b & c`.
pub fn insert_implicit_and(line: Line) -> Result<Line> {
    // Pairs left of an insertion never change, so each pass resumes there.
    let mut resume = 0;
    let max_passes = pass_bound(line.len());
    apply_until_stable("implicit-and", line, max_passes, |current| {
        match first_bare_pair(current, resume) {
            Some(i) => {
                current.insert(i + 1, IMPLICIT_AND.to_string());
                resume = i + 1;
                true
            }
            None => false,
        }
    })
}

pub fn rewrite_wire_line(line: Line, plus_is_or: bool) -> Result<Line> {
    let line = if plus_is_or { plus_as_or(line) } else { line };
    let mut out = vec![ASSIGN_KEYWORD.to_string()];
    out.extend(insert_implicit_and(strip_empty_index(line))?);
    Ok(out)
}

/// Wrap the assignment in `always @(posedge <clock>) begin ... end`.
pub fn rewrite_register_line(line: Line, clock: &str) -> Result<Line> {
    let mut out = clocked_header(clock);
    out.extend(insert_implicit_and(strip_empty_index(line))?);
    out.push("end".to_string());
    Ok(out)
}

fn clocked_header(clock: &str) -> Line {
    vec![
        "always".to_string(),
        "@(posedge".to_string(),
        format!("{})", clock),
        "begin".to_string(),
    ]
}

pub fn rewrite_comment_line(mut line: Line) -> Line {
    if let Some(first) = line.first_mut() {
        first.insert_str(0, COMMENT_PREFIX);
    }
    line
}
