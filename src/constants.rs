// Tokens that already separate operands on an assignment line
pub const OPERATORS: [&str; 7] = ["=", "<=", "|", "&", "^", "+", "-"];

// Operator inserted between implicitly concatenated operands
pub const IMPLICIT_AND: &str = "&";

// Empty index marker on register references
pub const EMPTY_INDEX: &str = "[]";

// Declaration tokens carrying this marker are bus-width annotations
pub const BUS_WIDTH_MARKER: char = '%';

pub const RANGE_SEPARATOR_SOURCE: &str = "..";
pub const RANGE_SEPARATOR_TARGET: &str = ":";

pub const COMMENT_PREFIX: &str = "//";
pub const ASSIGN_KEYWORD: &str = "assign";

pub const DEFAULT_CLOCK_SIGNAL: &str = "clk";
pub const OUTPUT_EXTENSION: &str = "v";

// Slack added to a rewrite rule's size-derived pass bound
pub const FIXPOINT_PASS_MARGIN: usize = 8;

pub fn is_operator(token: &str) -> bool {
    OPERATORS.contains(&token)
}
