use crate::constants::DEFAULT_CLOCK_SIGNAL;
use crate::error::Result;
use crate::ir::declarations::{consolidate_line, synthesize_missing};
use crate::ir::expressions::{rewrite_comment_line, rewrite_register_line, rewrite_wire_line};
use crate::ir::{Category, Line, SourceLine, SymbolTable};

/// Generate Verilog lines from categorized Visiboole lines
pub struct VerilogGenerator {
    clock_signal: String,
    plus_as_or: bool,
}

impl VerilogGenerator {
    pub fn new() -> Self {
        Self {
            clock_signal: DEFAULT_CLOCK_SIGNAL.to_string(),
            plus_as_or: false,
        }
    }

    pub fn with_clock(mut self, clock_signal: String) -> Self {
        self.clock_signal = clock_signal;
        self
    }

    pub fn with_plus_as_or(mut self, plus_as_or: bool) -> Self {
        self.plus_as_or = plus_as_or;
        self
    }

    /// Rewrite every line. Synthesized declarations for undeclared symbols
    /// come first, then the source lines in order.
    pub fn generate(&self, lines: &[SourceLine], table: &mut SymbolTable) -> Result<Vec<Line>> {
        tracing::info!("  Fix declaration syntax");
        let mut body = Vec::with_capacity(lines.len());
        for line in lines {
            let tokens = line.tokens.clone();
            let rewritten = match line.category {
                Category::Declaration => consolidate_line(&tokens, table)?,
                Category::Comment => rewrite_comment_line(tokens),
                Category::WireAssignment => rewrite_wire_line(tokens, self.plus_as_or)?,
                Category::RegisterAssignment => rewrite_register_line(tokens, &self.clock_signal)?,
                Category::Unknown => tokens,
            };
            body.push(rewritten);
        }

        tracing::info!("  Declare remaining registers and wires");
        let mut output = synthesize_missing(table);
        output.extend(body);
        Ok(output)
    }
}

impl Default for VerilogGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Join tokens with single spaces; a newline inside a token swallows the
/// following separator.
pub fn emit_line(line: &[String]) -> String {
    line.join(" ").replace("\n ", "\n")
}

pub fn emit(lines: &[Line]) -> Vec<String> {
    lines.iter().map(|line| emit_line(line)).collect()
}
