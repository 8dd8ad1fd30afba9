//! Visiboole-to-Verilog pipeline.
//!
//! Raw text goes through tokenizing, line classification, symbol extraction,
//! declaration consolidation and expression rewriting, and comes out as one
//! Verilog line per input line plus any synthesized declarations. Nothing is
//! written anywhere; a parse error discards the whole run.

use crate::error::Result;
use crate::ir::{build_symbol_table, emit, SourceLine, SymbolTable, VerilogGenerator};
use crate::parser::{classify, tokenize};

/// Result of one run.
#[derive(Debug, Clone)]
pub struct TranspileOutput {
    /// Input lines after normalization, with their categories.
    pub source_lines: Vec<SourceLine>,
    /// Final symbol table; every entry is declared.
    pub symbols: SymbolTable,
    pub lines: Vec<String>,
}

impl TranspileOutput {
    /// Output text, one newline after every line.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }
}

pub struct Transpiler {
    generator: VerilogGenerator,
}

impl Transpiler {
    pub fn new(generator: VerilogGenerator) -> Self {
        Self { generator }
    }

    /// Tokenize and classify each raw line.
    pub fn categorize(&self, source: &str) -> Result<Vec<SourceLine>> {
        tracing::info!("Preprocessing and categorizing lines");
        let mut lines = Vec::new();
        for (i, raw) in source.lines().enumerate() {
            let tokens = tokenize(raw)?;
            let category = classify(&tokens);
            lines.push(SourceLine {
                number: i + 1,
                raw: raw.to_string(),
                category,
                tokens,
            });
        }
        Ok(lines)
    }

    pub fn transpile(&self, source: &str) -> Result<TranspileOutput> {
        let source_lines = self.categorize(source)?;

        tracing::info!("Performing conversion");
        tracing::info!("  Identify registers and wires");
        let mut symbols = build_symbol_table(&source_lines)?;
        for symbol in symbols.iter() {
            tracing::debug!("    Found {} {}", symbol.kind().to_verilog(), symbol.name);
        }

        let lines = self.generator.generate(&source_lines, &mut symbols)?;

        Ok(TranspileOutput {
            source_lines,
            symbols,
            lines: emit(&lines),
        })
    }
}

impl Default for Transpiler {
    fn default() -> Self {
        Self::new(VerilogGenerator::new())
    }
}

/// Transpile with default options.
pub fn transpile(source: &str) -> Result<TranspileOutput> {
    Transpiler::default().transpile(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TranspileError;
    use crate::ir::Category;

    #[test]
    fn test_categorize_keeps_raw_text() {
        let lines = Transpiler::default().categorize("a b;\n\"note\";\ny = a;").unwrap();
        let categories: Vec<Category> = lines.iter().map(|l| l.category).collect();
        assert_eq!(
            categories,
            vec![Category::Declaration, Category::Comment, Category::WireAssignment]
        );
        assert_eq!(lines[1].raw, "\"note\";");
        assert_eq!(lines[2].number, 3);
    }

    #[test]
    fn test_unassigned_register_is_synthesized_first() {
        let output = transpile("clk <= ~clk;").unwrap();
        assert_eq!(output.lines[0], "reg clk;");
        assert_eq!(output.to_text(), "reg clk;\nalways @(posedge clk) begin clk <= ~clk; end\n");
    }

    #[test]
    fn test_parse_error_aborts() {
        match transpile("a[3..x];\ny = a;") {
            Err(TranspileError::Parse { token, .. }) => assert_eq!(token, "a[3:x];"),
            other => panic!("expected parse error, got {:?}", other.map(|o| o.lines)),
        }
    }

    #[test]
    fn test_every_symbol_declared() {
        let output = transpile("s[1..0] t;\ns[] <= s[] + 1;\nu = s t v;").unwrap();
        assert_eq!(output.symbols.len(), 3);
        assert!(output.symbols.iter().all(|s| s.declared));
        assert!(!output.to_text().contains(".."));
    }
}
