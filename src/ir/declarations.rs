use crate::error::{Result, TranspileError};
use crate::ir::symbols::{declaration_names, parse_declaration_token};
use crate::ir::{BitRange, Line, Symbol, SymbolKind, SymbolTable};

/// Rewrite one declaration line into merged Verilog declarations.
///
/// Symbols are ordered by width (stable, so equal widths keep their source
/// order) and neighbours with the same kind and range share one segment:
/// `x[3..0] y[3..0] en;` becomes `wire en;` and `reg [3:0] x,y;`.
/// Every symbol named on the line is marked declared.
pub fn consolidate_line(tokens: &[String], table: &mut SymbolTable) -> Result<Line> {
    let mut symbols: Vec<Symbol> = Vec::new();
    for token in declaration_names(tokens) {
        let (name, _) = parse_declaration_token(token)?;
        if symbols.iter().any(|s| s.name == name) {
            continue;
        }
        let symbol = table
            .get(&name)
            .cloned()
            .ok_or(TranspileError::UnknownSymbol(name))?;
        symbols.push(symbol);
    }

    symbols.sort_by_key(|s| s.width());

    let mut segments: Vec<String> = Vec::new();
    let mut previous: Option<(SymbolKind, Option<BitRange>)> = None;
    for symbol in &symbols {
        let key = (symbol.kind(), symbol.range);
        match segments.last_mut() {
            Some(segment) if previous == Some(key) => {
                segment.push(',');
                segment.push_str(&symbol.name);
            }
            _ => segments.push(segment_head(symbol)),
        }
        previous = Some(key);
    }

    for symbol in &symbols {
        if let Some(entry) = table.get_mut(&symbol.name) {
            entry.declared = true;
        }
    }

    let count = segments.len();
    Ok(segments
        .into_iter()
        .enumerate()
        .map(|(i, segment)| {
            if i + 1 < count {
                format!("{};\n", segment)
            } else {
                format!("{};", segment)
            }
        })
        .collect())
}

fn segment_head(symbol: &Symbol) -> String {
    match &symbol.range {
        Some(range) => format!(
            "{} {} {}",
            symbol.kind().to_verilog(),
            range.to_verilog(),
            symbol.name
        ),
        None => format!("{} {}", symbol.kind().to_verilog(), symbol.name),
    }
}

/// Standalone declarations, in table order, for every symbol no declaration
/// line covered. Marks each of them declared.
pub fn synthesize_missing(table: &mut SymbolTable) -> Vec<Line> {
    let missing: Vec<String> = table
        .iter()
        .filter(|s| !s.declared)
        .map(|s| s.name.clone())
        .collect();

    let mut lines = Vec::with_capacity(missing.len());
    for name in missing {
        if let Some(symbol) = table.get_mut(&name) {
            tracing::debug!("Synthesizing declaration for {}", name);
            symbol.declared = true;
            lines.push(vec![symbol.to_verilog()]);
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::symbols::Observation;

    fn tokens(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    fn declare(table: &mut SymbolTable, line: &[String]) {
        for token in declaration_names(line) {
            let (name, range) = parse_declaration_token(token).unwrap();
            let observation = match range {
                Some(range) => Observation::RangedDeclaration(range),
                None => Observation::BareDeclaration,
            };
            table.observe(&name, observation).unwrap();
        }
    }

    #[test]
    fn test_equal_ranges_share_a_segment() {
        let line = tokens("x[3:0] y[3:0];");
        let mut table = SymbolTable::new();
        declare(&mut table, &line);

        let out = consolidate_line(&line, &mut table).unwrap();
        assert_eq!(out, vec!["reg [3:0] x,y;"]);
        assert!(table.get("x").unwrap().declared);
        assert!(table.get("y").unwrap().declared);
    }

    #[test]
    fn test_sorted_by_width_with_stable_ties() {
        let line = tokens("wide[7:0] b a[3:0] c[3:0] d;");
        let mut table = SymbolTable::new();
        declare(&mut table, &line);

        let out = consolidate_line(&line, &mut table).unwrap();
        assert_eq!(
            out,
            vec!["wire b,d;\n", "reg [3:0] a,c;\n", "reg [7:0] wide;"]
        );
    }

    #[test]
    fn test_same_width_different_range_splits() {
        let line = tokens("a[3:0] b[4:1];");
        let mut table = SymbolTable::new();
        declare(&mut table, &line);

        let out = consolidate_line(&line, &mut table).unwrap();
        assert_eq!(out, vec!["reg [3:0] a;\n", "reg [4:1] b;"]);
    }

    #[test]
    fn test_assignment_kind_is_used() {
        let line = tokens("s[3:0] t[3:0];");
        let mut table = SymbolTable::new();
        table
            .observe("s", Observation::Assignment { kind: SymbolKind::Wire, range: None })
            .unwrap();
        declare(&mut table, &line);

        let out = consolidate_line(&line, &mut table).unwrap();
        assert_eq!(out, vec!["wire [3:0] s;\n", "reg [3:0] t;"]);
    }

    #[test]
    fn test_repeated_name_declared_once() {
        let line = tokens("a b[1:0] a;");
        let mut table = SymbolTable::new();
        declare(&mut table, &line);

        let out = consolidate_line(&line, &mut table).unwrap();
        assert_eq!(out, vec!["wire a;\n", "reg [1:0] b;"]);
    }

    #[test]
    fn test_unknown_symbol_is_internal_error() {
        let mut table = SymbolTable::new();
        let result = consolidate_line(&tokens("ghost;"), &mut table);
        assert!(matches!(result, Err(TranspileError::UnknownSymbol(name)) if name == "ghost"));
    }

    #[test]
    fn test_synthesize_missing_in_table_order() {
        let mut table = SymbolTable::new();
        table
            .observe("clk", Observation::Assignment { kind: SymbolKind::Register, range: None })
            .unwrap();
        table
            .observe(
                "bus",
                Observation::Assignment {
                    kind: SymbolKind::Wire,
                    range: Some(BitRange::new(7, 0)),
                },
            )
            .unwrap();
        table.observe("done", Observation::BareDeclaration).unwrap();
        table.get_mut("done").unwrap().declared = true;

        let lines = synthesize_missing(&mut table);
        assert_eq!(
            lines,
            vec![vec!["reg clk;".to_string()], vec!["wire [7:0] bus;".to_string()]]
        );
        assert!(table.iter().all(|s| s.declared));
        assert!(synthesize_missing(&mut table).is_empty());
    }
}
