use std::collections::HashMap;

use crate::constants::{BUS_WIDTH_MARKER, EMPTY_INDEX};
use crate::error::{Result, TranspileError};
use crate::ir::{BitRange, Category, RangeSource, SourceLine, Symbol, SymbolKind};

/// One sighting of a signal name in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// Target of a `=` or `<=` line.
    Assignment {
        kind: SymbolKind,
        range: Option<BitRange>,
    },
    /// Ranged token on a declaration line.
    RangedDeclaration(BitRange),
    /// Bare name on a declaration line.
    BareDeclaration,
}

impl Symbol {
    /// Fold an observation into this symbol.
    ///
    /// Policy: the first assignment fixes the kind and a differing one is a
    /// conflict; a declared range beats an assigned one; two declared ranges
    /// must agree; assigned ranges widen to cover each other.
    pub fn merge(&mut self, observation: Observation) -> Result<()> {
        match observation {
            Observation::Assignment { kind, range } => {
                match self.assigned_kind {
                    Some(existing) if existing != kind => {
                        return Err(TranspileError::conflict(
                            &self.name,
                            format!(
                                "assigned as both {} and {}",
                                existing.to_verilog(),
                                kind.to_verilog()
                            ),
                        ));
                    }
                    _ => self.assigned_kind = Some(kind),
                }

                if let Some(range) = range {
                    match (self.range_source, self.range) {
                        (Some(RangeSource::Declaration), _) => {}
                        (Some(RangeSource::Assignment), Some(existing)) => {
                            self.range = Some(existing.union(&range));
                        }
                        _ => {
                            self.range = Some(range);
                            self.range_source = Some(RangeSource::Assignment);
                        }
                    }
                }
            }
            Observation::RangedDeclaration(range) => {
                if let (Some(RangeSource::Declaration), Some(existing)) =
                    (self.range_source, self.range)
                {
                    if existing != range {
                        return Err(TranspileError::conflict(
                            &self.name,
                            format!(
                                "declared as both {} and {}",
                                existing.to_verilog(),
                                range.to_verilog()
                            ),
                        ));
                    }
                }
                self.range = Some(range);
                self.range_source = Some(RangeSource::Declaration);
            }
            Observation::BareDeclaration => {}
        }

        Ok(())
    }
}

/// Name-keyed symbol store that iterates in insertion order.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    index: HashMap<String, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an observation, creating the symbol on first sight.
    pub fn observe(&mut self, name: &str, observation: Observation) -> Result<()> {
        let slot = match self.index.get(name) {
            Some(&slot) => slot,
            None => {
                self.symbols.push(Symbol::new(name.to_string()));
                self.index.insert(name.to_string(), self.symbols.len() - 1);
                self.symbols.len() - 1
            }
        };
        self.symbols[slot].merge(observation)
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.index.get(name).map(|&slot| &self.symbols[slot])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        match self.index.get(name) {
            Some(&slot) => Some(&mut self.symbols[slot]),
            None => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    pub fn registers(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter().filter(|s| s.kind() == SymbolKind::Register)
    }

    pub fn wires(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter().filter(|s| s.kind() == SymbolKind::Wire)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

fn parse_bound(token: &str, text: &str) -> Result<i64> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| TranspileError::parse(token, format!("bound '{}' is not an integer", text)))
}

/// Split `name[payload]` into the name and the bracket payload.
fn split_brackets(token: &str) -> Result<(&str, Option<&str>)> {
    let body = token.trim_end_matches(';');
    let Some(open) = body.find('[') else {
        if body.contains(']') {
            return Err(TranspileError::parse(token, "unbalanced brackets"));
        }
        return Ok((body, None));
    };

    let name = &body[..open];
    let payload = body[open + 1..]
        .strip_suffix(']')
        .ok_or_else(|| TranspileError::parse(token, "unbalanced brackets"))?;
    if payload.contains('[') || payload.contains(']') {
        return Err(TranspileError::parse(token, "unbalanced brackets"));
    }
    if name.is_empty() {
        return Err(TranspileError::parse(token, "missing signal name"));
    }
    Ok((name, Some(payload)))
}

fn parse_range(token: &str, payload: &str) -> Result<BitRange> {
    let (high, low) = payload
        .split_once(':')
        .ok_or_else(|| TranspileError::parse(token, "missing ':' in bit range"))?;
    let range = BitRange::new(parse_bound(token, high)?, parse_bound(token, low)?);
    if range.checked_width().is_none() {
        return Err(TranspileError::parse(token, "bit range width overflows"));
    }
    Ok(range)
}

/// Name and range of an assignment target such as `q[3:0]`, `q[]` or `q[2]`.
/// Only a `high:low` payload yields a range.
pub fn parse_assignment_target(token: &str) -> Result<(String, Option<BitRange>)> {
    let (name, payload) = split_brackets(token)?;
    let range = match payload {
        Some(payload) if payload.contains(':') => Some(parse_range(token, payload)?),
        _ => None,
    };
    Ok((name.to_string(), range))
}

/// Name and range of a declaration token such as `count[7:0];` or `en`.
/// A bracketed declaration token must carry a `high:low` range.
pub fn parse_declaration_token(token: &str) -> Result<(String, Option<BitRange>)> {
    if !token.contains(':') && !token.contains('[') {
        if token.contains(']') {
            return Err(TranspileError::parse(token, "unbalanced brackets"));
        }
        return Ok((token.trim_end_matches(';').to_string(), None));
    }
    let (name, payload) = split_brackets(token)?;
    let payload = payload.ok_or_else(|| TranspileError::parse(token, "range without brackets"))?;
    Ok((name.to_string(), Some(parse_range(token, payload)?)))
}

/// Declaration tokens that name signals: skips `%` width markers and bare `;`.
pub fn declaration_names(tokens: &[String]) -> impl Iterator<Item = &String> {
    tokens
        .iter()
        .filter(|t| !t.contains(BUS_WIDTH_MARKER) && !t.trim_end_matches(';').is_empty())
}

/// Derive every register and wire from the categorized lines: register
/// targets first, then wire targets, then declarations.
pub fn build_symbol_table(lines: &[SourceLine]) -> Result<SymbolTable> {
    let mut table = SymbolTable::new();

    for (category, kind) in [
        (Category::RegisterAssignment, SymbolKind::Register),
        (Category::WireAssignment, SymbolKind::Wire),
    ] {
        for line in lines.iter().filter(|l| l.category == category) {
            let Some(target) = line.tokens.first() else {
                continue;
            };
            let target = target.replace(EMPTY_INDEX, "");
            let (name, range) = parse_assignment_target(&target)?;
            tracing::debug!("Line {}: {} target {}", line.number, kind.to_verilog(), name);
            table.observe(&name, Observation::Assignment { kind, range })?;
        }
    }

    for line in lines.iter().filter(|l| l.category == Category::Declaration) {
        for token in declaration_names(&line.tokens) {
            let (name, range) = parse_declaration_token(token)?;
            let observation = match range {
                Some(range) => Observation::RangedDeclaration(range),
                None => Observation::BareDeclaration,
            };
            table.observe(&name, observation)?;
        }
    }

    Ok(table)
}
