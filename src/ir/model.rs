use serde::{Deserialize, Serialize};

/// Atomic text fragment of a source line.
pub type Token = String;

/// Ordered tokens of one source line. Stages take a `Line` by value and hand
/// back a new one.
pub type Line = Vec<Token>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Comment,
    Declaration,
    WireAssignment,
    RegisterAssignment,
    Unknown,
}

impl Category {
    /// Three-character tag used when echoing categorized input.
    pub fn tag(&self) -> &'static str {
        match self {
            Category::Comment => "CMT",
            Category::Declaration => "DCL",
            Category::WireAssignment => "WIR",
            Category::RegisterAssignment => "REG",
            Category::Unknown => "???",
        }
    }

    pub fn is_assignment(&self) -> bool {
        matches!(self, Category::WireAssignment | Category::RegisterAssignment)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolKind {
    Register,
    Wire,
}

impl SymbolKind {
    pub fn to_verilog(&self) -> &'static str {
        match self {
            SymbolKind::Register => "reg",
            SymbolKind::Wire => "wire",
        }
    }
}

/// Inclusive `[high:low]` bit range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitRange {
    pub high: i64,
    pub low: i64,
}

impl BitRange {
    pub fn new(high: i64, low: i64) -> Self {
        Self { high, low }
    }

    pub fn width(&self) -> i64 {
        self.high.saturating_sub(self.low).saturating_add(1)
    }

    /// Width, or `None` if it does not fit in an `i64`.
    pub fn checked_width(&self) -> Option<i64> {
        self.high.checked_sub(self.low)?.checked_add(1)
    }

    /// Smallest range covering both `self` and `other`.
    pub fn union(&self, other: &BitRange) -> BitRange {
        BitRange {
            high: self.high.max(other.high),
            low: self.low.min(other.low),
        }
    }

    pub fn to_verilog(&self) -> String {
        format!("[{}:{}]", self.high, self.low)
    }
}

/// Where a symbol's current range came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeSource {
    Assignment,
    Declaration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    /// Kind fixed by an assignment observation, if any.
    pub assigned_kind: Option<SymbolKind>,
    pub range: Option<BitRange>,
    pub range_source: Option<RangeSource>,
    pub declared: bool,
}

impl Symbol {
    pub fn new(name: String) -> Self {
        Self {
            name,
            assigned_kind: None,
            range: None,
            range_source: None,
            declared: false,
        }
    }

    /// Resolved kind. Without an assignment, a ranged symbol is a register and
    /// an unranged one is a wire.
    pub fn kind(&self) -> SymbolKind {
        match (self.assigned_kind, self.range) {
            (Some(kind), _) => kind,
            (None, Some(_)) => SymbolKind::Register,
            (None, None) => SymbolKind::Wire,
        }
    }

    pub fn width(&self) -> i64 {
        self.range.map(|r| r.width()).unwrap_or(1)
    }

    /// Standalone declaration: `reg [3:0] name;`
    pub fn to_verilog(&self) -> String {
        match &self.range {
            Some(range) => format!(
                "{} {} {};",
                self.kind().to_verilog(),
                range.to_verilog(),
                self.name
            ),
            None => format!("{} {};", self.kind().to_verilog(), self.name),
        }
    }
}

/// A normalized source line together with its category and original text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceLine {
    pub number: usize,
    pub raw: String,
    pub category: Category,
    pub tokens: Line,
}
