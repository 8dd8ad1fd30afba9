pub mod declarations;
pub mod expressions;
pub mod model;
pub mod symbols;
pub mod verilog_gen;

pub use model::{BitRange, Category, Line, RangeSource, SourceLine, Symbol, SymbolKind, Token};
pub use symbols::{build_symbol_table, Observation, SymbolTable};
pub use verilog_gen::{emit, emit_line, VerilogGenerator};
