pub mod config;
pub mod constants;
pub mod driver;
pub mod error;
pub mod fixpoint;
pub mod ir;
pub mod parser;
pub mod transpiler;
pub mod utils;

// Re-export commonly used types
pub use error::TranspileError;
pub use ir::{BitRange, Category, Symbol, SymbolKind, SymbolTable, VerilogGenerator};
pub use transpiler::{transpile, TranspileOutput, Transpiler};
