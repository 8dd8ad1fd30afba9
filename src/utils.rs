use crossterm::style::{Color, Stylize};

use crate::ir::{Category, SourceLine, Symbol, SymbolTable};

/// CLI console trait for advisory output
pub trait CLIConsole: Send + Sync {
    fn print_categorized(&self, line: &SourceLine);
    fn print_symbol(&self, symbol: &Symbol);
    fn print_output_line(&self, line: &str);
    fn print_success(&self, message: &str);
    fn print_error(&self, message: &str);
    fn print_info(&self, message: &str);
}

/// Simple console implementation
pub struct SimpleConsole {
    color: bool,
}

impl SimpleConsole {
    pub fn new() -> Self {
        Self { color: true }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    fn tag_color(category: Category) -> Color {
        match category {
            Category::Comment => Color::DarkGrey,
            Category::Declaration => Color::Cyan,
            Category::WireAssignment => Color::Green,
            Category::RegisterAssignment => Color::Magenta,
            Category::Unknown => Color::Yellow,
        }
    }
}

impl Default for SimpleConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl CLIConsole for SimpleConsole {
    fn print_categorized(&self, line: &SourceLine) {
        let tag = format!("[{}]", line.category.tag());
        let text = line.raw.trim();
        if self.color {
            println!("{} {}", tag.with(Self::tag_color(line.category)), text);
        } else {
            println!("{} {}", tag, text);
        }
    }

    fn print_symbol(&self, symbol: &Symbol) {
        println!("    Found {} {}", symbol.kind().to_verilog(), symbol.name);
    }

    fn print_output_line(&self, line: &str) {
        println!("{}", line);
    }

    fn print_success(&self, message: &str) {
        if self.color {
            println!("{} {}", "✓".with(Color::Green), message);
        } else {
            println!("✓ {}", message);
        }
    }

    fn print_error(&self, message: &str) {
        if self.color {
            eprintln!("{} {}", "✗".with(Color::Red), message);
        } else {
            eprintln!("✗ {}", message);
        }
    }

    fn print_info(&self, message: &str) {
        println!("ℹ {}", message);
    }
}

/// Echo every categorized input line.
pub fn report_source(console: &dyn CLIConsole, lines: &[SourceLine]) {
    for line in lines {
        console.print_categorized(line);
    }
}

/// List registers, then wires.
pub fn report_symbols(console: &dyn CLIConsole, symbols: &SymbolTable) {
    console.print_info(&format!("Identified {} registers and wires", symbols.len()));
    for symbol in symbols.registers().chain(symbols.wires()) {
        console.print_symbol(symbol);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transpiler::transpile;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingConsole {
        lines: Mutex<Vec<String>>,
    }

    impl RecordingConsole {
        fn record(&self, text: String) {
            self.lines.lock().unwrap().push(text);
        }
    }

    impl CLIConsole for RecordingConsole {
        fn print_categorized(&self, line: &SourceLine) {
            self.record(format!("[{}] {}", line.category.tag(), line.raw.trim()));
        }

        fn print_symbol(&self, symbol: &Symbol) {
            self.record(format!("{} {}", symbol.kind().to_verilog(), symbol.name));
        }

        fn print_output_line(&self, line: &str) {
            self.record(line.to_string());
        }

        fn print_success(&self, _message: &str) {}
        fn print_error(&self, _message: &str) {}
        fn print_info(&self, message: &str) {
            self.record(message.to_string());
        }
    }

    #[test]
    fn test_report_source_tags() {
        let output = transpile("\"Adder\";\nsum = a b;\nfoo").unwrap();
        let console = RecordingConsole::default();
        report_source(&console, &output.source_lines);

        let lines = console.lines.lock().unwrap();
        assert_eq!(*lines, vec!["[CMT] \"Adder\";", "[WIR] sum = a b;", "[???] foo"]);
    }

    #[test]
    fn test_report_symbols_registers_first() {
        let output = transpile("w = q;\nq <= d;").unwrap();
        let console = RecordingConsole::default();
        report_symbols(&console, &output.symbols);

        let lines = console.lines.lock().unwrap();
        assert_eq!(*lines, vec!["Identified 2 registers and wires", "reg q", "wire w"]);
    }
}
