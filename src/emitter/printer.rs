//! Indentation-aware text buffer for generated Go code.

pub struct GoPrinter {
    output: String,
    indent_level: u32,
    indent_str: &'static str,
}

impl Default for GoPrinter {
    fn default() -> Self {
        GoPrinter::new()
    }
}

impl GoPrinter {
    /// gofmt indents with tabs.
    pub fn new() -> Self {
        GoPrinter {
            output: String::new(),
            indent_level: 0,
            indent_str: "\t",
        }
    }

    pub fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    pub fn write_line(&mut self) {
        self.output.push('\n');
    }

    pub fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(self.indent_str);
        }
    }

    /// Write one indented line.
    pub fn line(&mut self, s: &str) {
        if !s.is_empty() {
            self.write_indent();
            self.write(s);
        }
        self.write_line();
    }

    pub const fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub const fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    /// Write `header {`, run `body` one level deeper, then write `}`.
    pub fn block(&mut self, header: &str, body: impl FnOnce(&mut Self)) {
        self.line(&format!("{header} {{"));
        self.increase_indent();
        body(self);
        self.decrease_indent();
        self.line("}");
    }

    pub fn get_output(&self) -> &str {
        &self.output
    }

    pub fn finish(self) -> String {
        self.output
    }
}

#[cfg(test)]
#[path = "../tests/printer_tests.rs"]
mod printer_tests;
