use std::fmt::Write;

/// Line-oriented output buffer with four-space indentation
pub(crate) struct Printer {
    output: String,
    indent_level: usize,
}

impl Printer {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
        }
    }

    fn indent(&self) -> String {
        "    ".repeat(self.indent_level)
    }

    pub fn write_line(&mut self, text: &str) {
        let indent = self.indent();
        let _ = writeln!(self.output, "{}{}", indent, text);
    }

    pub fn write_blank_line(&mut self) {
        self.output.push('\n');
    }

    /// Run `body` one level deeper
    pub fn indented(&mut self, body: impl FnOnce(&mut Self)) {
        self.indent_level += 1;
        body(self);
        self.indent_level -= 1;
    }

    pub fn finish(self) -> String {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation() {
        let mut p = Printer::new();
        p.write_line("BEGIN");
        p.indented(|p| {
            p.write_line("NULL;");
            p.write_blank_line();
        });
        p.write_line("END;");
        assert_eq!(p.finish(), "BEGIN\n    NULL;\n\nEND;\n");
    }
}
