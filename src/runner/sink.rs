//! Destinations for `print` output.
//!
//! - [`StdoutSink`]: writes each line to stdout
//! - [`BufferSink`]: captures lines, for tests and embedding hosts

use std::cell::RefCell;
use std::rc::Rc;

pub trait OutputSink {
    /// Emit one line. The sink adds the line terminator.
    fn write_line(&mut self, line: &str);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write_line(&mut self, line: &str) {
        println!("{}", line);
    }
}

/// Captures printed lines. Clones share one buffer, so a host can hand one
/// handle to the interpreter and read the output back through another.
#[derive(Debug, Default, Clone)]
pub struct BufferSink {
    lines: Rc<RefCell<Vec<String>>>,
}

impl BufferSink {
    pub fn new() -> Self {
        BufferSink::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// All captured lines, each terminated by `\n`.
    pub fn output(&self) -> String {
        self.lines
            .borrow()
            .iter()
            .map(|line| format!("{}\n", line))
            .collect()
    }

    pub fn clear(&self) {
        self.lines.borrow_mut().clear();
    }
}

impl OutputSink for BufferSink {
    fn write_line(&mut self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }
}

impl OutputSink for Vec<String> {
    fn write_line(&mut self, line: &str) {
        self.push(line.to_string());
    }
}
