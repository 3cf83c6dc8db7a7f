//! Narration sink
//!
//! The simulation describes what happens each tick ("Hit by asteroid!",
//! "Level Up! ...") through a [`LogSink`] handed to it at construction.
//! Nothing the simulation decides depends on what the sink does.

use std::cell::RefCell;
use std::rc::Rc;

/// Accepts one line of human-readable narration.
pub trait LogSink {
    fn log(&mut self, line: &str);
}

/// Forwards narration to the `log` facade at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFacadeSink;

impl LogSink for LogFacadeSink {
    fn log(&mut self, line: &str) {
        log::info!("{}", line);
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl LogSink for NullSink {
    fn log(&mut self, _line: &str) {}
}

/// Collects lines in memory. Clones share the same buffer, so a caller can
/// keep one handle and give the other to the simulation.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    lines: Rc<RefCell<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line logged so far
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.borrow().iter().any(|l| l.contains(needle))
    }
}

impl LogSink for MemorySink {
    fn log(&mut self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_shares_buffer() {
        let handle = MemorySink::new();
        let mut sink: Box<dyn LogSink> = Box::new(handle.clone());
        sink.log("Game paused.");
        sink.log("Game unpaused.");
        assert_eq!(handle.lines(), vec!["Game paused.", "Game unpaused."]);
        assert!(handle.contains("unpaused"));
    }
}
