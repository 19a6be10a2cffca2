//! Destination of the builtin `print`.
//!
//! Programs write to stdout by default. Tests and embedding hosts capture the
//! output in a shared buffer instead.

use std::{cell::RefCell, rc::Rc};

#[derive(Debug, Clone, Default)]
pub enum PrintHandler {
    /// Writes to stdout.
    #[default]
    Stdout,
    /// Captures into a buffer shared by every clone of the handler.
    Buffer(Rc<RefCell<String>>),
    /// Discards all output.
    Silent,
}

impl PrintHandler {
    pub fn buffer() -> Self {
        PrintHandler::Buffer(Rc::new(RefCell::new(String::new())))
    }

    /// Print a line (with newline).
    pub fn println(&self, msg: &str) {
        match self {
            PrintHandler::Stdout => println!("{msg}"),
            PrintHandler::Buffer(buffer) => {
                let mut buffer = buffer.borrow_mut();
                buffer.push_str(msg);
                buffer.push('\n');
            }
            PrintHandler::Silent => {}
        }
    }

    /// Everything captured so far. Always empty for stdout.
    pub fn get_output(&self) -> String {
        match self {
            PrintHandler::Buffer(buffer) => buffer.borrow().clone(),
            _ => String::new(),
        }
    }

    pub fn clear(&self) {
        if let PrintHandler::Buffer(buffer) = self {
            buffer.borrow_mut().clear();
        }
    }
}
