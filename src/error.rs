use std::fmt;

use crate::object::Object;
use crate::token::{Token, Type};

/// A lexical error collected by the `Scanner`. Formats to the exact wording
/// spec.md §4.1 requires, with no further wrapping at the call site.
#[derive(Debug, Clone)]
pub struct ScanError {
    pub line: usize,
    pub message: String,
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on line {}", self.message, self.line)
    }
}

/// A syntax error collected by the `Parser` during panic-mode recovery.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error on line {}: {}", self.token.line, self.message)
    }
}

/// A static-resolution error. The resolver aborts at the first one rather
/// than collecting a list (spec.md §7 propagation policy).
#[derive(Debug, Clone)]
pub struct ResolveError {
    pub token: Token,
    pub message: String,
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Compiler error on line {}: {}", self.token.line, self.message)
    }
}

/// A runtime error. `token` is `None` only for errors with no natural source
/// location to blame (spec.md §7's plain `Runtime error: MSG` form).
#[derive(Debug, Clone)]
pub struct RuntimeError {
    pub token: Option<Token>,
    pub message: String,
}

impl RuntimeError {
    pub fn new(token: &Token, message: impl Into<String>) -> Self {
        RuntimeError { token: Some(token.clone()), message: message.into() }
    }

    pub fn without_token(message: impl Into<String>) -> Self {
        RuntimeError { token: None, message: message.into() }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.token {
            Some(token) if token.r#type != Type::EOF => write!(
                f,
                "Runtime error executing \"{}\" on line {}: {}",
                token.lexeme, token.line, self.message
            ),
            Some(token) => write!(f, "Runtime error on line {}: {}", token.line, self.message),
            None => write!(f, "Runtime error: {}", self.message),
        }
    }
}

/// The interpreter's non-local control-flow signal, unified with ordinary
/// runtime failure so that statement execution can use plain `?` to
/// propagate both a `return` in flight and an ordinary error through nested
/// blocks, ifs, and loops (spec.md §9 "non-local return" design note).
#[derive(Debug)]
pub enum Unwind {
    Return(Object),
    Error(RuntimeError),
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Unwind::Error(error)
    }
}
