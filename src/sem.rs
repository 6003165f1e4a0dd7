use std::fmt;

use crate::ast::{Event, Node};
use crate::lexer::{Position, Token};


#[derive(Debug, PartialEq, Clone, Copy)]
pub struct SemanticError(pub &'static str, pub Position);

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Position(line, col) = self.1;
        write!(f, "semantic error: {} at line {} col {}", self.0, line, col)
    }
}

impl std::error::Error for SemanticError {}

/// Decodes an integer literal into the `i32` range.
pub fn literal_value(tok: &Token) -> Result<i32, SemanticError> {
    tok.lexeme()
        .and_then(|s| s.parse::<i32>().ok())
        .ok_or(SemanticError("integer literal out of range", tok.position()))
}

/// Validates every literal, left to right, reporting the first one out of
/// range at its anchor.
pub fn check(p: &Node) -> Result<(), SemanticError> {
    p.try_walk(|event| match event {
        Event::Enter(node @ Node::Int(_)) => literal_value(node.anchor()).map(|_| ()),
        _ => Ok(()),
    })
}
