use std::fmt;

use crate::ast::Node;
use crate::config::Backend;
use crate::lexer::lex;
use crate::parser::{SyntaxError, parse};
use crate::sem::{SemanticError, check};
use crate::{c, interpreter, lisp, wat};


#[derive(Debug, PartialEq, Clone, Copy)]
pub enum CompileError {
    Syntax(SyntaxError),
    Semantic(SemanticError),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CompileError::Syntax(err) => write!(f, "{}", err),
            CompileError::Semantic(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompileError::Syntax(err) => Some(err),
            CompileError::Semantic(err) => Some(err),
        }
    }
}

impl From<SyntaxError> for CompileError {
    fn from(err: SyntaxError) -> CompileError { CompileError::Syntax(err) }
}

impl From<SemanticError> for CompileError {
    fn from(err: SemanticError) -> CompileError { CompileError::Semantic(err) }
}

/// Lexes, parses and checks `input`.
pub fn front_end<'a>(input: &'a str) -> Result<Node<'a>, CompileError> {
    let tokens = lex(input);
    let prog = parse(&tokens)?;
    check(&prog)?;
    Ok(prog)
}

/// Renders a checked program through `backend`.
pub fn translate(prog: &Node, backend: Backend) -> Result<String, CompileError> {
    let out = match backend {
        Backend::Eval => interpreter::eval(prog)?.to_string(),
        Backend::Lisp => lisp::emit_lisp(prog),
        Backend::C => c::emit_c(prog),
        Backend::Wat => wat::emit_wat(prog),
    };
    Ok(out)
}

pub fn compile(input: &str, backend: Backend) -> Result<String, CompileError> {
    translate(&front_end(input)?, backend)
}
