#![deny(warnings)]

pub mod lexer;
pub mod ast;
pub mod parser;
pub mod sem;
pub mod interpreter;
pub mod lisp;
pub mod c;
pub mod wat;
pub mod host;
pub mod config;
pub mod driver;
