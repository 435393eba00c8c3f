//! Tolerant, declaration-level TypeScript front end.
//!
//! `parse_module` turns source text into the top-level statements symbol
//! resolution works on. It never fails; anything it does not understand is
//! skipped and kept as `Statement::Other`.

mod ast;
mod lexer;
mod members;
mod parser;
mod type_expr;

pub use ast::*;
pub use lexer::{tokenize, Lexeme, Token};
pub use parser::parse_module;
