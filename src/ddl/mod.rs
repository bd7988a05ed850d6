//! CREATE TABLE text to table list conversion module.

mod lexer;
mod parser;

pub use parser::parse_ddl;
