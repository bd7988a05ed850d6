//! Prisma-style schema text to model/relation conversion module.

mod lexer;
mod parser;

pub use parser::parse_model;
