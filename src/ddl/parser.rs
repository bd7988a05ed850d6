//! Parser extracting table definitions from CREATE TABLE text.

use super::lexer::{Lexer, Token};
use crate::ast::{Column, Table};

/// Parse DDL text into the tables it declares.
///
/// Scans for `CREATE TABLE <name> ( ... )` statements left to right,
/// non-overlapping. A failed anchor (missing name or opening paren)
/// resumes the scan at the current token, so a statement embedded in
/// other text still matches; an unbalanced body drops that statement.
/// Input with no match yields an empty list. Duplicate table names
/// pass through untouched.
pub fn parse_ddl(input: &str) -> Vec<Table> {
    // The last statement does not need a terminator on input.
    let input = format!("{input};");
    let mut lexer = Lexer::new(&input);
    let tokens = lexer.tokenize();
    Parser::new(tokens).parse()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn parse(&mut self) -> Vec<Table> {
        let mut tables = Vec::new();

        while self.current() != &Token::Eof {
            if self.current() == &Token::Create {
                self.advance();
                if self.current() == &Token::Table {
                    self.advance();
                    if let Some(table) = self.parse_create_table() {
                        tables.push(table);
                    }
                }
                // Some other CREATE statement: keep scanning from
                // here, a later anchor may still match
            } else {
                self.advance();
            }
        }

        tables
    }

    fn parse_create_table(&mut self) -> Option<Table> {
        // On a failed anchor, return without consuming further so the
        // caller resumes scanning from the current token.
        let name = match self.current() {
            Token::Ident(n) => n.clone(),
            _ => return None,
        };
        self.advance();

        if self.current() != &Token::LParen {
            return None;
        }
        self.advance();

        let mut columns = Vec::new();
        loop {
            match self.current() {
                Token::RParen => {
                    self.advance();
                    break;
                }
                Token::Comma => {
                    self.advance();
                }
                Token::Semicolon | Token::Eof => {
                    // Body never closed; drop the whole statement and
                    // resume after the terminator.
                    if self.current() == &Token::Semicolon {
                        self.advance();
                    }
                    return None;
                }
                _ => {
                    if let Some(col) = self.parse_column() {
                        columns.push(col);
                    }
                }
            }
        }

        // Table options after the closing paren (ENGINE=, etc.)
        self.skip_statement();

        Some(Table { name, columns })
    }

    /// One comma-delimited fragment of the table body. Fragments that
    /// do not start with `<name> <type>` are consumed and skipped;
    /// table-level constraint syntax is not modeled.
    fn parse_column(&mut self) -> Option<Column> {
        let name = match self.current() {
            Token::Ident(n) => n.clone(),
            _ => {
                self.skip_fragment();
                return None;
            }
        };
        self.advance();

        let mut typ = match self.current() {
            Token::Ident(t) => t.clone(),
            _ => {
                self.skip_fragment();
                return None;
            }
        };
        self.advance();

        // Length/precision arguments attach to the type token, so
        // VARCHAR(255) and DECIMAL(10,2) stay single tokens.
        if self.current() == &Token::LParen {
            typ.push('(');
            self.advance();
            let mut depth = 1;
            while depth > 0 {
                match self.current().clone() {
                    Token::LParen => {
                        depth += 1;
                        typ.push('(');
                        self.advance();
                    }
                    Token::RParen => {
                        depth -= 1;
                        typ.push(')');
                        self.advance();
                    }
                    Token::Semicolon | Token::Eof => return None,
                    tok => {
                        typ.push_str(&tok.text());
                        self.advance();
                    }
                }
            }
        }

        // Everything up to the next top-level comma is the
        // constraint tail.
        let mut tail: Vec<String> = Vec::new();
        let mut depth = 0usize;
        loop {
            match self.current().clone() {
                Token::RParen if depth == 0 => break,
                Token::Comma if depth == 0 => break,
                Token::Semicolon | Token::Eof => break,
                Token::LParen => {
                    depth += 1;
                    tail.push("(".to_string());
                    self.advance();
                }
                Token::RParen => {
                    depth -= 1;
                    tail.push(")".to_string());
                    self.advance();
                }
                tok => {
                    tail.push(tok.text());
                    self.advance();
                }
            }
        }

        let constraints = if tail.is_empty() {
            "None".to_string()
        } else {
            tail.join(" ")
        };

        Some(Column { name, typ, constraints })
    }

    /// Consume the rest of a body fragment up to the next top-level
    /// comma or closing paren.
    fn skip_fragment(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.current() {
                Token::RParen if depth == 0 => break,
                Token::Comma if depth == 0 => break,
                Token::Semicolon | Token::Eof => break,
                Token::LParen => {
                    depth += 1;
                    self.advance();
                }
                Token::RParen => {
                    depth -= 1;
                    self.advance();
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    fn skip_statement(&mut self) {
        while !matches!(self.current(), Token::Semicolon | Token::Eof) {
            self.advance();
        }
        if self.current() == &Token::Semicolon {
            self.advance();
        }
    }
}
