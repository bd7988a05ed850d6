//! Lexer for CREATE TABLE statements.

use std::iter::Peekable;
use std::str::Chars;

/// DDL token types. Only the two anchor keywords are distinguished;
/// everything else in a column definition is an identifier so the
/// constraint tail can be reassembled verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Matched case-sensitively: the upstream generator always emits
    // the anchor keywords in upper case.
    Create,
    Table,

    Ident(String),
    Str(String),
    Num(String),

    LParen,
    RParen,
    Comma,
    Semicolon,

    Eof,
}

impl Token {
    /// Raw text form, used when collecting a constraint tail.
    pub fn text(&self) -> String {
        match self {
            Token::Create => "CREATE".to_string(),
            Token::Table => "TABLE".to_string(),
            Token::Ident(s) => s.clone(),
            Token::Str(s) => format!("'{}'", s),
            Token::Num(n) => n.clone(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::Comma => ",".to_string(),
            Token::Semicolon => ";".to_string(),
            Token::Eof => String::new(),
        }
    }
}

/// DDL lexer.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    current_char: Option<char>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut chars = input.chars().peekable();
        let current_char = chars.next();
        Self { chars, current_char }
    }

    fn advance(&mut self) {
        self.current_char = self.chars.next();
    }

    fn peek(&mut self) -> Option<&char> {
        self.chars.peek()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.current_char {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.current_char {
            if c == '\n' {
                self.advance();
                break;
            }
            self.advance();
        }
    }

    fn skip_block_comment(&mut self) {
        self.advance(); // skip *
        while let Some(c) = self.current_char {
            if c == '*' {
                self.advance();
                if self.current_char == Some('/') {
                    self.advance();
                    break;
                }
            } else {
                self.advance();
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut ident = String::new();
        while let Some(c) = self.current_char {
            if c.is_alphanumeric() || c == '_' {
                ident.push(c);
                self.advance();
            } else {
                break;
            }
        }
        ident
    }

    fn read_quoted_identifier(&mut self, quote: char) -> String {
        self.advance(); // skip opening quote
        let mut ident = String::new();
        while let Some(c) = self.current_char {
            if c == quote {
                // Doubled quote is an escaped quote
                if self.peek() == Some(&quote) {
                    ident.push(c);
                    self.advance();
                    self.advance();
                } else {
                    self.advance(); // skip closing quote
                    break;
                }
            } else {
                ident.push(c);
                self.advance();
            }
        }
        ident
    }

    fn read_string(&mut self) -> String {
        self.advance(); // skip opening quote
        let mut s = String::new();
        while let Some(c) = self.current_char {
            if c == '\'' {
                if self.peek() == Some(&'\'') {
                    s.push(c);
                    self.advance();
                    self.advance();
                } else {
                    self.advance(); // skip closing quote
                    break;
                }
            } else {
                s.push(c);
                self.advance();
            }
        }
        s
    }

    fn read_number(&mut self) -> String {
        let mut num = String::new();
        let mut has_dot = false;
        while let Some(c) = self.current_char {
            if c.is_ascii_digit() {
                num.push(c);
                self.advance();
            } else if c == '.' && !has_dot {
                has_dot = true;
                num.push(c);
                self.advance();
            } else {
                break;
            }
        }
        num
    }

    fn keyword_or_ident(&self, s: &str) -> Token {
        match s {
            "CREATE" => Token::Create,
            "TABLE" => Token::Table,
            _ => Token::Ident(s.to_string()),
        }
    }

    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace();

            match self.current_char {
                None => return Token::Eof,

                Some('-') => {
                    if self.peek() == Some(&'-') {
                        self.skip_line_comment();
                        continue;
                    }
                    self.advance();
                    continue; // stray dash
                }

                Some('/') => {
                    if self.peek() == Some(&'*') {
                        self.advance();
                        self.skip_block_comment();
                    } else {
                        self.advance();
                    }
                    continue;
                }

                Some('#') => {
                    self.skip_line_comment();
                    continue;
                }

                Some('(') => {
                    self.advance();
                    return Token::LParen;
                }
                Some(')') => {
                    self.advance();
                    return Token::RParen;
                }
                Some(',') => {
                    self.advance();
                    return Token::Comma;
                }
                Some(';') => {
                    self.advance();
                    return Token::Semicolon;
                }

                Some('"') => {
                    let ident = self.read_quoted_identifier('"');
                    return Token::Ident(ident);
                }
                Some('`') => {
                    let ident = self.read_quoted_identifier('`');
                    return Token::Ident(ident);
                }
                Some('[') => {
                    // SQL Server style [identifier]
                    self.advance();
                    let mut ident = String::new();
                    while let Some(c) = self.current_char {
                        if c == ']' {
                            self.advance();
                            break;
                        }
                        ident.push(c);
                        self.advance();
                    }
                    return Token::Ident(ident);
                }

                Some('\'') => {
                    let s = self.read_string();
                    return Token::Str(s);
                }

                Some(c) if c.is_ascii_digit() => {
                    return Token::Num(self.read_number());
                }

                Some(c) if c.is_alphabetic() || c == '_' => {
                    let ident = self.read_identifier();
                    return self.keyword_or_ident(&ident);
                }

                Some(_) => {
                    // Skip unknown characters
                    self.advance();
                    continue;
                }
            }
        }
    }

    /// Collect all tokens.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            if token == Token::Eof {
                tokens.push(token);
                break;
            }
            tokens.push(token);
        }
        tokens
    }
}
