//! Scanner for the field lines of a Prisma-style schema.
//!
//! Lines are lexed one at a time; `model`/`enum` headers and closing
//! braces are handled by the line state machine in the parser, so the
//! token classes here are exactly what a field line can contain:
//! identifiers, the `?`/`[]` type suffixes, and attribute clauses.

use std::iter::Peekable;
use std::str::Chars;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Ident(String),
    Str(String),
    /// `@name`, `@@name`, or `@name(raw argument text)`. Arguments
    /// are captured verbatim, balanced parens and quoted strings
    /// included, and picked apart later.
    Attr {
        name: String,
        block: bool,
        args: Option<String>,
    },
    Question,
    /// The `[]` array suffix.
    Brackets,
    LBrace,
    RBrace,

    Eof,
}

#[derive(Debug, thiserror::Error)]
pub enum LexError {
    #[error("Unexpected character: {0}")]
    UnexpectedChar(char),
    #[error("Unterminated string")]
    UnterminatedString,
    #[error("Unterminated attribute arguments")]
    UnterminatedArgs,
}

pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.chars.peek() {
            if c.is_whitespace() {
                self.chars.next();
            } else {
                break;
            }
        }
    }

    fn read_ident(&mut self, first: char) -> String {
        let mut s = String::from(first);
        while let Some(&c) = self.chars.peek() {
            if c.is_alphanumeric() || c == '_' {
                s.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        s
    }

    fn read_string(&mut self) -> Result<String, LexError> {
        let mut s = String::new();
        loop {
            match self.chars.next() {
                Some('"') => return Ok(s),
                Some(c) => s.push(c),
                None => return Err(LexError::UnterminatedString),
            }
        }
    }

    fn read_attr(&mut self) -> Result<Token, LexError> {
        let block = if self.chars.peek() == Some(&'@') {
            self.chars.next();
            true
        } else {
            false
        };

        let first = match self.chars.next() {
            Some(c) if c.is_alphabetic() || c == '_' => c,
            Some(c) => return Err(LexError::UnexpectedChar(c)),
            None => return Err(LexError::UnexpectedChar('@')),
        };
        let name = self.read_ident(first);

        let args = if self.chars.peek() == Some(&'(') {
            self.chars.next();
            Some(self.read_balanced_args()?)
        } else {
            None
        };

        Ok(Token::Attr { name, block, args })
    }

    /// Raw text between the attribute parens. Nested parens and
    /// quoted strings (which may contain parens) are kept intact.
    fn read_balanced_args(&mut self) -> Result<String, LexError> {
        let mut depth = 1usize;
        let mut s = String::new();
        while let Some(c) = self.chars.next() {
            match c {
                '(' => {
                    depth += 1;
                    s.push(c);
                }
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(s);
                    }
                    s.push(c);
                }
                '"' => {
                    s.push('"');
                    loop {
                        match self.chars.next() {
                            Some('"') => {
                                s.push('"');
                                break;
                            }
                            Some(c) => s.push(c),
                            None => return Err(LexError::UnterminatedString),
                        }
                    }
                }
                _ => s.push(c),
            }
        }
        Err(LexError::UnterminatedArgs)
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        let c = match self.chars.next() {
            Some(c) => c,
            None => return Ok(Token::Eof),
        };

        let tok = match c {
            '{' => Token::LBrace,
            '}' => Token::RBrace,
            '?' => Token::Question,
            '[' => {
                if self.chars.peek() == Some(&']') {
                    self.chars.next();
                    Token::Brackets
                } else {
                    return Err(LexError::UnexpectedChar(c));
                }
            }
            '/' => {
                // `//` comments run to end of line, and lines are the
                // unit of lexing here
                if self.chars.peek() == Some(&'/') {
                    while self.chars.next().is_some() {}
                    Token::Eof
                } else {
                    return Err(LexError::UnexpectedChar(c));
                }
            }
            '@' => self.read_attr()?,
            '"' => Token::Str(self.read_string()?),
            c if c.is_alphabetic() || c == '_' => Token::Ident(self.read_ident(c)),
            _ => return Err(LexError::UnexpectedChar(c)),
        };

        Ok(tok)
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token()?;
            if tok == Token::Eof {
                tokens.push(tok);
                break;
            }
            tokens.push(tok);
        }
        Ok(tokens)
    }
}
