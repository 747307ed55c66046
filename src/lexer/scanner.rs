//! Lexer/Scanner implementation for the Sierra language
//!
//! This module implements lexical analysis, converting source code into tokens.
//! Only ASCII whitespace is insignificant; the language has no comment syntax.

use crate::error::{SierraError, SierraResult, SourceLocation};
use super::token::{Token, TokenType, Keyword};

/// Lexer for Sierra source code
pub struct Lexer {
    source: Vec<char>,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    /// Byte offset of `start`
    start_offset: usize,
    /// Byte offset of `current`
    offset: usize,
    line: usize,
    column: usize,
    filename: Option<String>,
}

impl Lexer {
    /// Create a new lexer
    pub fn new(source: &str, filename: Option<&str>) -> Self {
        Self {
            source: source.chars().collect(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
            start_offset: 0,
            offset: 0,
            line: 1,
            column: 1,
            filename: filename.map(|s| s.to_string()),
        }
    }

    /// Tokenize the source code
    ///
    /// The returned sequence always ends with a single `Eof` token.
    #[tracing::instrument(skip_all, fields(source_len = self.source.len()))]
    pub fn tokenize(&mut self) -> SierraResult<Vec<Token>> {
        while !self.is_at_end() {
            self.start = self.current;
            self.start_offset = self.offset;
            self.scan_token()?;
        }

        self.tokens.push(Token::new(
            TokenType::Eof,
            String::new(),
            self.current_location(),
        ));

        tracing::debug!(token_count = self.tokens.len(), "tokenized source");
        Ok(std::mem::take(&mut self.tokens))
    }

    /// Scan a single token
    fn scan_token(&mut self) -> SierraResult<()> {
        let c = self.advance();

        match c {
            '\n' => {
                self.line += 1;
                self.column = 1;
                Ok(())
            }

            // Remaining whitespace (skip)
            c if c.is_ascii_whitespace() => Ok(()),

            // Single-character tokens
            '(' => self.add_token(TokenType::LeftParen),
            ')' => self.add_token(TokenType::RightParen),
            '[' => self.add_token(TokenType::LeftBracket),
            ']' => self.add_token(TokenType::RightBracket),
            ',' => self.add_token(TokenType::Comma),
            ';' => self.add_token(TokenType::Semicolon),
            '=' => self.add_token(TokenType::Equals),

            // Two-character tokens, matched greedily
            '.' => {
                if self.match_char('.') {
                    self.add_token(TokenType::DotDot)
                } else {
                    self.add_token(TokenType::Dot)
                }
            }

            ':' => {
                if self.match_char('=') {
                    self.add_token(TokenType::ColonAssign)
                } else {
                    self.add_token(TokenType::Colon)
                }
            }

            c if c.is_ascii_digit() => self.scan_number(),

            c if c.is_ascii_alphabetic() || c == '_' => self.scan_identifier(),

            _ => Err(SierraError::lex_error(c, self.start_location())),
        }
    }

    /// Scan a number literal; `_` is a digit-group separator kept in the lexeme
    fn scan_number(&mut self) -> SierraResult<()> {
        while self.peek().is_ascii_digit() || self.peek() == '_' {
            self.advance();
        }

        self.add_token(TokenType::Number)
    }

    /// Scan an identifier or keyword
    fn scan_identifier(&mut self) -> SierraResult<()> {
        while self.peek().is_ascii_alphanumeric() || self.peek() == '_' {
            self.advance();
        }

        let lexeme: String = self.source[self.start..self.current].iter().collect();

        let token_type = if let Some(keyword) = Keyword::from_str(&lexeme) {
            TokenType::Keyword(keyword)
        } else {
            TokenType::Identifier
        };

        self.add_token(token_type)
    }

    /// Add a token to the token list
    fn add_token(&mut self, token_type: TokenType) -> SierraResult<()> {
        let lexeme: String = self.source[self.start..self.current].iter().collect();
        let location = self.start_location();
        self.tokens.push(Token::new(token_type, lexeme, location));
        Ok(())
    }

    /// Advance to the next character
    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        self.offset += c.len_utf8();
        self.column += 1;
        c
    }

    /// Check if the next character matches and consume it if so
    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.source[self.current] != expected {
            false
        } else {
            self.advance();
            true
        }
    }

    /// Peek at the current character without consuming it
    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.source[self.current]
        }
    }

    /// Check if we've reached the end of the source
    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    /// Location of the first character of the token being scanned.
    /// Tokens never span lines, so the column is recovered from the token width.
    fn start_location(&self) -> SourceLocation {
        SourceLocation::new(
            self.line,
            self.column - (self.current - self.start),
            self.start_offset,
            self.filename.clone(),
        )
    }

    /// Get the current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column, self.offset, self.filename.clone())
    }
}
