//! Lexer (tokenizer) for the diagram DSL.

use crate::error::{Result, VoltflowError};

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The token's text (quotes stripped for strings)
    pub text: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

/// Token types in the DSL.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// A bare word: keyword, id, designation, voltage class, flag
    Word,
    /// A directive (starts with '.')
    Directive,
    /// A double-quoted string
    Str,
    /// Equals sign '='
    Equals,
    /// Newline
    Newline,
    /// End of file
    Eof,
}

/// Lexer for tokenizing diagram DSL input.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
    /// Position just past the last word, for telling `key=value` apart
    /// from a word that starts with `=`
    word_end: Option<(usize, usize)>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
            word_end: None,
        }
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace_and_comments();

        let ch = match self.chars.peek().copied() {
            Some(ch) => ch,
            None => return Ok(self.token(TokenKind::Eof, String::new(), self.line, self.column)),
        };

        let start_column = self.column;
        let start_line = self.line;

        let token = match ch {
            '\n' => {
                self.advance();
                self.token(TokenKind::Newline, "\n".to_string(), start_line, start_column)
            }
            '=' if self.word_end == Some((start_line, start_column)) => {
                self.advance();
                self.token(TokenKind::Equals, "=".to_string(), start_line, start_column)
            }
            '"' => {
                self.advance();
                let text = self.read_string(start_line, start_column)?;
                self.token(TokenKind::Str, text, start_line, start_column)
            }
            _ => {
                let text = self.read_word();
                let is_directive = text.len() > 1
                    && text.starts_with('.')
                    && text[1..].chars().next().is_some_and(|c| c.is_ascii_alphabetic());
                let kind = if is_directive {
                    TokenKind::Directive
                } else {
                    TokenKind::Word
                };
                self.word_end = Some((self.line, self.column));
                self.token(kind, text, start_line, start_column)
            }
        };

        Ok(token)
    }

    fn token(&self, kind: TokenKind, text: String, line: usize, column: usize) -> Token {
        Token {
            kind,
            text,
            line,
            column,
        }
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch == ' ' || ch == '\t' || ch == '\r' {
                self.advance();
            } else if ch == '#' || ch == ';' {
                // Skip comment until end of line
                while let Some(&c) = self.chars.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    fn read_word(&mut self) -> String {
        let mut text = String::new();
        while let Some(&ch) = self.chars.peek() {
            // `=` splits `key=value`; a leading `=` is part of the word (`=A1-K1`)
            if ch.is_whitespace() || ch == '"' || (ch == '=' && !text.is_empty()) {
                break;
            }
            text.push(ch);
            self.advance();
        }
        text
    }

    fn read_string(&mut self, line: usize, column: usize) -> Result<String> {
        let mut text = String::new();
        loop {
            match self.chars.peek().copied() {
                Some('"') => {
                    self.advance();
                    return Ok(text);
                }
                Some('\n') | None => {
                    return Err(VoltflowError::lexer(line, column, "unterminated string"));
                }
                Some(ch) => {
                    text.push(ch);
                    self.advance();
                }
            }
        }
    }
}
