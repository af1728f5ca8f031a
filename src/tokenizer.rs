//! Lexical analysis: a pull-based token stream over one input line.
//!
//! The parser asks for one token at a time through [`Lexer::next_token`]; each
//! call scans from the cursor to the next token boundary and nothing is
//! buffered. Once the line is exhausted every further call yields `Eof`.

use std::fmt;

use crate::error::{CompileError, CompileResult};

/// Kinds of tokens recognised by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
  Number,
  Identifier,
  Plus,
  Minus,
  Mul,
  Div,
  LeftParen,
  RightParen,
  Eof,
}

impl TokenKind {
  /// Spelling used in diagnostics.
  pub fn describe(self) -> &'static str {
    match self {
      TokenKind::Number => "number",
      TokenKind::Identifier => "identifier",
      TokenKind::Plus => "+",
      TokenKind::Minus => "-",
      TokenKind::Mul => "*",
      TokenKind::Div => "/",
      TokenKind::LeftParen => "(",
      TokenKind::RightParen => ")",
      TokenKind::Eof => "EOF",
    }
  }
}

/// A single token. `text` is only present for numbers and identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
  pub kind: TokenKind,
  pub text: Option<&'a str>,
  pub loc: usize,
}

impl<'a> Token<'a> {
  fn punct(kind: TokenKind, loc: usize) -> Self {
    Self {
      kind,
      text: None,
      loc,
    }
  }

  fn literal(kind: TokenKind, text: &'a str, loc: usize) -> Self {
    Self {
      kind,
      text: Some(text),
      loc,
    }
  }
}

impl fmt::Display for Token<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.text {
      Some(text) => write!(f, "{:?}({text})@{}", self.kind, self.loc),
      None => write!(f, "{:?}@{}", self.kind, self.loc),
    }
  }
}

/// Cursor over a single line of input.
pub struct Lexer<'a> {
  input: &'a str,
  pos: usize,
}

impl<'a> Lexer<'a> {
  pub fn new(input: &'a str) -> Self {
    Self { input, pos: 0 }
  }

  /// Scan the next token, skipping whitespace.
  pub fn next_token(&mut self) -> CompileResult<Token<'a>> {
    self.skip_while(is_space);

    let Some(&c) = self.input.as_bytes().get(self.pos) else {
      return Ok(Token::punct(TokenKind::Eof, self.input.len()));
    };

    if c.is_ascii_digit() {
      return Ok(self.read_number());
    }

    if c.is_ascii_alphabetic() {
      return Ok(self.read_identifier());
    }

    let kind = match c {
      b'+' => TokenKind::Plus,
      b'-' => TokenKind::Minus,
      b'*' => TokenKind::Mul,
      b'/' => TokenKind::Div,
      b'(' => TokenKind::LeftParen,
      b')' => TokenKind::RightParen,
      _ => return Err(CompileError::lex(self.input, self.pos)),
    };
    let token = Token::punct(kind, self.pos);
    self.pos += 1;
    Ok(token)
  }

  /// Digits, optionally followed by `.` and more digits. The fraction may be
  /// empty (`1.`); exponents and leading dots are not part of the syntax.
  fn read_number(&mut self) -> Token<'a> {
    let start = self.pos;
    self.skip_while(|b| b.is_ascii_digit());
    if self.input.as_bytes().get(self.pos) == Some(&b'.') {
      self.pos += 1;
      self.skip_while(|b| b.is_ascii_digit());
    }
    Token::literal(TokenKind::Number, &self.input[start..self.pos], start)
  }

  fn read_identifier(&mut self) -> Token<'a> {
    let start = self.pos;
    self.skip_while(|b| b.is_ascii_alphanumeric() || b == b'_');
    Token::literal(TokenKind::Identifier, &self.input[start..self.pos], start)
  }

  fn skip_while(&mut self, pred: impl Fn(u8) -> bool) {
    let bytes = self.input.as_bytes();
    while self.pos < bytes.len() && pred(bytes[self.pos]) {
      self.pos += 1;
    }
  }
}

/// ASCII whitespace plus vertical tab, matching C's `isspace`.
fn is_space(b: u8) -> bool {
  b.is_ascii_whitespace() || b == 0x0b
}

/// Lex the whole line into a vector terminated by an `Eof` marker.
pub fn tokenize(input: &str) -> CompileResult<Vec<Token<'_>>> {
  let mut lexer = Lexer::new(input);
  let mut tokens = Vec::new();
  loop {
    let token = lexer.next_token()?;
    let done = token.kind == TokenKind::Eof;
    tokens.push(token);
    if done {
      return Ok(tokens);
    }
  }
}

/// Human-friendly description used in diagnostics.
pub fn describe_token(token: &Token) -> String {
  match token.text {
    Some(text) => text.to_string(),
    None => token.kind.describe().to_string(),
  }
}
