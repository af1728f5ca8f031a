//! Recursive-descent parser producing an expression AST.
//!
//! Two precedence levels plus atoms:
//!
//! ```text
//! add_sub := mul_div ( ('+' | '-') mul_div )*
//! mul_div := atom    ( ('*' | '/') atom )*
//! atom    := Number | Identifier | '(' add_sub ')'
//! ```
//!
//! The parser keeps exactly one lookahead token and pulls the next one from
//! the lexer only when the current one is eaten. Operator chains are folded
//! iteratively so both levels are left-associative.

use crate::ast::{AstNode, BinaryOp};
use crate::error::{CompileError, CompileResult};
use crate::tokenizer::{Lexer, Token, TokenKind, describe_token};

/// Deepest parenthesis nesting accepted on one line.
pub const MAX_PAREN_DEPTH: usize = 256;

/// Deepest expression tree accepted on one line. Code generation and the
/// tree outline recurse once per level, so this bounds their stack use too.
pub const MAX_TREE_DEPTH: usize = 1024;

/// Parse one complete line. Trailing tokens are an error.
pub fn parse(source: &str) -> CompileResult<AstNode> {
  Parser::new(Lexer::new(source))?.parse()
}

pub struct Parser<'a> {
  lexer: Lexer<'a>,
  token: Token<'a>,
  parens: usize,
}

impl<'a> Parser<'a> {
  /// Prime the lookahead with the first token of the line.
  pub fn new(mut lexer: Lexer<'a>) -> CompileResult<Self> {
    let token = lexer.next_token()?;
    Ok(Self {
      lexer,
      token,
      parens: 0,
    })
  }

  /// Parse an expression that must span the whole line.
  pub fn parse(mut self) -> CompileResult<AstNode> {
    if self.token.kind == TokenKind::Eof {
      return Err(CompileError::parse(self.token.loc, "expression is empty"));
    }

    let node = self.parse_add_sub()?;

    if self.token.kind != TokenKind::Eof {
      let reason = match self.token.kind {
        TokenKind::RightParen => "unmatched \")\"".to_string(),
        _ => format!("unexpected token \"{}\"", describe_token(&self.token)),
      };
      return Err(CompileError::parse(self.token.loc, reason));
    }

    Ok(node)
  }

  pub fn parse_add_sub(&mut self) -> CompileResult<AstNode> {
    self.add_sub().map(|(node, _)| node)
  }

  // The helpers below return each subtree with its depth.

  fn add_sub(&mut self) -> CompileResult<(AstNode, usize)> {
    let (mut node, mut depth) = self.mul_div()?;

    loop {
      let op = match self.token.kind {
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        _ => break,
      };

      let loc = self.token.loc;
      self.eat(self.token.kind)?;
      let (rhs, rhs_depth) = self.mul_div()?;
      depth = combined_depth(depth, rhs_depth, loc)?;
      node = AstNode::binary(op, node, rhs);
    }

    Ok((node, depth))
  }

  fn mul_div(&mut self) -> CompileResult<(AstNode, usize)> {
    let (mut node, mut depth) = self.atom()?;

    loop {
      let op = match self.token.kind {
        TokenKind::Mul => BinaryOp::Mul,
        TokenKind::Div => BinaryOp::Div,
        _ => break,
      };

      let loc = self.token.loc;
      self.eat(self.token.kind)?;
      let (rhs, rhs_depth) = self.atom()?;
      depth = combined_depth(depth, rhs_depth, loc)?;
      node = AstNode::binary(op, node, rhs);
    }

    Ok((node, depth))
  }

  fn atom(&mut self) -> CompileResult<(AstNode, usize)> {
    match self.token.kind {
      TokenKind::Number => {
        let (text, loc) = self.literal_text()?;
        let value = text.parse::<f64>().map_err(|err| {
          CompileError::parse(loc, format!("invalid number \"{text}\": {err}"))
        })?;
        if !value.is_finite() {
          return Err(CompileError::parse(
            loc,
            format!("number literal out of range: \"{text}\""),
          ));
        }
        self.eat(TokenKind::Number)?;
        Ok((AstNode::number(value), 1))
      }
      TokenKind::Identifier => {
        let (name, _) = self.literal_text()?;
        self.eat(TokenKind::Identifier)?;
        Ok((AstNode::var(name), 1))
      }
      TokenKind::LeftParen => {
        if self.parens == MAX_PAREN_DEPTH {
          return Err(CompileError::parse(
            self.token.loc,
            "expression nested too deeply",
          ));
        }
        self.parens += 1;
        self.eat(TokenKind::LeftParen)?;
        let inner = self.add_sub()?;
        self.eat(TokenKind::RightParen)?;
        self.parens -= 1;
        Ok(inner)
      }
      _ => Err(CompileError::parse(
        self.token.loc,
        format!(
          "expected an expression, but got \"{}\"",
          describe_token(&self.token)
        ),
      )),
    }
  }

  /// Consume the current token if it has the expected kind and pull the next one.
  fn eat(&mut self, expected: TokenKind) -> CompileResult<()> {
    if self.token.kind != expected {
      return Err(CompileError::parse(
        self.token.loc,
        format!(
          "unexpected token: expected \"{}\", but got \"{}\"",
          expected.describe(),
          describe_token(&self.token)
        ),
      ));
    }
    self.token = self.lexer.next_token()?;
    Ok(())
  }

  fn literal_text(&self) -> CompileResult<(&'a str, usize)> {
    let text = self
      .token
      .text
      .ok_or_else(|| CompileError::internal("literal token missing text"))?;
    Ok((text, self.token.loc))
  }
}

/// Depth of a new binary node over operands of the given depths.
fn combined_depth(lhs: usize, rhs: usize, loc: usize) -> CompileResult<usize> {
  let depth = lhs.max(rhs) + 1;
  if depth > MAX_TREE_DEPTH {
    return Err(CompileError::parse(loc, "expression nested too deeply"));
  }
  Ok(depth)
}
