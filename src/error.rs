//! Shared error type for the translation pipeline.
//!
//! Every stage reports through `CompileError`. Lexer and parser failures are
//! user-facing and end the current line; `Internal` marks a broken invariant
//! inside the generator and is never produced from well-formed parser output.

use snafu::Snafu;

pub type CompileResult<T> = Result<T, CompileError>;

#[derive(Debug, Clone, PartialEq, Snafu)]
pub enum CompileError {
  #[snafu(display("lex error at position {position}: character '{character}'"))]
  Lex { position: usize, character: char },

  #[snafu(display("parse error: {reason}"))]
  Parse { position: usize, reason: String },

  #[snafu(display("internal error: {message}"))]
  Internal { message: String },
}

impl CompileError {
  /// Unrecognised character at byte offset `loc` of `line`.
  ///
  /// The reported position counts characters, not bytes, so a stray multi-byte
  /// character still points at the right column.
  pub fn lex(line: &str, loc: usize) -> Self {
    let safe_loc = loc.min(line.len());
    let character = line[safe_loc..].chars().next().unwrap_or('\0');
    Self::Lex {
      position: line[..safe_loc].chars().count(),
      character,
    }
  }

  pub fn parse(position: usize, reason: impl Into<String>) -> Self {
    Self::Parse {
      position,
      reason: reason.into(),
    }
  }

  pub fn internal(message: impl Into<String>) -> Self {
    Self::Internal {
      message: message.into(),
    }
  }

  /// Offset into the line the error points at, if it has one.
  pub fn position(&self) -> Option<usize> {
    match self {
      Self::Lex { position, .. } | Self::Parse { position, .. } => Some(*position),
      Self::Internal { .. } => None,
    }
  }

  pub fn is_internal(&self) -> bool {
    matches!(self, Self::Internal { .. })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn lex_error_reports_character_and_offset() {
    let err = CompileError::lex("1 $ 2", 2);
    assert_eq!(
      err,
      CompileError::Lex {
        position: 2,
        character: '$'
      }
    );
    assert_eq!(err.to_string(), "lex error at position 2: character '$'");
  }

  #[test]
  fn lex_error_counts_characters_not_bytes() {
    let line = "é ?";
    let err = CompileError::lex(line, line.find('?').unwrap());
    assert_eq!(err.position(), Some(2));
  }

  #[test]
  fn parse_and_internal_errors_render_distinctly() {
    let parse = CompileError::parse(4, "expected \")\", but got \"EOF\"");
    assert_eq!(parse.to_string(), "parse error: expected \")\", but got \"EOF\"");
    assert!(!parse.is_internal());

    let internal = CompileError::internal("register stack is empty");
    assert_eq!(internal.to_string(), "internal error: register stack is empty");
    assert!(internal.is_internal());
    assert_eq!(internal.position(), None);
  }
}
