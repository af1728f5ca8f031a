//! Line-oriented driver around the pipeline.
//!
//! Each line gets a fresh lexer, parser and generator. A failed line is
//! reported as a single diagnostic and the loop moves on; only I/O errors on
//! the streams themselves stop it.

use std::io::{self, BufRead, Write};

use crate::{parse, tokenizer};

#[derive(Debug, Clone)]
pub struct ReplOptions {
  pub prompt: String,
  /// Dump tokens and the AST to the error stream before the IR.
  pub debug: bool,
}

impl Default for ReplOptions {
  fn default() -> Self {
    Self {
      prompt: ">>> ".to_string(),
      debug: false,
    }
  }
}

/// Run the prompt until `input` is exhausted. Returns the number of lines
/// that failed to translate.
pub fn run_prompt(
  mut input: impl BufRead,
  mut output: impl Write,
  mut errors: impl Write,
  options: &ReplOptions,
) -> io::Result<usize> {
  let mut line = String::new();
  let mut failures = 0;

  loop {
    write!(output, "{}", options.prompt)?;
    output.flush()?;

    line.clear();
    if input.read_line(&mut line)? == 0 {
      writeln!(output)?;
      return Ok(failures);
    }

    let expr = line.trim_end_matches(['\n', '\r']);
    if expr.trim().is_empty() {
      continue;
    }

    if !run_line(expr, &mut output, &mut errors, options.debug)? {
      failures += 1;
    }
  }
}

/// Translate one line, writing IR to `output` or a diagnostic to `errors`.
/// Returns whether the line translated.
pub fn run_line(
  expr: &str,
  mut output: impl Write,
  mut errors: impl Write,
  debug: bool,
) -> io::Result<bool> {
  if debug {
    dump(expr, &mut errors)?;
  }

  match crate::translate(expr) {
    Ok(ir) => {
      write!(output, "{ir}")?;
      Ok(true)
    }
    Err(err) => {
      writeln!(errors, "{err}")?;
      Ok(false)
    }
  }
}

fn dump(expr: &str, errors: &mut impl Write) -> io::Result<()> {
  // Failures are reported by the translation itself.
  if let Ok(tokens) = tokenizer::tokenize(expr) {
    let tokens: Vec<String> = tokens.iter().map(ToString::to_string).collect();
    writeln!(errors, "tokens: {}", tokens.join(" "))?;
  }
  if let Ok(ast) = parse(expr) {
    write!(errors, "ast:\n{ast}")?;
  }
  Ok(())
}
