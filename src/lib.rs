//! Crate root: wires together the translation pipeline.
//!
//! One input line flows through three small stages:
//! - `tokenizer` scans the line into a pull-based token stream.
//! - `parser` owns the grammar and builds an `ast::AstNode` tree.
//! - `codegen` walks the tree and emits the register IR described in `ir`.
//!
//! `repl` is the line-oriented driver around the pipeline and `error`
//! holds the error type shared by every stage.

pub mod ast;
pub mod codegen;
pub mod error;
pub mod ir;
pub mod parser;
pub mod repl;
pub mod tokenizer;

pub use error::{CompileError, CompileResult};
pub use ir::IrProgram;
pub use parser::parse;

/// Lex, parse and lower a single line into an IR program.
pub fn compile(line: &str) -> CompileResult<IrProgram> {
  let ast = parse(line)?;
  codegen::generate(&ast)
}

/// Translate a single line into IR text, one instruction per line.
pub fn translate(line: &str) -> CompileResult<String> {
  Ok(compile(line)?.to_string())
}
