//! Expression tree produced by the parser.
//!
//! Nodes are plain data: every `Binary` owns both operands and nothing is
//! shared or mutated once the tree is built.

use std::fmt;

/// Binary operators recognised by the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
  Add,
  Sub,
  Mul,
  Div,
}

impl BinaryOp {
  pub fn symbol(self) -> char {
    match self {
      Self::Add => '+',
      Self::Sub => '-',
      Self::Mul => '*',
      Self::Div => '/',
    }
  }

  /// Instruction name in the emitted IR.
  pub fn mnemonic(self) -> &'static str {
    match self {
      Self::Add => "add",
      Self::Sub => "sub",
      Self::Mul => "mul",
      Self::Div => "div",
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
  Num {
    value: f64,
  },
  /// Symbolic reference; names are not resolved against any scope.
  Var {
    name: String,
  },
  Binary {
    op: BinaryOp,
    lhs: Box<AstNode>,
    rhs: Box<AstNode>,
  },
}

impl AstNode {
  pub fn number(value: f64) -> Self {
    Self::Num { value }
  }

  pub fn var(name: impl Into<String>) -> Self {
    Self::Var { name: name.into() }
  }

  pub fn binary(op: BinaryOp, lhs: AstNode, rhs: AstNode) -> Self {
    Self::Binary {
      op,
      lhs: Box::new(lhs),
      rhs: Box::new(rhs),
    }
  }

  fn print(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    let indent = depth * 2;
    match self {
      AstNode::Num { value } => writeln!(f, "{:indent$}Num {value}", ""),
      AstNode::Var { name } => writeln!(f, "{:indent$}Var {name}", ""),
      AstNode::Binary { op, lhs, rhs } => {
        writeln!(f, "{:indent$}Binary {}", "", op.symbol())?;
        lhs.print(f, depth + 1)?;
        rhs.print(f, depth + 1)
      }
    }
  }
}

/// Indented outline, one node per line.
impl fmt::Display for AstNode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.print(f, 0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn operator_table_is_consistent() {
    let ops = [BinaryOp::Add, BinaryOp::Sub, BinaryOp::Mul, BinaryOp::Div];
    let symbols: String = ops.iter().map(|op| op.symbol()).collect();
    let mnemonics: Vec<_> = ops.iter().map(|op| op.mnemonic()).collect();
    assert_eq!(symbols, "+-*/");
    assert_eq!(mnemonics, vec!["add", "sub", "mul", "div"]);
  }

  #[test]
  fn outline_nests_operands() {
    let tree = AstNode::binary(
      BinaryOp::Sub,
      AstNode::var("a"),
      AstNode::binary(BinaryOp::Mul, AstNode::number(2.0), AstNode::var("b")),
    );
    assert_eq!(
      tree.to_string(),
      "Binary -\n  Var a\n  Binary *\n    Num 2\n    Var b\n"
    );
  }
}
