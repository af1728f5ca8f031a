//! Three-address IR emitted by the code generator.
//!
//! Every instruction defines a fresh virtual register; registers are never
//! reassigned. The text form is one instruction per line followed by a
//! `%result` line naming the register that holds the value of the whole
//! expression.

use std::fmt;

use crate::ast::BinaryOp;

/// What a register was allocated for. Decides its printed prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterKind {
  /// Literal or variable load, printed `%x<id>`.
  Value,
  /// Operator result, printed `%addtmp<id>` and friends.
  Temp(BinaryOp),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Register {
  pub kind: RegisterKind,
  pub id: usize,
}

impl fmt::Display for Register {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.kind {
      RegisterKind::Value => write!(f, "%x{}", self.id),
      RegisterKind::Temp(op) => write!(f, "%{}tmp{}", op.mnemonic(), self.id),
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
  LoadConst {
    dest: Register,
    value: f64,
  },
  LoadVar {
    dest: Register,
    name: String,
  },
  Binary {
    dest: Register,
    op: BinaryOp,
    lhs: Register,
    rhs: Register,
  },
}

impl Instruction {
  pub fn dest(&self) -> Register {
    match self {
      Instruction::LoadConst { dest, .. }
      | Instruction::LoadVar { dest, .. }
      | Instruction::Binary { dest, .. } => *dest,
    }
  }
}

impl fmt::Display for Instruction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      // Literals always print six fractional digits, integral or not.
      Instruction::LoadConst { dest, value } => write!(f, "{dest} = {value:.6}"),
      Instruction::LoadVar { dest, name } => write!(f, "{dest} = %{name}"),
      Instruction::Binary { dest, op, lhs, rhs } => {
        write!(f, "{dest} = {} {lhs} {rhs}", op.mnemonic())
      }
    }
  }
}

/// A complete translation of one expression.
#[derive(Debug, Clone, PartialEq)]
pub struct IrProgram {
  pub instructions: Vec<Instruction>,
  pub result: Register,
}

impl IrProgram {
  /// Destination registers in emission order.
  pub fn registers(&self) -> impl Iterator<Item = Register> + '_ {
    self.instructions.iter().map(Instruction::dest)
  }
}

impl fmt::Display for IrProgram {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for instr in &self.instructions {
      writeln!(f, "{instr}")?;
    }
    writeln!(f, "%result = {}", self.result)
  }
}
