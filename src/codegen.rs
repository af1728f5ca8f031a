//! Code generation: lower the expression tree into three-address IR.
//!
//! The walk is post-order. Each visited node leaves exactly one register on
//! an explicit evaluation stack; a binary node pops its two operands (right
//! first) and pushes the register holding its result. Value loads and
//! operator temporaries draw their ids from one counter starting at 1.

use crate::ast::AstNode;
use crate::error::{CompileError, CompileResult};
use crate::ir::{Instruction, IrProgram, Register, RegisterKind};

/// Lower `root` into a complete IR program.
pub fn generate(root: &AstNode) -> CompileResult<IrProgram> {
  CodeGenerator::new().generate(root)
}

/// Per-translation state. Create a fresh generator for every expression.
pub struct CodeGenerator {
  instructions: Vec<Instruction>,
  registers: Vec<Register>,
  next_id: usize,
}

impl Default for CodeGenerator {
  fn default() -> Self {
    Self::new()
  }
}

impl CodeGenerator {
  pub fn new() -> Self {
    Self {
      instructions: Vec::new(),
      registers: Vec::new(),
      next_id: 1,
    }
  }

  pub fn generate(mut self, root: &AstNode) -> CompileResult<IrProgram> {
    self.emit_expr(root)?;

    let result = self.pop_register()?;
    if !self.registers.is_empty() {
      return Err(CompileError::internal(format!(
        "{} registers left on the stack after generation",
        self.registers.len() + 1
      )));
    }

    Ok(IrProgram {
      instructions: self.instructions,
      result,
    })
  }

  fn emit_expr(&mut self, node: &AstNode) -> CompileResult<()> {
    match node {
      AstNode::Var { name } => {
        let dest = self.alloc(RegisterKind::Value);
        self.emit(Instruction::LoadVar {
          dest,
          name: name.clone(),
        });
      }
      AstNode::Num { value } => {
        let dest = self.alloc(RegisterKind::Value);
        self.emit(Instruction::LoadConst {
          dest,
          value: *value,
        });
      }
      AstNode::Binary { op, lhs, rhs } => {
        // Left strictly before right; the order is visible in the emitted ids.
        self.emit_expr(lhs)?;
        self.emit_expr(rhs)?;
        let rhs = self.pop_register()?;
        let lhs = self.pop_register()?;
        let dest = self.alloc(RegisterKind::Temp(*op));
        self.emit(Instruction::Binary {
          dest,
          op: *op,
          lhs,
          rhs,
        });
      }
    }
    Ok(())
  }

  fn alloc(&mut self, kind: RegisterKind) -> Register {
    let register = Register {
      kind,
      id: self.next_id,
    };
    self.next_id += 1;
    register
  }

  /// Record an instruction and leave its destination on the stack.
  fn emit(&mut self, instr: Instruction) {
    self.registers.push(instr.dest());
    self.instructions.push(instr);
  }

  fn pop_register(&mut self) -> CompileResult<Register> {
    self
      .registers
      .pop()
      .ok_or_else(|| CompileError::internal("register stack is empty"))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ast::BinaryOp;

  fn lines(root: &AstNode) -> Vec<String> {
    generate(root)
      .unwrap()
      .to_string()
      .lines()
      .map(str::to_string)
      .collect()
  }

  #[test]
  fn single_literal() {
    assert_eq!(
      lines(&AstNode::number(3.0)),
      vec!["%x1 = 3.000000", "%result = %x1"]
    );
  }

  #[test]
  fn variable_reference() {
    assert_eq!(
      lines(&AstNode::var("rate")),
      vec!["%x1 = %rate", "%result = %x1"]
    );
  }

  #[test]
  fn nested_binary_uses_one_counter() {
    let tree = AstNode::binary(
      BinaryOp::Div,
      AstNode::var("a"),
      AstNode::binary(BinaryOp::Sub, AstNode::number(1.5), AstNode::var("b")),
    );
    assert_eq!(
      lines(&tree),
      vec![
        "%x1 = %a",
        "%x2 = 1.500000",
        "%x3 = %b",
        "%subtmp4 = sub %x2 %x3",
        "%divtmp5 = div %x1 %subtmp4",
        "%result = %divtmp5",
      ]
    );
  }

  #[test]
  fn leftover_registers_are_an_internal_error() {
    let mut generator = CodeGenerator::new();
    generator.registers.push(Register {
      kind: RegisterKind::Value,
      id: 99,
    });
    let err = generator.generate(&AstNode::number(1.0)).unwrap_err();
    assert!(err.is_internal());
  }

  #[test]
  fn fresh_generators_do_not_share_ids() {
    let tree = AstNode::binary(BinaryOp::Add, AstNode::var("x"), AstNode::var("y"));
    assert_eq!(generate(&tree).unwrap(), generate(&tree).unwrap());
  }
}
