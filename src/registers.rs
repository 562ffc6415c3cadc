use std::fmt;

use crate::flags::Flags;
use crate::Word;

/// The register file of the machine.
///
/// None of these are masked, arithmetic helpers wrap at the width of
/// [`Word`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Registers {
  a: Word,
  x: Word,
  y: Word,
  pc: Word,
  sp: Word,
  flags: Flags,
}

impl Registers {
  /// Zeroed registers with the stack pointer at `sp`
  pub fn new(sp: Word) -> Self {
    Self {
      sp,
      ..Self::default()
    }
  }

  pub fn a(&self) -> Word {
    self.a
  }

  pub fn set_a(&mut self, value: Word) {
    self.a = value;
  }

  pub fn x(&self) -> Word {
    self.x
  }

  pub fn set_x(&mut self, value: Word) {
    self.x = value;
  }

  pub fn inc_x(&mut self, step: Word) {
    self.x = self.x.wrapping_add(step);
  }

  pub fn y(&self) -> Word {
    self.y
  }

  pub fn set_y(&mut self, value: Word) {
    self.y = value;
  }

  pub fn dec_y(&mut self) {
    self.y = self.y.wrapping_sub(1);
  }

  pub fn pc(&self) -> Word {
    self.pc
  }

  pub fn set_pc(&mut self, value: Word) {
    self.pc = value;
  }

  pub fn inc_pc(&mut self, step: Word) {
    self.pc = self.pc.wrapping_add(step);
  }

  pub fn sp(&self) -> Word {
    self.sp
  }

  pub fn set_sp(&mut self, value: Word) {
    self.sp = value;
  }

  pub fn flags(&self) -> &Flags {
    &self.flags
  }

  pub fn flags_mut(&mut self) -> &mut Flags {
    &mut self.flags
  }
}

// single line, for per-instruction traces
impl fmt::Display for Registers {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "A={} X={} Y={} PC={} SP={} FL={}",
      self.a, self.x, self.y, self.pc, self.sp, self.flags
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn new() {
    let regs = Registers::new(255);
    assert_eq!(regs.a(), 0);
    assert_eq!(regs.x(), 0);
    assert_eq!(regs.y(), 0);
    assert_eq!(regs.pc(), 0);
    assert_eq!(regs.sp(), 255);
    assert_eq!(regs.flags().raw(), 0);
  }

  #[test]
  fn increments() {
    let mut regs = Registers::new(0);
    regs.inc_x(1);
    regs.inc_x(1);
    assert_eq!(regs.x(), 2);
    regs.inc_pc(5);
    regs.inc_pc(-2);
    assert_eq!(regs.pc(), 3);
    regs.dec_y();
    assert_eq!(regs.y(), -1);
  }

  #[test]
  fn arithmetic_wraps() {
    let mut regs = Registers::new(0);
    regs.set_x(Word::MAX);
    regs.inc_x(1);
    assert_eq!(regs.x(), Word::MIN);
    regs.set_y(Word::MIN);
    regs.dec_y();
    assert_eq!(regs.y(), Word::MAX);
  }

  #[test]
  fn display() {
    let mut regs = Registers::new(639);
    regs.set_a(107);
    regs.set_y(-1);
    regs.set_pc(6);
    assert_eq!(regs.to_string(), "A=107 X=0 Y=-1 PC=6 SP=639 FL=--------");
  }
}
