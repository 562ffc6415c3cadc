use std::fmt;

use crate::error::Error;
use crate::Word;

/// Every instruction is one opcode cell, optionally followed by a single
/// operand cell written `oo` below.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
  /// | Operation | Semantics/RTL      | Assembly |
  /// |-----------|--------------------|----------|
  /// | Break     | `(stop execution)` | `brk`    |
  Brk = 0,

  /// | Operation             | Semantics/RTL | Assembly  |
  /// |-----------------------|---------------|-----------|
  /// | Load Accumulator      | `a ← oo`      | `lda #oo` |
  Lda = 1,

  /// | Operation | Semantics/RTL | Assembly  |
  /// |-----------|---------------|-----------|
  /// | Add       | `a ← a + oo`  | `adc #oo` |
  Adc = 2,

  /// | Operation         | Semantics/RTL | Assembly |
  /// |-------------------|---------------|----------|
  /// | Store Accumulator | `m[oo] ← a`   | `sta oo` |
  Sta = 3,

  /// | Operation | Semantics/RTL | Assembly  |
  /// |-----------|---------------|-----------|
  /// | Load X    | `x ← oo`      | `ldx #oo` |
  Ldx = 4,

  /// | Operation   | Semantics/RTL | Assembly |
  /// |-------------|---------------|----------|
  /// | Increment X | `x ← x + 1`   | `inx`    |
  Inx = 5,

  /// | Operation | Semantics/RTL          | Assembly  |
  /// |-----------|------------------------|-----------|
  /// | Compare Y | `Z ← (oo == y)`        | `cmy #oo` |
  Cmy = 6,

  /// The displacement is relative to the following instruction.
  ///
  /// | Operation        | Semantics/RTL           | Assembly |
  /// |------------------|-------------------------|----------|
  /// | Branch Not Equal | `if !Z : pc ← pc + oo`  | `bne oo` |
  Bne = 7,

  /// | Operation         | Semantics/RTL | Assembly  |
  /// |-------------------|---------------|-----------|
  /// | Store Indexed     | `m[x] ← a`    | `sta (x)` |
  StaX = 8,

  /// | Operation   | Semantics/RTL | Assembly |
  /// |-------------|---------------|----------|
  /// | Decrement Y | `y ← y − 1`   | `dey`    |
  Dey = 9,

  /// | Operation | Semantics/RTL | Assembly |
  /// |-----------|---------------|----------|
  /// | Load Y    | `y ← m[oo]`   | `ldy oo` |
  Ldy = 10,

  /// | Operation      | Semantics/RTL                          | Assembly |
  /// |----------------|----------------------------------------|----------|
  /// | Jump to Sub    | `m[sp] ← pc; sp ← sp − 1; pc ← oo`     | `jsr oo` |
  Jsr = 11,

  /// See [`StackDiscipline`](crate::config::StackDiscipline) for where the
  /// return address is read from.
  ///
  /// | Operation   | Semantics/RTL                 | Assembly |
  /// |-------------|-------------------------------|----------|
  /// | Return      | `sp ← sp + 1; pc ← m[sp]`     | `rts`    |
  Rts = 12,
}

impl Opcode {
  pub const ALL: [Opcode; 13] = [
    Opcode::Brk,
    Opcode::Lda,
    Opcode::Adc,
    Opcode::Sta,
    Opcode::Ldx,
    Opcode::Inx,
    Opcode::Cmy,
    Opcode::Bne,
    Opcode::StaX,
    Opcode::Dey,
    Opcode::Ldy,
    Opcode::Jsr,
    Opcode::Rts,
  ];

  pub const fn code(self) -> Word {
    self as u8 as Word
  }

  /// Number of cells following the opcode cell
  pub const fn operand_cells(self) -> Word {
    match self {
      Opcode::Lda
      | Opcode::Adc
      | Opcode::Sta
      | Opcode::Ldx
      | Opcode::Cmy
      | Opcode::Bne
      | Opcode::Ldy
      | Opcode::Jsr => 1,
      Opcode::Brk | Opcode::Inx | Opcode::StaX | Opcode::Dey | Opcode::Rts => 0,
    }
  }

  pub const fn mnemonic(self) -> &'static str {
    match self {
      Opcode::Brk => "BRK",
      Opcode::Lda => "LDA",
      Opcode::Adc => "ADC",
      Opcode::Sta => "STA",
      Opcode::Ldx => "LDX",
      Opcode::Inx => "INX",
      Opcode::Cmy => "CMY",
      Opcode::Bne => "BNE",
      Opcode::StaX => "STAX",
      Opcode::Dey => "DEY",
      Opcode::Ldy => "LDY",
      Opcode::Jsr => "JSR",
      Opcode::Rts => "RTS",
    }
  }
}

impl TryFrom<Word> for Opcode {
  type Error = Error;

  fn try_from(code: Word) -> Result<Self, Self::Error> {
    usize::try_from(code)
      .ok()
      .and_then(|i| Opcode::ALL.get(i))
      .copied()
      .ok_or(Error::InvalidOpcode(code))
  }
}

impl fmt::Display for Opcode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.mnemonic())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn codes_match_table_position() {
    for (i, op) in Opcode::ALL.iter().enumerate() {
      assert_eq!(op.code(), i as Word);
      assert_eq!(Opcode::try_from(i as Word), Ok(*op));
    }
  }

  #[test]
  fn unmapped_codes() {
    assert_eq!(Opcode::try_from(13), Err(Error::InvalidOpcode(13)));
    assert_eq!(Opcode::try_from(99), Err(Error::InvalidOpcode(99)));
    assert_eq!(Opcode::try_from(-1), Err(Error::InvalidOpcode(-1)));
  }

  #[test]
  fn operand_cells() {
    let with_operand: Vec<_> = Opcode::ALL
      .into_iter()
      .filter(|op| op.operand_cells() == 1)
      .map(Opcode::mnemonic)
      .collect();
    assert_eq!(
      with_operand,
      ["LDA", "ADC", "STA", "LDX", "CMY", "BNE", "LDY", "JSR"]
    );
  }

  #[test]
  fn display() {
    assert_eq!(Opcode::StaX.to_string(), "STAX");
    assert_eq!(format!("{:>4}", Opcode::Rts.mnemonic()), " RTS");
  }
}
