//! Processor status flags
//!
//! ```text
//! 7  bit  0
//! ---- ----
//! NVbs DIZC
//! |||| ||||
//! |||| |||+- Carry
//! |||| ||+-- Zero, result of CMY
//! |||| |+--- Interrupt disable
//! |||| +---- Decimal
//! ||++------ No effect
//! |+-------- Overflow
//! +--------- Negative
//! ```
//!
//! Only `Z` is touched by the instruction set, the rest are named so that
//! callers can set and inspect them.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// A single named bit of the status register
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
  Carry = 0b0000_0001,
  Zero = 0b0000_0010,
  InterruptDisable = 0b0000_0100,
  Decimal = 0b0000_1000,
  UnusedS = 0b0001_0000,
  UnusedB = 0b0010_0000,
  Overflow = 0b0100_0000,
  Negative = 0b1000_0000,
}

impl Flag {
  /// Every flag, from bit 7 down to bit 0
  pub const ALL: [Flag; 8] = [
    Flag::Negative,
    Flag::Overflow,
    Flag::UnusedB,
    Flag::UnusedS,
    Flag::Decimal,
    Flag::InterruptDisable,
    Flag::Zero,
    Flag::Carry,
  ];

  #[inline]
  pub const fn mask(self) -> u8 {
    self as u8
  }

  /// The one-letter name used in status dumps
  pub const fn letter(self) -> char {
    match self {
      Flag::Carry => 'C',
      Flag::Zero => 'Z',
      Flag::InterruptDisable => 'I',
      Flag::Decimal => 'D',
      Flag::UnusedS => 's',
      Flag::UnusedB => 'b',
      Flag::Overflow => 'V',
      Flag::Negative => 'N',
    }
  }
}

impl FromStr for Flag {
  type Err = ParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Flag::ALL
      .into_iter()
      .find(|flag| s.len() == 1 && s.starts_with(flag.letter()))
      .ok_or_else(|| ParseError::UnknownFlag(s.to_owned()))
  }
}

/// The 8-bit status register
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags(u8);

impl Flags {
  pub const fn new() -> Self {
    Self(0)
  }

  pub fn set(&mut self, flag: Flag) {
    self.0 |= flag.mask();
  }

  pub fn clear(&mut self, flag: Flag) {
    self.0 &= !flag.mask();
  }

  /// Set `flag` when `cond` holds, clear it otherwise
  pub fn assign(&mut self, flag: Flag, cond: bool) {
    if cond {
      self.set(flag);
    } else {
      self.clear(flag);
    }
  }

  pub const fn test(&self, flag: Flag) -> bool {
    self.0 & flag.mask() != 0
  }

  pub const fn raw(&self) -> u8 {
    self.0
  }
}

impl From<u8> for Flags {
  fn from(raw: u8) -> Self {
    Self(raw)
  }
}

// renders set flags by letter and clear ones as `-`, e.g. `------Z-`
impl fmt::Display for Flags {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for flag in Flag::ALL {
      let c = if self.test(flag) { flag.letter() } else { '-' };
      write!(f, "{c}")?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn masks_cover_every_bit_once() {
    let combined = Flag::ALL.iter().fold(0u8, |acc, flag| {
      assert_eq!(acc & flag.mask(), 0);
      acc | flag.mask()
    });
    assert_eq!(combined, 0xFF);
  }

  #[test]
  fn set_clear_test() {
    let mut flags = Flags::new();
    assert!(!flags.test(Flag::Zero));
    flags.set(Flag::Zero);
    assert!(flags.test(Flag::Zero));
    assert_eq!(flags.raw(), 0b0000_0010);
    flags.set(Flag::Negative);
    assert_eq!(flags.raw(), 0b1000_0010);
    flags.clear(Flag::Zero);
    assert!(!flags.test(Flag::Zero));
    assert_eq!(flags.raw(), 0b1000_0000);
  }

  #[test]
  fn clearing_an_unset_flag_is_a_noop() {
    let mut flags = Flags::from(0b0000_0001);
    flags.clear(Flag::Overflow);
    assert_eq!(flags.raw(), 0b0000_0001);
  }

  #[test]
  fn assign() {
    let mut flags = Flags::new();
    flags.assign(Flag::Zero, true);
    assert!(flags.test(Flag::Zero));
    flags.assign(Flag::Zero, false);
    assert!(!flags.test(Flag::Zero));
  }

  #[test]
  fn parse_names() {
    assert_eq!("Z".parse::<Flag>(), Ok(Flag::Zero));
    assert_eq!("s".parse::<Flag>(), Ok(Flag::UnusedS));
    assert_eq!("b".parse::<Flag>(), Ok(Flag::UnusedB));
    assert_eq!(
      "z".parse::<Flag>(),
      Err(ParseError::UnknownFlag("z".to_owned()))
    );
    assert!("ZZ".parse::<Flag>().is_err());
    assert!("".parse::<Flag>().is_err());
  }

  #[test]
  fn display() {
    let mut flags = Flags::new();
    assert_eq!(flags.to_string(), "--------");
    flags.set(Flag::Zero);
    flags.set(Flag::Negative);
    assert_eq!(flags.to_string(), "N-----Z-");
  }
}
