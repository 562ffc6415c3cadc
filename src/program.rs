use std::str::FromStr;

use crate::error::{Error, ParseError};
use crate::Word;

/// The loaded program: opcodes and their inline operands, read-only for the
/// lifetime of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
  cells: Vec<Word>,
}

impl Program {
  pub fn fetch(&self, index: Word) -> Result<Word, Error> {
    usize::try_from(index)
      .ok()
      .and_then(|i| self.cells.get(i))
      .copied()
      .ok_or(Error::ProgramOutOfBounds(index))
  }

  pub fn len(&self) -> usize {
    self.cells.len()
  }

  pub fn is_empty(&self) -> bool {
    self.cells.is_empty()
  }

  pub fn cells(&self) -> &[Word] {
    &self.cells
  }
}

impl From<Vec<Word>> for Program {
  fn from(cells: Vec<Word>) -> Self {
    Self { cells }
  }
}

impl From<&[Word]> for Program {
  fn from(cells: &[Word]) -> Self {
    Self {
      cells: cells.to_vec(),
    }
  }
}

impl<const N: usize> From<[Word; N]> for Program {
  fn from(cells: [Word; N]) -> Self {
    Self {
      cells: cells.to_vec(),
    }
  }
}

/// Parses cells separated by commas and/or whitespace, e.g.
/// `1, 0x64, 2, 7, 7, -20`
impl FromStr for Program {
  type Err = ParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    s.split(|c: char| c == ',' || c.is_whitespace())
      .filter(|tok| !tok.is_empty())
      .map(parse_cell)
      .collect::<Result<Vec<_>, _>>()
      .map(Program::from)
  }
}

fn parse_cell(tok: &str) -> Result<Word, ParseError> {
  let invalid = || ParseError::InvalidCell(tok.to_owned());
  let (negative, digits) = match tok.strip_prefix('-') {
    Some(rest) => (true, rest),
    None => (false, tok),
  };
  // digits only, `from_str_radix` would take a sign of its own
  let (digits, radix) = match digits
    .strip_prefix("0x")
    .or_else(|| digits.strip_prefix("0X"))
  {
    Some(hex) => (hex, 16),
    None => (digits, 10),
  };
  if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
    return Err(invalid());
  }
  let magnitude = i64::from_str_radix(digits, radix).map_err(|_| invalid())?;
  let value = if negative { -magnitude } else { magnitude };
  Word::try_from(value).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fetch() {
    let program = Program::from([1, 100, 0]);
    assert_eq!(program.fetch(0), Ok(1));
    assert_eq!(program.fetch(1), Ok(100));
    assert_eq!(program.fetch(2), Ok(0));
  }

  #[test]
  fn fetch_out_of_range() {
    let program = Program::from([1, 100, 0]);
    assert_eq!(program.fetch(3), Err(Error::ProgramOutOfBounds(3)));
    assert_eq!(program.fetch(-1), Err(Error::ProgramOutOfBounds(-1)));
    assert_eq!(
      Program::default().fetch(0),
      Err(Error::ProgramOutOfBounds(0))
    );
  }

  #[test]
  fn parse() {
    let program: Program = "1, 0x64, 2,7\n7 -20 -0x14 0XfF".parse().unwrap();
    assert_eq!(program.cells(), &[1, 100, 2, 7, 7, -20, -20, 255]);
  }

  #[test]
  fn parse_rejects_garbage() {
    assert_eq!(
      "1, two, 3".parse::<Program>(),
      Err(ParseError::InvalidCell("two".to_owned()))
    );
    assert!("0xZZ".parse::<Program>().is_err());
    assert!("--5".parse::<Program>().is_err());
    assert!("+5".parse::<Program>().is_err());
    assert!("-".parse::<Program>().is_err());
    assert!("0x".parse::<Program>().is_err());
    for tok in ["0x-5", "-0x-5", "0x+5", "0X-1"] {
      assert_eq!(
        tok.parse::<Program>(),
        Err(ParseError::InvalidCell(tok.to_owned()))
      );
    }
    assert!("99999999999".parse::<Program>().is_err());
  }

  #[test]
  fn parse_empty() {
    let program: Program = " , ".parse().unwrap();
    assert!(program.is_empty());
  }
}
