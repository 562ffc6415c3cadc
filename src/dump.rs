//! Read-only views of machine state for printing
//!
//! Nothing in here feeds back into execution.

use std::fmt;
use std::ops::Range;

use crate::registers::Registers;
use crate::Word;

/// An owned copy of the machine state at one point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
  pub registers: Registers,
  pub memory: Vec<Word>,
}

impl Snapshot {
  pub fn registers_report(&self) -> RegistersReport<'_> {
    RegistersReport(&self.registers)
  }

  pub fn memory_report(&self) -> MemoryReport<'_> {
    MemoryReport(&self.memory)
  }

  pub fn ascii(&self, range: Range<usize>) -> String {
    render_ascii(&self.memory, range)
  }
}

/// One `NAME: value` line per register
pub struct RegistersReport<'a>(&'a Registers);

impl fmt::Display for RegistersReport<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let r = self.0;
    writeln!(f, " A: {}", r.a())?;
    writeln!(f, " X: {}", r.x())?;
    writeln!(f, " Y: {}", r.y())?;
    writeln!(f, "PC: {}", r.pc())?;
    writeln!(f, "SP: {}", r.sp())?;
    writeln!(f, "FL: {} ({:#04x})", r.flags(), r.flags().raw())
  }
}

/// One `address : value` line for every cell holding a positive value.
///
/// Zero and negative cells are left out.
pub struct MemoryReport<'a>(&'a [Word]);

impl fmt::Display for MemoryReport<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (address, value) in self.0.iter().enumerate() {
      if *value > 0 {
        writeln!(f, "{address:02} : {value}")?;
      }
    }
    Ok(())
  }
}

/// Renders `cells[range]` as text, one character per cell.
///
/// The range is clamped to the cells available. Cells that are not a
/// unicode scalar value come out as U+FFFD.
pub fn render_ascii(cells: &[Word], range: Range<usize>) -> String {
  let end = range.end.min(cells.len());
  let start = range.start.min(end);
  cells[start..end]
    .iter()
    .map(|&cell| {
      u32::try_from(cell)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
    })
    .collect()
}
