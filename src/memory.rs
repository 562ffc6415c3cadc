use crate::error::Error;
use crate::Word;

/// Flat, zero-initialised RAM.
///
/// The call stack lives in here as well, nothing keeps data writes away
/// from saved return addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
  cells: Vec<Word>,
}

impl Memory {
  pub fn new(len: usize) -> Self {
    Self {
      cells: vec![0; len],
    }
  }

  pub fn len(&self) -> usize {
    self.cells.len()
  }

  pub fn is_empty(&self) -> bool {
    self.cells.is_empty()
  }

  pub fn read(&self, address: Word) -> Result<Word, Error> {
    let index = self.index(address)?;
    Ok(self.cells[index])
  }

  pub fn write(&mut self, address: Word, value: Word) -> Result<(), Error> {
    let index = self.index(address)?;
    self.cells[index] = value;
    Ok(())
  }

  pub fn as_slice(&self) -> &[Word] {
    &self.cells
  }

  fn index(&self, address: Word) -> Result<usize, Error> {
    usize::try_from(address)
      .ok()
      .filter(|&i| i < self.cells.len())
      .ok_or(Error::AddressOutOfBounds(address))
  }
}
