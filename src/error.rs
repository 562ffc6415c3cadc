use crate::Word;

/// A fault raised while executing, it halts the machine
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  #[error("invalid opcode `{0}`")]
  InvalidOpcode(Word),

  #[error("memory address {0} out of bounds")]
  AddressOutOfBounds(Word),

  #[error("program counter {0} outside of the loaded program")]
  ProgramOutOfBounds(Word),
}

/// Input that could not be turned into something the machine understands
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
  #[error("unknown flag `{0}`")]
  UnknownFlag(String),

  #[error("could not parse program cell `{0}`")]
  InvalidCell(String),
}
