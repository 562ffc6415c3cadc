use crate::Word;

/// RAM size of the default machine, the upper half is where the demos put
/// their text
pub const DEFAULT_RAM_SIZE: usize = 256;

/// RAM size of the subroutine-capable machine
pub const EXTENDED_RAM_SIZE: usize = 640;

/// How `RTS` locates the return address pushed by `JSR`.
///
/// `JSR` always stores at `m[sp]` and then decrements `sp`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StackDiscipline {
  /// `sp ← sp + 1; pc ← m[sp]`, reads back exactly what the call wrote
  #[default]
  Symmetric,

  /// `sp ← sp + 1; pc ← m[sp + 1]`, one cell past the matching push. Kept
  /// for programs written against that behaviour.
  Legacy,
}

/// Machine layout: how much memory there is, and where the stack starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
  pub ram_size: usize,
  pub stack_top: Option<Word>,
  pub stack: StackDiscipline,
}

impl Config {
  /// 640 cells, enough room for a stack above the ASCII region
  pub fn extended() -> Self {
    Self::default().with_ram_size(EXTENDED_RAM_SIZE)
  }

  pub fn with_ram_size(mut self, ram_size: usize) -> Self {
    self.ram_size = ram_size;
    self
  }

  pub fn with_stack_top(mut self, stack_top: Word) -> Self {
    self.stack_top = Some(stack_top);
    self
  }

  pub fn with_stack(mut self, stack: StackDiscipline) -> Self {
    self.stack = stack;
    self
  }

  /// The stack pointer a fresh machine starts with, the last RAM cell unless
  /// overridden
  pub fn initial_sp(&self) -> Word {
    self.stack_top.unwrap_or_else(|| {
      Word::try_from(self.ram_size).map_or(Word::MAX, |len| len - 1)
    })
  }
}

impl Default for Config {
  fn default() -> Self {
    Self {
      ram_size: DEFAULT_RAM_SIZE,
      stack_top: None,
      stack: StackDiscipline::Symmetric,
    }
  }
}
