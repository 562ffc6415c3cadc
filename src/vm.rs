use std::fmt;

use crate::config::{Config, StackDiscipline};
use crate::dump::Snapshot;
use crate::error::Error;
use crate::flags::{Flag, Flags};
use crate::memory::Memory;
use crate::opcode::Opcode;
use crate::program::Program;
use crate::registers::Registers;
use crate::Word;

/// Why the machine stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
  /// A `BRK` was executed, the only clean way out
  Break,
  InvalidOpcode(Word),
  AddressOutOfBounds(Word),
  ProgramOutOfBounds(Word),
}

impl HaltReason {
  pub fn is_fault(&self) -> bool {
    !matches!(self, HaltReason::Break)
  }
}

impl From<Error> for HaltReason {
  fn from(err: Error) -> Self {
    match err {
      Error::InvalidOpcode(code) => Self::InvalidOpcode(code),
      Error::AddressOutOfBounds(address) => Self::AddressOutOfBounds(address),
      Error::ProgramOutOfBounds(pc) => Self::ProgramOutOfBounds(pc),
    }
  }
}

impl fmt::Display for HaltReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match *self {
      HaltReason::Break => f.write_str("break"),
      HaltReason::InvalidOpcode(code) => write!(f, "{}", Error::InvalidOpcode(code)),
      HaltReason::AddressOutOfBounds(a) => write!(f, "{}", Error::AddressOutOfBounds(a)),
      HaltReason::ProgramOutOfBounds(pc) => write!(f, "{}", Error::ProgramOutOfBounds(pc)),
    }
  }
}

/// An accumulator machine with two index registers, executing a program
/// store of [`Word`]s against a flat RAM.
///
/// Every instruction is fetched at `pc`, dispatched, and then `pc` is
/// advanced by one. Handlers that take an operand advance `pc` onto the
/// operand cell themselves before reading it, so together the two
/// increments step over the whole instruction.
///
/// Once halted (by `BRK` or a fault) the machine stays halted, a fresh one
/// is needed to run again.
#[derive(Debug)]
pub struct Vm {
  registers: Registers,
  memory: Memory,
  program: Program,
  stack: StackDiscipline,
  halted: Option<HaltReason>,
  steps: u64,
}

impl Vm {
  /// Create a machine with `ram_size` cells of zeroed memory and the stack
  /// at the top of it
  pub fn new(program: impl Into<Program>, ram_size: usize) -> Self {
    Self::with_config(program, Config::default().with_ram_size(ram_size))
  }

  pub fn with_config(program: impl Into<Program>, config: Config) -> Self {
    Self {
      registers: Registers::new(config.initial_sp()),
      memory: Memory::new(config.ram_size),
      program: program.into(),
      stack: config.stack,
      halted: None,
      steps: 0,
    }
  }

  /// Execute a single instruction, returning whether the machine can keep
  /// going
  pub fn step(&mut self) -> bool {
    if self.is_halted() {
      return false;
    }
    let mut task = Task::new(self);
    match task.run() {
      Ok(true) => {
        self.steps += 1;
        self.registers.inc_pc(1);
        log::trace!("     {}", self.registers);
        true
      }
      Ok(false) => {
        self.steps += 1;
        self.halt(HaltReason::Break);
        false
      }
      Err(err) => {
        log::warn!("fault at pc {}: {err}", self.registers.pc());
        self.halt(err.into());
        false
      }
    }
  }

  /// Run until the machine halts
  pub fn run(&mut self) -> HaltReason {
    loop {
      if let Some(reason) = self.halted {
        return reason;
      }
      self.step();
    }
  }

  /// Run for at most `max_steps` instructions, `None` if the machine is still
  /// going afterwards
  pub fn run_for(&mut self, max_steps: u64) -> Option<HaltReason> {
    for _ in 0..max_steps {
      if !self.step() {
        break;
      }
    }
    self.halted
  }

  pub fn halt_reason(&self) -> Option<HaltReason> {
    self.halted
  }

  pub fn is_halted(&self) -> bool {
    self.halted.is_some()
  }

  /// Number of instructions executed to completion, `BRK` included
  pub fn steps(&self) -> u64 {
    self.steps
  }

  pub fn a(&self) -> Word {
    self.registers.a()
  }

  pub fn x(&self) -> Word {
    self.registers.x()
  }

  pub fn y(&self) -> Word {
    self.registers.y()
  }

  pub fn pc(&self) -> Word {
    self.registers.pc()
  }

  pub fn sp(&self) -> Word {
    self.registers.sp()
  }

  pub fn flags(&self) -> Flags {
    *self.registers.flags()
  }

  pub fn registers(&self) -> &Registers {
    &self.registers
  }

  pub fn memory(&self) -> &[Word] {
    self.memory.as_slice()
  }

  pub fn program(&self) -> &Program {
    &self.program
  }

  pub fn snapshot(&self) -> Snapshot {
    Snapshot {
      registers: *self.registers(),
      memory: self.memory().to_vec(),
    }
  }

  fn halt(&mut self, reason: HaltReason) {
    log::debug!(
      "halted after {} steps at pc {}: {reason}",
      self.steps,
      self.registers.pc()
    );
    self.halted = Some(reason);
  }
}

/// An instruction handler, `Ok(false)` stops the machine cleanly
type Handler = fn(&mut Task<'_>) -> Result<bool, Error>;

// indexed by opcode
const HANDLERS: [Handler; 13] = [
  brk, lda, adc, sta, ldx, inx, cmy, bne, sta_x, dey, ldy, jsr, rts,
];

/// The parts of a [`Vm`] a single instruction gets to see
struct Task<'vm> {
  registers: &'vm mut Registers,
  memory: &'vm mut Memory,
  program: &'vm Program,
  stack: StackDiscipline,
}

impl<'vm> Task<'vm> {
  fn new(vm: &'vm mut Vm) -> Self {
    Self {
      registers: &mut vm.registers,
      memory: &mut vm.memory,
      program: &vm.program,
      stack: vm.stack,
    }
  }

  /// Move onto the next cell and read it as an operand
  #[inline]
  fn eat(&mut self) -> Result<Word, Error> {
    self.registers.inc_pc(1);
    self.program.fetch(self.registers.pc())
  }

  fn run(&mut self) -> Result<bool, Error> {
    let pc = self.registers.pc();
    let op = Opcode::try_from(self.program.fetch(pc)?)?;
    log::trace!("{pc:04} {op}");
    HANDLERS[op as usize](self)
  }
}

// (stop execution)
fn brk(_: &mut Task<'_>) -> Result<bool, Error> {
  Ok(false)
}

// a ← oo
fn lda(task: &mut Task<'_>) -> Result<bool, Error> {
  let oo = task.eat()?;
  task.registers.set_a(oo);
  Ok(true)
}

// a ← a + oo
fn adc(task: &mut Task<'_>) -> Result<bool, Error> {
  let oo = task.eat()?;
  let a = task.registers.a();
  task.registers.set_a(a.wrapping_add(oo));
  Ok(true)
}

// m[oo] ← a
fn sta(task: &mut Task<'_>) -> Result<bool, Error> {
  let oo = task.eat()?;
  task.memory.write(oo, task.registers.a())?;
  Ok(true)
}

// x ← oo
fn ldx(task: &mut Task<'_>) -> Result<bool, Error> {
  let oo = task.eat()?;
  task.registers.set_x(oo);
  Ok(true)
}

// x ← x + 1
fn inx(task: &mut Task<'_>) -> Result<bool, Error> {
  task.registers.inc_x(1);
  Ok(true)
}

// Z ← (oo == y)
fn cmy(task: &mut Task<'_>) -> Result<bool, Error> {
  let oo = task.eat()?;
  let equal = oo == task.registers.y();
  task.registers.flags_mut().assign(Flag::Zero, equal);
  Ok(true)
}

// if !Z : pc ← pc + oo
fn bne(task: &mut Task<'_>) -> Result<bool, Error> {
  let oo = task.eat()?;
  if !task.registers.flags().test(Flag::Zero) {
    task.registers.inc_pc(oo);
  }
  Ok(true)
}

// m[x] ← a
fn sta_x(task: &mut Task<'_>) -> Result<bool, Error> {
  task.memory.write(task.registers.x(), task.registers.a())?;
  Ok(true)
}

// y ← y − 1
fn dey(task: &mut Task<'_>) -> Result<bool, Error> {
  task.registers.dec_y();
  Ok(true)
}

// y ← m[oo]
fn ldy(task: &mut Task<'_>) -> Result<bool, Error> {
  let oo = task.eat()?;
  let value = task.memory.read(oo)?;
  task.registers.set_y(value);
  Ok(true)
}

// m[sp] ← pc; sp ← sp − 1; pc ← oo
//
// `pc` is left on the operand cell when pushed, and set one short of the
// target so the step's own increment lands on it.
fn jsr(task: &mut Task<'_>) -> Result<bool, Error> {
  let oo = task.eat()?;
  let sp = task.registers.sp();
  task.memory.write(sp, task.registers.pc())?;
  task.registers.set_sp(sp.wrapping_sub(1));
  task.registers.set_pc(oo.wrapping_sub(1));
  Ok(true)
}

// sp ← sp + 1; pc ← m[sp]
fn rts(task: &mut Task<'_>) -> Result<bool, Error> {
  let sp = task.registers.sp().wrapping_add(1);
  let slot = match task.stack {
    StackDiscipline::Symmetric => sp,
    StackDiscipline::Legacy => sp.wrapping_add(1),
  };
  let ret = task.memory.read(slot)?;
  task.registers.set_sp(sp);
  task.registers.set_pc(ret);
  Ok(true)
}
