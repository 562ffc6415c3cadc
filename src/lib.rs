//! A tiny accumulator machine, loosely shaped after the 6502
//!
//! Three registers (`A`, `X`, `Y`), a status byte, a program counter and a
//! stack pointer, running a program of plain integers against a flat RAM.
//! Thirteen instructions, see [`opcode::Opcode`].
//!
//! ```
//! use acc8::vm::{HaltReason, Vm};
//!
//! // lda #100; adc #7; sta 15; brk
//! let mut vm = Vm::new([1, 100, 2, 7, 3, 15, 0], 256);
//! assert_eq!(vm.run(), HaltReason::Break);
//! assert_eq!(vm.memory()[15], 107);
//! ```

pub mod config;
pub mod dump;
pub mod error;
pub mod flags;
pub mod memory;
pub mod opcode;
pub mod program;
pub mod registers;
pub mod vm;

/// The type of every register, memory cell and program cell
pub type Word = i32;
