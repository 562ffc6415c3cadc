use std::ops::Range;
use std::process::ExitCode;

use clap::{ArgAction, Parser, ValueEnum};
use log::{Level, LevelFilter, Log, Metadata, Record};

use acc8::config::{Config, StackDiscipline, DEFAULT_RAM_SIZE, EXTENDED_RAM_SIZE};
use acc8::program::Program;
use acc8::vm::Vm;
use acc8::Word;

/// Run a program on the accumulator machine and dump its final state
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
  /// Built-in program to run
  #[arg(long, value_enum, default_value_t = Demo::Add)]
  demo: Demo,

  /// Program cells to run instead of the demo, e.g. "1, 0x64, 2, 7, 0"
  #[arg(long)]
  program: Option<Program>,

  /// Number of RAM cells, defaults to what the program needs
  #[arg(long)]
  ram_size: Option<usize>,

  /// Initial stack pointer, defaults to the last RAM cell
  #[arg(long, allow_negative_numbers = true)]
  stack_top: Option<Word>,

  /// Have RTS read one cell past the saved return address
  #[arg(long, action = ArgAction::SetTrue)]
  legacy_stack: bool,

  /// Give up after this many instructions
  #[arg(long, default_value_t = 100_000)]
  max_steps: u64,

  /// RAM cells to print as text
  #[arg(long, value_parser = parse_range, default_value = "128..256")]
  ascii: Range<usize>,

  /// Log more, repeat for instruction traces
  #[arg(short, long, action = ArgAction::Count)]
  verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Demo {
  /// 100 + 7, stored at cell 15
  Add,
  /// Writes a greeting into the text region
  Hello,
  /// Calls a subroutine in a loop
  Subroutine,
}

impl Demo {
  fn program(self) -> Program {
    match self {
      Demo::Add => Program::from([1, 100, 2, 7, 3, 15, 0]),
      Demo::Hello => hello("hello, world"),
      #[rustfmt::skip]
      Demo::Subroutine => Program::from([
        4, 128,      // 0: ldx #128
        1, 3,        // 2: lda #3
        3, 0,        // 4: sta 0
        10, 0,       // 6: ldy 0
        11, 16,      // 8: loop: jsr print
        9,           // 10: dey
        6, 0,        // 11: cmy #0
        7, -7,       // 13: bne loop
        0,           // 15: brk
        1, 0x61,     // 16: print: lda #'a'
        8,           // 18: sta (x)
        5,           // 19: inx
        1, 0x62,     // 20: lda #'b'
        8,           // 22: sta (x)
        5,           // 23: inx
        12,          // 24: rts
      ]),
    }
  }

  fn ram_size(self) -> usize {
    match self {
      Demo::Add | Demo::Hello => DEFAULT_RAM_SIZE,
      Demo::Subroutine => EXTENDED_RAM_SIZE,
    }
  }
}

// ldx #128, then lda/sta (x)/inx for every character
fn hello(text: &str) -> Program {
  let mut cells = vec![4, 128];
  for c in text.chars() {
    cells.extend([1, c as Word, 8, 5]);
  }
  cells.push(0);
  cells.into()
}

fn parse_range(s: &str) -> Result<Range<usize>, String> {
  let (start, end) = s
    .split_once("..")
    .ok_or_else(|| format!("expected START..END, got `{s}`"))?;
  let start: usize = start.trim().parse().map_err(|e| format!("{e}"))?;
  let end: usize = end.trim().parse().map_err(|e| format!("{e}"))?;
  Ok(start..end)
}

struct StderrLogger;

impl Log for StderrLogger {
  fn enabled(&self, metadata: &Metadata) -> bool {
    metadata.level() <= log::max_level()
  }

  fn log(&self, record: &Record) {
    if self.enabled(record.metadata()) {
      let level = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
      };
      eprintln!("{level:>5} {}", record.args());
    }
  }

  fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbose: u8) {
  let level = match verbose {
    0 => LevelFilter::Warn,
    1 => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  };
  if log::set_logger(&LOGGER).is_ok() {
    log::set_max_level(level);
  }
}

fn main() -> ExitCode {
  let args = Args::parse();
  init_logging(args.verbose);

  let ram_size = args.ram_size.unwrap_or(args.demo.ram_size());
  let mut config = Config::default().with_ram_size(ram_size);
  if let Some(top) = args.stack_top {
    config = config.with_stack_top(top);
  }
  if args.legacy_stack {
    config = config.with_stack(StackDiscipline::Legacy);
  }
  let program = args.program.unwrap_or_else(|| args.demo.program());
  let mut vm = Vm::with_config(program, config);
  log::debug!("loaded {} cells, {config:?}", vm.program().len());
  let reason = vm.run_for(args.max_steps);

  let snapshot = vm.snapshot();
  println!("REGISTERS");
  print!("{}", snapshot.registers_report());
  println!("\nMEMORY");
  print!("{}", snapshot.memory_report());
  println!("\nASCII");
  println!("{}", snapshot.ascii(args.ascii.clone()).trim_end_matches('\0'));

  match reason {
    Some(fault) if fault.is_fault() => {
      log::error!("stopped after {} steps: {fault}", vm.steps());
      ExitCode::FAILURE
    }
    Some(_) => {
      println!("\nstopped after {} steps", vm.steps());
      ExitCode::SUCCESS
    }
    None => {
      log::error!("still running after {} steps", args.max_steps);
      ExitCode::FAILURE
    }
  }
}
