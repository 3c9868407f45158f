//! Structures and functions for the UVM interpreter: a flat array of `MEMORY_SIZE`
//! integer cells and a loop that executes instruction words against it, in order.

use std::fmt::{Display, Formatter};

use prettytable::Table;
use tracing::{debug, info, warn};

use crate::address::*;
use crate::bytecode::{decode_instruction, DecodedInstruction, DoubleWord, Operation};
use crate::cell::{Cell, DumpRecord};
use crate::error::UvmError;
use crate::table::TABLE_DISPLAY_FORMAT;

pub struct UVM {
  // Memory Store
  memory: Vec<Cell>,

  // Position of the instruction being executed, for error reporting.
  ip: usize,
  // The last cell written, highlighted when displayed.
  last_write: Option<AddressNumberType>,
}

impl UVM {

  // region Display methods

  /// A table of the nonzero cells of memory, with the most recent write marked.
  fn make_memory_table(&self) -> Table {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Address", ubl->"Contents"]);

    for (address, cell) in self.memory.iter().enumerate() {
      if *cell == 0 && self.last_write != Some(address) {
        continue;
      }
      match self.last_write == Some(address) {

        true  => {
          table.add_row(row![r->format!("* --> M[{}] =", address), cell]);
        }

        false => {
          table.add_row(row![r->format!("M[{}] =", address), cell]);
        }

      } // end match on highlight
    } // end for
    table
  }

  // endregion

  // region Low-level utility methods

  /// A machine with every cell of memory set to zero.
  pub fn new() -> UVM {
    UVM {
      memory     : vec![0; MEMORY_SIZE],
      ip         : 0,
      last_write : None,
    }
  }

  /// Reads a cell. Addresses are computed from cell contents, so they arrive signed.
  fn value_at(&self, address: i64) -> Result<Cell, UvmError> {
    match to_address(address) {
      Some(idx) => Ok(self.memory[idx]),
      None      => Err(UvmError::AddressOutOfBounds { position: self.ip, address })
    }
  }

  fn set_value_at(&mut self, address: i64, value: Cell) -> Result<(), UvmError> {
    match to_address(address) {

      Some(idx) => {
        self.memory[idx] = value;
        self.last_write  = Some(idx);
        Ok(())
      }

      None => Err(UvmError::AddressOutOfBounds { position: self.ip, address })

    }
  }

  // endregion

  // region Execution

  /// Executes every word in order. Execution stops at the first out of bounds access,
  /// and the contents of memory are then unspecified.
  pub fn run(&mut self, words: &[DoubleWord]) -> Result<(), UvmError> {
    for word in words {
      self.step(*word)?;
    }
    info!("executed {} instructions", words.len());
    Ok(())
  }

  /// Decodes and executes a single word. Words whose opcode has no operation leave
  /// memory untouched.
  pub fn step(&mut self, word: DoubleWord) -> Result<(), UvmError> {
    let decoded = decode_instruction(word);
    debug!(position = self.ip, "{}", decoded);

    match decoded.operation() {
      Some(Operation::LoadConst) => self.load_const(&decoded)?,
      Some(Operation::ReadMem)   => self.read_mem(&decoded)?,
      Some(Operation::WriteMem)  => self.write_mem(&decoded)?,
      Some(Operation::Abs)       => self.abs(&decoded)?,
      None => {
        warn!(position = self.ip, "skipping word {:016X} with unknown opcode {}", word, decoded.opcode);
      }
    }

    #[cfg(feature = "trace_computation")]
    println!("Instruction {}: {}\n{}", self.ip, decoded, self);

    self.ip += 1;
    Ok(())
  }

  /// `M[B] ← C`
  fn load_const(&mut self, decoded: &DecodedInstruction) -> Result<(), UvmError> {
    self.set_value_at(decoded.b as i64, decoded.c as Cell)
  }

  /// `M[B] ← M[M[C] + D]`
  fn read_mem(&mut self, decoded: &DecodedInstruction) -> Result<(), UvmError> {
    let base  = self.value_at(decoded.c as i64)?;
    let value = self.value_at(base.wrapping_add(decoded.d as i64))?;
    self.set_value_at(decoded.b as i64, value)
  }

  /// `M[M[B]] ← M[M[C]]`
  fn write_mem(&mut self, decoded: &DecodedInstruction) -> Result<(), UvmError> {
    let value  = self.indirect_value(decoded.c)?;
    let target = self.value_at(decoded.b as i64)?;
    self.set_value_at(target, value)
  }

  /// `M[M[B]] ← |M[M[C]]|`
  fn abs(&mut self, decoded: &DecodedInstruction) -> Result<(), UvmError> {
    let value  = self.indirect_value(decoded.c)?;
    let target = self.value_at(decoded.b as i64)?;
    self.set_value_at(target, value.wrapping_abs())
  }

  /// `M[M[address]]`
  fn indirect_value(&self, address: DoubleWord) -> Result<Cell, UvmError> {
    let pointer = self.value_at(address as i64)?;
    self.value_at(pointer)
  }

  // endregion

  /// The cells of `range` as `(address, value)` pairs in address order.
  pub fn dump(&self, range: AddressRange) -> Vec<DumpRecord> {
    range.as_range()
         .map(|address| DumpRecord{ address, value: self.memory[address] })
         .collect()
  }

}

impl Default for UVM {
  fn default() -> Self {
    Self::new()
  }
}

impl Display for UVM {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.make_memory_table())
  }
}

/// Runs `words` on a fresh machine and dumps `range` of its memory afterwards.
pub fn interpret(words: &[DoubleWord], range: AddressRange) -> Result<Vec<DumpRecord>, UvmError> {
  let mut machine = UVM::new();
  machine.run(words)?;
  Ok(machine.dump(range))
}

/// The dump as a table with columns `Address`, `Value`.
pub fn dump_table(records: &[DumpRecord]) -> Table {
  let mut table = Table::new();
  table.set_titles(row!["Address", "Value"]);
  for record in records {
    table.add_row(row![record.address, record.value]);
  }
  table
}
