/*!
  Reading and writing the files the two commands exchange: assembly source, the
  binary instruction stream, the assembly trace and the memory dump.

  `assemble_file` and `interpret_file` finish all of their work in memory before they
  create any output, so a failed run never leaves a half-written result behind.
*/

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use prettytable::Table;
use tracing::info;

use crate::address::AddressRange;
use crate::assembler::{assemble, Assembly};
use crate::bytecode::{bytes_to_words, words_to_bytes, DoubleWord};
use crate::cell::DumpRecord;
use crate::error::UvmError;
use crate::table::write_csv;
use crate::uvm::{dump_table, interpret};

pub fn read_source(path: &Path) -> Result<String, UvmError> {
  Ok(fs::read_to_string(path)?)
}

pub fn write_binary(path: &Path, words: &[DoubleWord]) -> Result<(), UvmError> {
  fs::write(path, words_to_bytes(words))?;
  Ok(())
}

pub fn read_binary(path: &Path) -> Result<Vec<DoubleWord>, UvmError> {
  bytes_to_words(&fs::read(path)?)
}

/// Writes `table` to `path` as CSV, header row first.
pub fn write_table(path: &Path, table: &Table) -> Result<(), UvmError> {
  let file = File::create(path)?;
  write_csv(table, BufWriter::new(file))
}

/// Assembles `input`, then writes the binary to `output` and the trace to `log`.
pub fn assemble_file(input: &Path, output: &Path, log: &Path) -> Result<Assembly, UvmError> {
  let assembly = assemble(&read_source(input)?)?;

  write_binary(output, &assembly.words)?;
  write_table(log, &assembly.trace_table())?;

  info!(
    "wrote {} words to {} and trace to {}",
    assembly.words.len(),
    output.display(),
    log.display()
  );
  Ok(assembly)
}

/// Executes the binary at `binary` and writes the cells of `range` to `result`.
pub fn interpret_file(binary: &Path, result: &Path, range: AddressRange)
  -> Result<Vec<DumpRecord>, UvmError>
{
  let words = read_binary(binary)?;
  let records = interpret(&words, range)?;

  write_table(result, &dump_table(&records))?;

  info!("wrote memory {} to {}", range, result.display());
  Ok(records)
}
