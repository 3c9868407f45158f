/*!
  The assembler turns assembly text into a stream of instruction words. Each line is
  encoded on its own, so the output is simply the source lines, parsed and packed, in
  order. Alongside the words it keeps a trace of what each line was assembled into.
*/

use std::fmt::{Display, Formatter};

use prettytable::Table;
use tracing::{debug, info};

use crate::bytecode::{encode_instruction, parse_assembly, DoubleWord, Instruction};
use crate::error::UvmError;
use crate::table::TABLE_DISPLAY_FORMAT;

/// What one source line was assembled into.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TraceRecord {
  pub line        : usize,
  pub instruction : Instruction,
  pub word        : DoubleWord
}

impl TraceRecord {
  /// The word as 16 uppercase hex digits.
  pub fn word_text(&self) -> String {
    format!("{:016X}", self.word)
  }
}

impl Display for TraceRecord {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "line {}: {} -> {}", self.line, self.instruction, self.word_text())
  }
}

/// The output of a successful assembly: one word and one trace record per instruction.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Assembly {
  pub words : Vec<DoubleWord>,
  pub trace : Vec<TraceRecord>
}

impl Assembly {
  /// The trace as a table with columns `command`, `args`, `instruction`.
  pub fn trace_table(&self) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["command", "args", "instruction"]);

    for record in self.trace.iter() {
      table.add_row(row![
        record.instruction.operation(),
        record.instruction.args_text(),
        record.word_text()
      ]);
    }
    table
  }
}

impl Display for Assembly {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let mut table = self.trace_table();
    table.set_format(*TABLE_DISPLAY_FORMAT);
    write!(f, "Assembled {} instructions.\n{}", self.words.len(), table)
  }
}

/// Assembles a whole program. Nothing is produced if any line fails to parse.
pub fn assemble(text: &str) -> Result<Assembly, UvmError> {
  let parsed = parse_assembly(text)?;
  let mut assembly = Assembly::default();

  for parsed_line in parsed {
    let record = TraceRecord {
      word        : encode_instruction(&parsed_line.instruction),
      line        : parsed_line.line,
      instruction : parsed_line.instruction
    };
    debug!("{}", record);

    assembly.words.push(record.word);
    assembly.trace.push(record);
  }

  info!("assembled {} instructions", assembly.words.len());
  Ok(assembly)
}
