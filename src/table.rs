//! Shared formatting for the tables the assembler and interpreter produce. The same
//! `Table` is printed to the console with `TABLE_DISPLAY_FORMAT` and written to disk
//! as CSV, with its titles as the header row.

use std::io::Write;

use prettytable::{format as TableFormat, Table};

use crate::error::UvmError;

lazy_static! {
  pub static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

/// Writes the titles and then every row of `table` as CSV records.
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<(), UvmError> {
  table.to_csv(writer)
       .map(|_writer| ())
       .map_err(|e| UvmError::Csv(e.to_string()))
}
