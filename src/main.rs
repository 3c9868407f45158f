#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

mod address;
mod assembler;
mod bytecode;
mod cell;
mod cli;
mod error;
mod files;
mod table;
mod uvm;

use std::error::Error;

use clap::Parser;
use tracing::subscriber::set_global_default;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

use crate::address::AddressRange;
use crate::cli::{Cli, CliCommand};
use crate::table::TABLE_DISPLAY_FORMAT;

fn setup_tracing() {
  let fmt_layer = fmt::layer()
    .with_target(false)
    .with_writer(std::io::stderr);
  let sub = Registry::default()
    .with(EnvFilter::from_default_env())
    .with(fmt_layer);
  set_global_default(sub).expect("Failed to set tracing subscriber");
}

fn main() -> Result<(), Box<dyn Error>> {
  setup_tracing();

  #[cfg(feature = "trace_computation")]
  println!("Computation Tracing ENABLED");

  let cli = Cli::parse();

  match cli.command {

    CliCommand::Assemble { input, output, log, show } => {
      let assembly = files::assemble_file(&input, &output, &log)?;
      if show {
        println!("{}", assembly);
      }
    }

    CliCommand::Interpret { binary, result, memory_range, show } => {
      // `clap` guarantees exactly two values.
      let range = AddressRange::new(memory_range[0], memory_range[1])?;
      let records = files::interpret_file(&binary, &result, range)?;
      if show {
        let mut table = uvm::dump_table(&records);
        table.set_format(*TABLE_DISPLAY_FORMAT);
        println!("Memory {}\n{}", range, table);
      }
    }

  }

  Ok(())
}
