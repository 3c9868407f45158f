use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::address::AddressNumberType;

#[derive(Parser)]
#[command(version, about = "Assembler and Interpreter for UVM")]
pub struct Cli {
  #[command(subcommand)]
  pub command: CliCommand,
}

#[derive(Subcommand)]
pub enum CliCommand {
  /// Run assembler
  Assemble {
    /// Path to input file
    #[arg(long)]
    input: PathBuf,
    /// Path to binary output file
    #[arg(long)]
    output: PathBuf,
    /// Path to log file
    #[arg(long)]
    log: PathBuf,
    /// Also print the trace to stdout
    #[arg(long)]
    show: bool,
  },
  /// Run interpreter
  Interpret {
    /// Path to binary input file
    #[arg(long)]
    binary: PathBuf,
    /// Path to result file
    #[arg(long)]
    result: PathBuf,
    /// Memory range to dump, as the half-open range LO HI
    #[arg(long = "memory_range", num_args = 2, value_names = ["LO", "HI"], required = true)]
    memory_range: Vec<AddressNumberType>,
    /// Also print the dump to stdout
    #[arg(long)]
    show: bool,
  },
}
