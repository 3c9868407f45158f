//! The error type shared by the assembler, the interpreter, and the file collaborators.

use thiserror::Error;

use crate::address::AddressNumberType;
use crate::bytecode::{operation_names, Operation};

#[derive(Error, Debug)]
pub enum UvmError {
  /// The first token of a source line is not one of the four mnemonics.
  #[error("Error on line {line}: {name} is not an operation. Expected one of {expected}.", expected = operation_names())]
  UnknownMnemonic { line: usize, name: String },

  #[error("Error on line {line}: {operation} requires {expected} arguments but was given {given}")]
  WrongArity {
    line: usize,
    operation: Operation,
    expected: usize,
    given: usize
  },

  /// The line could not be split into a mnemonic and integer arguments.
  #[error("Error on line {line}: malformed instruction `{text}`")]
  Syntax { line: usize, text: String },

  /// A computed memory index fell outside of the memory array. `position` is the
  /// index of the offending instruction in the stream.
  #[error("instruction {position}: memory address {address} is out of bounds")]
  AddressOutOfBounds { position: usize, address: i64 },

  #[error("invalid memory range [{lo}, {hi})")]
  InvalidRange { lo: AddressNumberType, hi: AddressNumberType },

  /// The binary instruction stream is not a whole number of 8 byte words.
  #[error("binary stream of {length} bytes is not a whole number of instruction words")]
  TruncatedBinary { length: usize },

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("could not write table: {0}")]
  Csv(String),
}
