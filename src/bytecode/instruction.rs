use std::fmt::{Display, Formatter};
use std::str::FromStr;

use strum_macros::{Display as StrumDisplay, EnumString, IntoStaticStr};
use num_enum::{TryFromPrimitive, IntoPrimitive};

use crate::bytecode::binary::{encoding_layout, DoubleWord};

/**
  A single source argument: a decimal integer of any size. Only its value modulo
  2^64 is kept, which is every bit a field mask can select, so negative values land
  in the word as two's complement bit patterns and oversize values lose their high
  bits. The normalized decimal text is kept for the trace.
*/
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Argument {
  bits : DoubleWord,
  text : String
}

impl Argument {
  pub fn bits(&self) -> DoubleWord {
    self.bits
  }
}

impl FromStr for Argument {
  type Err = String;

  /// Accepts an optional sign followed by decimal digits.
  fn from_str(text: &str) -> Result<Argument, String> {
    let (negative, digits) =
      match text.as_bytes().first() {
        Some(b'-') => (true,  &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _          => (false, text)
      };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
      return Err(format!("{} is not an integer", text));
    }

    let magnitude =
      digits.bytes()
            .fold(0 as DoubleWord, |acc, b| {
              acc.wrapping_mul(10).wrapping_add((b - b'0') as DoubleWord)
            });
    let significant = digits.trim_start_matches('0');

    match (negative, significant.is_empty()) {
      (_, true)      => Ok(Argument{ bits: 0, text: "0".to_string() }),
      (true, false)  => Ok(Argument{ bits: magnitude.wrapping_neg(), text: format!("-{}", significant) }),
      (false, false) => Ok(Argument{ bits: magnitude, text: significant.to_string() })
    }
  }
}

impl From<i64> for Argument {
  fn from(value: i64) -> Argument {
    Argument{ bits: value as DoubleWord, text: value.to_string() }
  }
}

impl Display for Argument {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.text)
  }
}

/**
  Opcodes of the virtual machine.

  The discriminant of each variant is the value of the 3 bit `A` field. The values
  0, 1, 5 and 6 are the only ones with a meaning; the decoder treats every other
  value of `A` as a no-op, which is why decoding yields an `Option<Operation>`
  rather than failing.
*/
#[derive(
  StrumDisplay, IntoStaticStr, EnumString, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,          Eq, PartialEq,  Debug,            Hash
)]
#[repr(u8)]
pub enum Operation {
  #[strum(serialize = "ABS")]
  Abs       = 0, // ABS addr_dst addr_src
  #[strum(serialize = "WRITE_MEM")]
  WriteMem  = 1, // WRITE_MEM addr_dst addr_src
  #[strum(serialize = "LOAD_CONST")]
  LoadConst = 5, // LOAD_CONST addr const
  #[strum(serialize = "READ_MEM")]
  ReadMem   = 6, // READ_MEM addr_dst addr_base offset
}

pub const ALL_OPERATIONS: [Operation; 4] = [
  Operation::Abs,
  Operation::WriteMem,
  Operation::LoadConst,
  Operation::ReadMem
];

/// The mnemonics, comma separated, for error messages.
pub fn operation_names() -> String {
  ALL_OPERATIONS.iter()
                .map(Operation::to_string)
                .collect::<Vec<String>>()
                .join(", ")
}

impl Operation {
  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }

  /// The number of source arguments, which is the number of operand fields in the
  /// operation's encoding layout.
  pub fn arity(&self) -> usize {
    encoding_layout(*self).operands.len()
  }
}

/// Holds the unencoded components of an instruction: the operation and its source
/// arguments, in source order. The argument count always matches `operation.arity()`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Instruction {
  operation : Operation,
  args      : Vec<Argument>
}

impl Instruction {
  /// Returns the arguments back if their count does not match the operation's arity.
  pub fn new(operation: Operation, args: Vec<Argument>) -> Result<Instruction, Vec<Argument>> {
    match args.len() == operation.arity() {
      true  => Ok(Instruction { operation, args }),
      false => Err(args)
    }
  }

  pub fn operation(&self) -> Operation {
    self.operation
  }

  pub fn args(&self) -> &[Argument] {
    &self.args
  }

  /// The argument list as it appears in the trace, e.g. `[0, 42]`.
  pub fn args_text(&self) -> String {
    format!(
      "[{}]",
      self.args
          .iter()
          .map(Argument::to_string)
          .collect::<Vec<String>>()
          .join(", ")
    )
  }
}

impl Display for Instruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{}({})",
      self.operation,
      self.args
          .iter()
          .map(Argument::to_string)
          .collect::<Vec<String>>()
          .join(", ")
    )
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use std::convert::TryFrom;

  fn args(values: &[i64]) -> Vec<Argument> {
    values.iter().map(|value| Argument::from(*value)).collect()
  }

  #[test]
  fn mnemonic_round_trip(){
    for operation in ALL_OPERATIONS.iter() {
      let text: &'static str = operation.into();
      assert_eq!(Operation::from_str(text).unwrap(), *operation);
      assert_eq!(operation.to_string(), text);
    }
    assert_eq!(Operation::from_str("LOAD_CONST").unwrap(), Operation::LoadConst);
    assert!(Operation::from_str("load_const").is_err());
    assert!(Operation::from_str("LoadConst").is_err());
  }

  #[test]
  fn opcode_values(){
    assert_eq!(Operation::Abs.code(), 0);
    assert_eq!(Operation::WriteMem.code(), 1);
    assert_eq!(Operation::LoadConst.code(), 5);
    assert_eq!(Operation::ReadMem.code(), 6);
    for unused in [2u8, 3, 4, 7].iter() {
      assert!(Operation::try_from(*unused).is_err());
    }
  }

  #[test]
  fn arities(){
    assert_eq!(Operation::Abs.arity(), 2);
    assert_eq!(Operation::WriteMem.arity(), 2);
    assert_eq!(Operation::LoadConst.arity(), 2);
    assert_eq!(Operation::ReadMem.arity(), 3);
  }

  #[test]
  fn construct_checks_arity(){
    assert!(Instruction::new(Operation::ReadMem, args(&[1, 2, 3])).is_ok());
    assert_eq!(Instruction::new(Operation::ReadMem, args(&[1, 2])), Err(args(&[1, 2])));
    assert_eq!(Instruction::new(Operation::Abs, args(&[1, 2, 3])), Err(args(&[1, 2, 3])));
  }

  #[test]
  fn display(){
    let instruction = Instruction::new(Operation::LoadConst, args(&[0, 42])).unwrap();
    assert_eq!(instruction.to_string(), "LOAD_CONST(0, 42)");
    assert_eq!(instruction.args_text(), "[0, 42]");
  }

  #[test]
  fn operation_list(){
    assert_eq!(operation_names(), "ABS, WRITE_MEM, LOAD_CONST, READ_MEM");
  }

  #[test]
  fn argument_bits(){
    assert_eq!(Argument::from_str("42").unwrap().bits(), 42);
    assert_eq!(Argument::from_str("+42").unwrap().bits(), 42);
    assert_eq!(Argument::from_str("-1").unwrap().bits(), DoubleWord::MAX);
    assert_eq!(Argument::from_str("-0").unwrap().bits(), 0);
    assert_eq!(Argument::from(-7), Argument::from_str("-7").unwrap());
  }

  #[test]
  fn oversize_argument_keeps_low_bits(){
    // 2^64 + 5
    assert_eq!(Argument::from_str("18446744073709551621").unwrap().bits(), 5);
    // 2^63
    assert_eq!(Argument::from_str("9223372036854775808").unwrap().bits(), 1 << 63);
    // 10^30 mod 2^64
    assert_eq!(
      Argument::from_str("1000000000000000000000000000000").unwrap().bits(),
      (1_000_000_000_000_000_000_000_000_000_000u128 % (1u128 << 64)) as DoubleWord
    );
    // -(2^64 + 5)
    assert_eq!(
      Argument::from_str("-18446744073709551621").unwrap().bits(),
      5u64.wrapping_neg()
    );
  }

  #[test]
  fn argument_text_is_normalized(){
    assert_eq!(Argument::from_str("007").unwrap().to_string(), "7");
    assert_eq!(Argument::from_str("+3").unwrap().to_string(), "3");
    assert_eq!(Argument::from_str("-000").unwrap().to_string(), "0");
    assert_eq!(Argument::from_str("-012").unwrap().to_string(), "-12");
    assert_eq!(
      Argument::from_str("18446744073709551621").unwrap().to_string(),
      "18446744073709551621"
    );
  }

  #[test]
  fn non_integer_arguments(){
    for text in ["", "-", "+", "x", "4.5", "0x10", "1-2", "--1"].iter() {
      assert!(Argument::from_str(text).is_err(), "{} should not parse", text);
    }
  }
}
