/*!
  The human readable textual form of bytecode is called assembly. One instruction per
  line: a mnemonic followed by whitespace separated decimal integers,

  ```text
  LOAD_CONST 0 42
  READ_MEM   2 1 3
  ```

  The mnemonic is matched against the `strum` serialization of `Operation`. Blank
  lines are skipped. Lines are numbered from 1 in error messages.
*/

use std::str::FromStr;

use nom::{
  bytes::complete::{take_while, take_while1},
  character::complete::{digit1, one_of},
  combinator::{all_consuming, map_res, opt, recognize},
  multi::many0,
  sequence::{delimited, pair, preceded},
  IResult
};

use crate::bytecode::{Argument, Instruction, Operation};
use crate::error::UvmError;

/// An instruction together with the source line it came from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsedLine {
  pub line        : usize,
  pub instruction : Instruction
}

/// Any run of whitespace, possibly empty.
fn whitespace0_p(input: &str) -> IResult<&str, &str> {
  take_while(char::is_whitespace)(input)
}

fn whitespace1_p(input: &str) -> IResult<&str, &str> {
  take_while1(char::is_whitespace)(input)
}

fn mnemonic_p(input: &str) -> IResult<&str, &str> {
  take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_')(input)
}

fn argument_p(input: &str) -> IResult<&str, Argument> {
  map_res(
    recognize(pair(opt(one_of("+-")), digit1)),
    |text: &str| text.parse::<Argument>()
  )(input)
}

fn line_p(input: &str) -> IResult<&str, (&str, Vec<Argument>)> {
  all_consuming(
    delimited(
      whitespace0_p,
      pair(mnemonic_p, many0(preceded(whitespace1_p, argument_p))),
      whitespace0_p
    )
  )(input)
}

/// Parses a single, non-blank, line of assembly.
pub fn parse_line(line: usize, text: &str) -> Result<ParsedLine, UvmError> {
  let (_rest, (name, args)) =
    line_p(text).map_err(|_e| UvmError::Syntax { line, text: text.trim().to_string() })?;

  let operation =
    Operation::from_str(name).map_err(|_e| UvmError::UnknownMnemonic {
      line,
      name: name.to_string()
    })?;

  let instruction =
    Instruction::new(operation, args).map_err(|args| UvmError::WrongArity {
      line,
      operation,
      expected: operation.arity(),
      given: args.len()
    })?;

  Ok(ParsedLine{ line, instruction })
}

/// Parses a whole program. The first bad line aborts the parse.
pub fn parse_assembly(text: &str) -> Result<Vec<ParsedLine>, UvmError> {
  text.lines()
      .enumerate()
      .filter(|(_idx, line_text)| !line_text.trim().is_empty())
      .map(|(idx, line_text)| parse_line(idx + 1, line_text))
      .collect()
}


#[cfg(test)]
mod tests {
  use super::*;

  fn instruction(operation: Operation, args: Vec<i64>) -> Instruction {
    Instruction::new(operation, args.into_iter().map(Argument::from).collect()).unwrap()
  }

  #[test]
  fn single_line(){
    let parsed = parse_line(1, "LOAD_CONST 0 42").unwrap();
    assert_eq!(parsed.line, 1);
    assert_eq!(parsed.instruction, instruction(Operation::LoadConst, vec![0, 42]));
  }

  #[test]
  fn surrounding_whitespace(){
    let parsed = parse_line(7, " \t READ_MEM   2\t1 3   ").unwrap();
    assert_eq!(parsed.line, 7);
    assert_eq!(parsed.instruction, instruction(Operation::ReadMem, vec![2, 1, 3]));
  }

  #[test]
  fn signed_arguments(){
    let parsed = parse_line(1, "ABS -1 +2").unwrap();
    assert_eq!(parsed.instruction, instruction(Operation::Abs, vec![-1, 2]));
    assert_eq!(parsed.instruction.args_text(), "[-1, 2]");
  }

  #[test]
  fn any_whitespace_separates(){
    let parsed = parse_line(1, "\u{b}LOAD_CONST\u{c}0\u{a0}42\u{2003}").unwrap();
    assert_eq!(parsed.instruction, instruction(Operation::LoadConst, vec![0, 42]));
  }

  #[test]
  fn oversize_arguments_parse(){
    let parsed = parse_line(1, "LOAD_CONST 0 18446744073709551621").unwrap();
    assert_eq!(parsed.instruction.args()[1].bits(), 5);
    assert_eq!(parsed.instruction.args_text(), "[0, 18446744073709551621]");
  }

  #[test]
  fn program_line_numbers(){
    let text = "LOAD_CONST 0 42\n\n   \nLOAD_CONST 1 0\r\nWRITE_MEM 1 0\n";
    let parsed = parse_assembly(text).unwrap();
    let lines: Vec<usize> = parsed.iter().map(|p| p.line).collect();
    assert_eq!(lines, vec![1, 4, 5]);
    assert_eq!(parsed[2].instruction, instruction(Operation::WriteMem, vec![1, 0]));
  }

  #[test]
  fn empty_program(){
    assert!(parse_assembly("").unwrap().is_empty());
    assert!(parse_assembly("\n  \n").unwrap().is_empty());
  }

  #[test]
  fn unknown_mnemonic(){
    let result = parse_assembly("LOAD_CONST 0 1\nJUMP 3");
    match result {
      Err(UvmError::UnknownMnemonic { line, name }) => {
        assert_eq!(line, 2);
        assert_eq!(name, "JUMP");
      }
      other => panic!("unexpected result: {:?}", other)
    }
    assert!(matches!(parse_line(1, "load_const 0 1"), Err(UvmError::UnknownMnemonic { .. })));
  }

  #[test]
  fn wrong_arity(){
    assert!(matches!(
      parse_line(3, "READ_MEM 1 2"),
      Err(UvmError::WrongArity { line: 3, operation: Operation::ReadMem, expected: 3, given: 2 })
    ));
    assert!(matches!(
      parse_line(1, "ABS 1 2 3"),
      Err(UvmError::WrongArity { expected: 2, given: 3, .. })
    ));
    assert!(matches!(
      parse_line(1, "WRITE_MEM"),
      Err(UvmError::WrongArity { expected: 2, given: 0, .. })
    ));
  }

  #[test]
  fn non_integer_argument(){
    assert!(matches!(parse_line(1, "LOAD_CONST 0 x"), Err(UvmError::Syntax { .. })));
    assert!(matches!(parse_line(1, "LOAD_CONST 0 4.5"), Err(UvmError::Syntax { .. })));
    assert!(matches!(parse_line(1, "LOAD_CONST 0 0x10"), Err(UvmError::Syntax { .. })));
    assert!(matches!(parse_line(1, "LOAD_CONST, 0, 1"), Err(UvmError::Syntax { .. })));
    assert!(matches!(parse_line(1, "LOAD_CONST 0 1e3"), Err(UvmError::Syntax { .. })));
  }
}
