/*!
  This module is responsible for the encoding and decoding of binary instructions.

  Encoding is table driven: every operation has a `Layout` listing the bit field each
  of its source arguments is packed into. Decoding does not consult the table. It
  always splits a word into the same four fields `A`, `B`, `C`, `D`, whatever the
  opcode. The two disagree for every operation except `READ_MEM`, and that
  disagreement is observable in what the interpreter computes.
*/
use std::convert::TryFrom;
use std::fmt::{Display, Formatter};

use super::{Operation, Instruction};
use crate::error::UvmError;

// If you change this you must also change `words_to_bytes` and `bytes_to_words`.
pub type DoubleWord = u64;
pub const WORD_BYTES: usize = 8;

/// A contiguous run of `width` bits whose least significant bit is at `shift`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Field {
  pub shift : u32,
  pub width : u32
}

impl Field {
  pub const fn new(shift: u32, width: u32) -> Field {
    Field{ shift, width }
  }

  /// The unshifted mask, e.g. `0xFFFFF` for a 20 bit field.
  pub const fn mask(&self) -> DoubleWord {
    (1 << self.width) - 1
  }

  /// The bits of the word this field occupies.
  pub const fn bits(&self) -> DoubleWord {
    self.mask() << self.shift
  }

  /// Values wider than the field are truncated to it, silently.
  pub fn pack(&self, value: DoubleWord) -> DoubleWord {
    (value << self.shift) & self.bits()
  }

  pub fn extract(&self, word: DoubleWord) -> DoubleWord {
    (word & self.bits()) >> self.shift
  }
}

// region Fields

/// Opcode, bits 63–61.
pub const FIELD_A: Field = Field::new(61, 3);
/// First operand, bits 60–41.
pub const FIELD_B: Field = Field::new(41, 20);
/// Second operand as the decoder sees it, bits 40–21.
pub const FIELD_C: Field = Field::new(21, 20);
/// Offset, bits 14–0.
pub const FIELD_D: Field = Field::new(0, 15);

/// `LOAD_CONST` constant, bits 42–0. Bits 42–41 are shared with `FIELD_B`.
pub const FIELD_C_CONST: Field = Field::new(0, 43);
/// `WRITE_MEM`/`ABS` source address, bits 19–0.
pub const FIELD_C_LOW: Field = Field::new(0, 20);

// endregion

/// The encoding of one operation: the field each source argument is packed into,
/// in argument order. The opcode always goes into `FIELD_A`.
#[derive(Debug, Eq, PartialEq)]
pub struct Layout {
  pub operands : &'static [Field]
}

#[cfg(test)]
impl Layout {
  /// True if any two fields of the layout, the opcode included, share a bit.
  pub fn overlaps(&self) -> bool {
    let mut occupied = FIELD_A.bits();
    for field in self.operands {
      if occupied & field.bits() != 0 {
        return true;
      }
      occupied |= field.bits();
    }
    false
  }
}

// region Encoding table

pub static ABS_LAYOUT: Layout = Layout {
  operands: &[FIELD_B, FIELD_C_LOW]
};

pub static WRITE_MEM_LAYOUT: Layout = Layout {
  operands: &[FIELD_B, FIELD_C_LOW]
};

pub static LOAD_CONST_LAYOUT: Layout = Layout {
  operands: &[FIELD_B, FIELD_C_CONST]
};

pub static READ_MEM_LAYOUT: Layout = Layout {
  operands: &[FIELD_B, FIELD_C, FIELD_D]
};

// endregion

pub fn encoding_layout(operation: Operation) -> &'static Layout {
  match operation {
    Operation::Abs       => &ABS_LAYOUT,
    Operation::WriteMem  => &WRITE_MEM_LAYOUT,
    Operation::LoadConst => &LOAD_CONST_LAYOUT,
    Operation::ReadMem   => &READ_MEM_LAYOUT,
  }
}

/**
  Encodes the instruction into a single word by OR-ing together the opcode and each
  argument packed into its field from the operation's layout. Arguments too wide
  for their field are truncated, and overlapping fields are OR-ed together.
*/
pub fn encode_instruction(instruction: &Instruction) -> DoubleWord {
  let layout = encoding_layout(instruction.operation());

  layout.operands
        .iter()
        .zip(instruction.args())
        .fold(
          FIELD_A.pack(instruction.operation().code() as DoubleWord),
          |word, (field, arg)| word | field.pack(arg.bits())
        )
}

/// The four fields of a word as the interpreter sees them.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct DecodedInstruction {
  pub opcode : u8,
  pub b      : DoubleWord,
  pub c      : DoubleWord,
  pub d      : DoubleWord
}

impl DecodedInstruction {
  /// `None` for the opcodes with no operation, which execute as no-ops.
  pub fn operation(&self) -> Option<Operation> {
    Operation::try_from(self.opcode).ok()
  }
}

impl Display for DecodedInstruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self.operation() {
      Some(operation) => write!(f, "{}", operation)?,
      None            => write!(f, "UNKNOWN[{}]", self.opcode)?
    }
    write!(f, "(B={}, C={}, D={})", self.b, self.c, self.d)
  }
}

/// Splits a word into `A`, `B`, `C`, `D` using the same fields for every opcode.
pub fn decode_instruction(word: DoubleWord) -> DecodedInstruction {
  DecodedInstruction {
    opcode : FIELD_A.extract(word) as u8,
    b      : FIELD_B.extract(word),
    c      : FIELD_C.extract(word),
    d      : FIELD_D.extract(word)
  }
}

/// Serializes words as consecutive big-endian 8 byte groups.
pub fn words_to_bytes(words: &[DoubleWord]) -> Vec<u8> {
  words.iter()
       .flat_map(|word| word.to_be_bytes().to_vec())
       .collect()
}

pub fn bytes_to_words(bytes: &[u8]) -> Result<Vec<DoubleWord>, UvmError> {
  if bytes.len() % WORD_BYTES != 0 {
    return Err(UvmError::TruncatedBinary { length: bytes.len() });
  }

  Ok(
    bytes.chunks_exact(WORD_BYTES)
         .map(|chunk| {
           let mut buffer = [0u8; WORD_BYTES];
           buffer.copy_from_slice(chunk);
           DoubleWord::from_be_bytes(buffer)
         })
         .collect()
  )
}
