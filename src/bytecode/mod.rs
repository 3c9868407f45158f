/*!

  Every UVM instruction is one 64 bit word, stored big-endian. The three most
  significant bits are the opcode. The remaining bits are split into operand fields:

    A:  3 bits   63–61   opcode
    B: 20 bits   60–41   first operand, an address
    C: 20 bits   40–21   second operand, an address
    D: 15 bits   14–0    offset

  That is how the interpreter reads every word. The assembler only packs `READ_MEM`
  that way. `WRITE_MEM` and `ABS` put their second operand unshifted into bits 19–0,
  and `LOAD_CONST` puts its constant into bits 42–0, two of which belong to `B`. The
  interpreter therefore never sees the source address of a `WRITE_MEM` or `ABS` (its
  `C` is always zero), sees only bits 40–21 of a `LOAD_CONST` constant, and sees a
  `LOAD_CONST` address OR-ed with the two high bits of the constant. This is the
  behavior of the format as deployed and is kept as is. The per-operation layouts
  live in one table in `binary` so that the mismatch can be read off in one place.

  Instructions have no labels and no branches, so encoding a line never depends on
  any other line.

*/

mod assembly;
mod binary;
mod instruction;

pub use assembly::parse_assembly;
pub use binary::{
  encode_instruction, decode_instruction, words_to_bytes, bytes_to_words,
  DecodedInstruction, DoubleWord
};
#[cfg(test)]
pub use binary::{FIELD_B, FIELD_C};
pub use instruction::{operation_names, Argument, Instruction, Operation};
