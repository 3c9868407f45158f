//! Memory addresses, the size of the address space, and the half-open address ranges
//! used to select the part of memory that is dumped after a run.

use std::convert::TryFrom;
use std::fmt::{Display, Formatter};
use std::ops::Range;

use crate::error::UvmError;

// `AddressNumberType` is `usize`, as it is naturally an index into a memory store.
pub type AddressNumberType = usize;

/// Number of cells in the memory array.
pub const MEMORY_SIZE: AddressNumberType = 1024;

/// Converts a computed address into an index of the memory array, if it is one.
pub fn to_address(value: i64) -> Option<AddressNumberType> {
  match AddressNumberType::try_from(value) {
    Ok(address) if address < MEMORY_SIZE => Some(address),
    _ => None
  }
}

/// The half-open range `[lo, hi)` of addresses, with `lo <= hi <= MEMORY_SIZE`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct AddressRange {
  lo: AddressNumberType,
  hi: AddressNumberType
}

impl AddressRange {
  pub fn new(lo: AddressNumberType, hi: AddressNumberType) -> Result<AddressRange, UvmError> {
    match lo <= hi && hi <= MEMORY_SIZE {
      true  => Ok(AddressRange{ lo, hi }),
      false => Err(UvmError::InvalidRange { lo, hi })
    }
  }

  pub fn as_range(&self) -> Range<AddressNumberType> {
    self.lo..self.hi
  }
}

impl Display for AddressRange {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "[{}, {})", self.lo, self.hi)
  }
}
