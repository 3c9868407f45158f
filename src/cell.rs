use std::fmt::{Display, Formatter};

use crate::address::AddressNumberType;

/// Concrete in-memory representation of a memory cell. Arithmetic on cells wraps.
pub type Cell = i64;

/// One row of a memory dump.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct DumpRecord {
  pub address : AddressNumberType,
  pub value   : Cell
}

impl Display for DumpRecord {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "M[{}] = {}", self.address, self.value)
  }
}
