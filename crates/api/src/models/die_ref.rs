use serde::{Deserialize, Serialize};
use std::fmt;

/// Offset into a debug information section.
pub type DwOffset = u32;

/// Location of one debug information entry: the offset of the compile unit
/// that owns it and the offset of the entry itself.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub struct DieRef {
    pub cu_offset: DwOffset,
    pub die_offset: DwOffset,
}

/// Result list shared by every index query.
pub type DieArray = Vec<DieRef>;

impl DieRef {
    pub const fn new(cu_offset: DwOffset, die_offset: DwOffset) -> Self {
        Self {
            cu_offset,
            die_offset,
        }
    }
}

impl fmt::Display for DieRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{0x{:08x}/0x{:08x}}}", self.cu_offset, self.die_offset)
    }
}
