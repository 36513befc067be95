pub mod builder;
pub mod record;

pub use builder::IndexBuilder;
pub use record::{DieKind, DieRecord, UnitRecord, load_units};
