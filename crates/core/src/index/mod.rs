pub mod name_to_die;
pub mod set;

pub use name_to_die::{NameEntry, NameIndex};
pub use set::{IndexCategory, IndexSet};
