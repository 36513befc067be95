pub mod die_ref;
pub mod name;

pub use die_ref::*;
pub use name::*;
