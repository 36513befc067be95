pub mod config;
pub mod error;
pub mod index;
pub mod ingest;
pub mod logging;

pub use config::IndexConfig;
pub use error::{DieIndexError, Result};
pub use index::{IndexCategory, IndexSet, NameEntry, NameIndex};
pub use ingest::IndexBuilder;
