pub mod matcher;
pub mod models;

// Re-export commonly used types
pub use matcher::NameMatcher;
pub use models::*;
