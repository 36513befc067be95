/// Settings for building an [`IndexSet`](crate::index::IndexSet) from unit records.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Worker threads used to index compile units. 0 lets rayon decide.
    pub threads: usize,
    /// Release spare capacity when the indexes are finalized.
    pub shrink_to_fit: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            threads: 0,
            shrink_to_fit: true,
        }
    }
}
