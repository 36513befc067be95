//! A group of [`NameIndex`]es, one per kind of name a debugger looks up.

use super::NameIndex;
use crate::error::DieIndexError;
use dieindex_api::{DieRef, DwOffset, Name, NameReader};
use std::fmt;
use std::io;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IndexCategory {
    /// Unqualified function names.
    FunctionBasenames,
    /// Linkage (mangled) or fully qualified function names.
    FunctionFullnames,
    Methods,
    Globals,
    Types,
    Namespaces,
}

impl IndexCategory {
    pub const ALL: [IndexCategory; 6] = [
        IndexCategory::FunctionBasenames,
        IndexCategory::FunctionFullnames,
        IndexCategory::Methods,
        IndexCategory::Globals,
        IndexCategory::Types,
        IndexCategory::Namespaces,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IndexCategory::FunctionBasenames => "function-basenames",
            IndexCategory::FunctionFullnames => "function-fullnames",
            IndexCategory::Methods => "methods",
            IndexCategory::Globals => "globals",
            IndexCategory::Types => "types",
            IndexCategory::Namespaces => "namespaces",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for IndexCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for IndexCategory {
    type Err = DieIndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IndexCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DieIndexError::UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct IndexSet {
    indexes: [NameIndex; IndexCategory::ALL.len()],
}

impl IndexSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: IndexCategory) -> &NameIndex {
        &self.indexes[category.slot()]
    }

    pub fn get_mut(&mut self, category: IndexCategory) -> &mut NameIndex {
        &mut self.indexes[category.slot()]
    }

    pub fn insert(&mut self, category: IndexCategory, name: Name, die: DieRef) {
        self.get_mut(category).insert(name, die);
    }

    /// Total entries across all categories.
    pub fn len(&self) -> usize {
        self.indexes.iter().map(NameIndex::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.iter().all(NameIndex::is_empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (IndexCategory, &NameIndex)> + '_ {
        IndexCategory::ALL.into_iter().zip(self.indexes.iter())
    }

    /// Append `other`'s entries category by category.
    pub fn append(&mut self, other: &IndexSet) {
        for (mine, theirs) in self.indexes.iter_mut().zip(other.indexes.iter()) {
            mine.append(theirs);
        }
    }

    /// Finalize every category and release spare capacity.
    pub fn finalize<R: NameReader>(&mut self, reader: &R) {
        self.finalize_with(reader, true);
    }

    pub fn finalize_with<R: NameReader>(&mut self, reader: &R, shrink: bool) {
        for index in &mut self.indexes {
            index.finalize_with(reader, shrink);
        }
    }

    /// Entries of the compile unit at `cu_offset`, tagged with their category.
    pub fn find_by_cu(&self, cu_offset: DwOffset) -> Vec<(IndexCategory, DieRef)> {
        let mut out = Vec::new();
        for (category, index) in self.iter() {
            out.extend(
                index
                    .find_by_cu(cu_offset)
                    .into_iter()
                    .map(|die| (category, die)),
            );
        }
        out
    }

    pub fn dump<R: NameReader, W: io::Write>(&self, reader: &R, out: &mut W) -> io::Result<()> {
        for (category, index) in self.iter().filter(|(_, index)| !index.is_empty()) {
            writeln!(out, "{} ({} entries):", category, index.len())?;
            index.dump(reader, &mut *out)?;
        }
        Ok(())
    }
}
