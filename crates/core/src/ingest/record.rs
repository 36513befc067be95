//! Per-unit DIE records, the input the index builder consumes.

use crate::error::Result;
use dieindex_api::DwOffset;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DieKind {
    Function,
    Method,
    Variable,
    Type,
    Namespace,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DieRecord {
    pub offset: DwOffset,
    pub kind: DieKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub linkage_name: Option<String>,
}

impl DieRecord {
    pub fn new(offset: DwOffset, kind: DieKind, name: impl Into<String>) -> Self {
        Self {
            offset,
            kind,
            name: Some(name.into()),
            linkage_name: None,
        }
    }

    pub fn with_linkage_name(mut self, linkage_name: impl Into<String>) -> Self {
        self.linkage_name = Some(linkage_name.into());
        self
    }
}

/// One compile unit and the named DIEs it contains.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UnitRecord {
    pub offset: DwOffset,
    #[serde(default)]
    pub dies: Vec<DieRecord>,
}

/// Read a JSON array of [`UnitRecord`]s.
pub fn load_units(path: &Path) -> Result<Vec<UnitRecord>> {
    let reader = BufReader::new(File::open(path)?);
    let units: Vec<UnitRecord> = serde_json::from_reader(reader)?;
    tracing::debug!(path = %path.display(), units = units.len(), "loaded unit records");
    Ok(units)
}
