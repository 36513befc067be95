//! Builds an [`IndexSet`] from unit records.
//!
//! Each compile unit is indexed on its own into a private `IndexSet`, so units
//! can be processed in parallel against a shared `ThreadedRodeo`. The partial
//! sets are then appended in input order and finalized once, which makes the
//! result independent of how many threads did the work.

use super::record::{DieKind, DieRecord, UnitRecord};
use crate::config::IndexConfig;
use crate::error::Result;
use crate::index::{IndexCategory, IndexSet};
use dieindex_api::{DieRef, DwOffset, Name};
use lasso::ThreadedRodeo;
use rayon::prelude::*;
use tracing::{info, trace, warn};

pub struct IndexBuilder<'a> {
    config: IndexConfig,
    interner: &'a ThreadedRodeo,
}

impl<'a> IndexBuilder<'a> {
    pub fn new(config: IndexConfig, interner: &'a ThreadedRodeo) -> Self {
        Self { config, interner }
    }

    /// Index every unit and return the merged, finalized set.
    pub fn build(&self, units: &[UnitRecord]) -> Result<IndexSet> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.threads)
            .build()?;

        let partials: Vec<IndexSet> =
            pool.install(|| units.par_iter().map(|unit| self.index_unit(unit)).collect());

        let mut set = IndexSet::new();
        for partial in &partials {
            set.append(partial);
        }
        set.finalize_with(self.interner, self.config.shrink_to_fit);

        info!(
            units = units.len(),
            entries = set.len(),
            threads = pool.current_num_threads(),
            "built name indexes"
        );
        Ok(set)
    }

    /// Index the named DIEs of a single compile unit. The result is not finalized.
    pub fn index_unit(&self, unit: &UnitRecord) -> IndexSet {
        let mut set = IndexSet::new();
        for die in &unit.dies {
            self.index_die(&mut set, unit.offset, die);
        }
        if set.is_empty() && !unit.dies.is_empty() {
            warn!(cu_offset = unit.offset, "compile unit has no named DIEs");
        }
        set
    }

    fn index_die(&self, set: &mut IndexSet, cu_offset: DwOffset, die: &DieRecord) {
        let name = match die.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => {
                trace!(cu_offset, die_offset = die.offset, "skipping unnamed DIE");
                return;
            }
        };
        let linkage = die.linkage_name.as_deref().filter(|l| !l.is_empty());
        let die_ref = DieRef::new(cu_offset, die.offset);

        match die.kind {
            DieKind::Function => {
                self.insert(set, IndexCategory::FunctionBasenames, name, die_ref);
                self.insert(
                    set,
                    IndexCategory::FunctionFullnames,
                    linkage.unwrap_or(name),
                    die_ref,
                );
            }
            DieKind::Method => {
                self.insert(set, IndexCategory::Methods, name, die_ref);
                if let Some(linkage) = linkage {
                    self.insert(set, IndexCategory::FunctionFullnames, linkage, die_ref);
                }
            }
            DieKind::Variable => {
                self.insert(set, IndexCategory::Globals, name, die_ref);
                if let Some(linkage) = linkage.filter(|l| *l != name) {
                    self.insert(set, IndexCategory::Globals, linkage, die_ref);
                }
            }
            DieKind::Type => self.insert(set, IndexCategory::Types, name, die_ref),
            DieKind::Namespace => self.insert(set, IndexCategory::Namespaces, name, die_ref),
        }
    }

    fn insert(&self, set: &mut IndexSet, category: IndexCategory, text: &str, die: DieRef) {
        let name = Name(self.interner.get_or_intern(text));
        set.insert(category, name, die);
    }
}
