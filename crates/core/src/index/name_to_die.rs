//! Name → DIE index.
//!
//! `NameIndex` is an append-only list of `(Name, DieRef)` pairs with a
//! write-then-freeze lifecycle. Entries are pushed in any order while indexing;
//! [`NameIndex::finalize`] sorts them by name text so every name occupies one
//! contiguous run, which is what exact lookup binary-searches for. Pattern and
//! compile-unit scans walk storage order and work at any point.
//!
//! Names are resolved through a [`NameReader`] passed into each call that needs
//! the text. The index never owns name strings.

use dieindex_api::{DieArray, DieRef, DwOffset, Name, NameMatcher, NameReader};
use std::io;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameEntry {
    pub name: Name,
    pub die: DieRef,
}

#[derive(Debug, Clone)]
pub struct NameIndex {
    entries: Vec<NameEntry>,
    /// Cleared by any mutation, set by `finalize`.
    sorted: bool,
}

impl Default for NameIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl NameIndex {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            sorted: true,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            sorted: true,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Whether the entries are sorted by name and exact lookup can be trusted.
    pub fn is_finalized(&self) -> bool {
        self.sorted
    }

    /// Entries in storage order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &NameEntry> + '_ {
        self.entries.iter()
    }

    // ---- Mutation ----

    pub fn insert(&mut self, name: Name, die: DieRef) {
        self.entries.push(NameEntry { name, die });
        self.sorted = false;
    }

    /// Copy every entry of `other`, in its current order, onto the end.
    ///
    /// Nothing is merged or re-sorted; finalize again before exact lookups.
    pub fn append(&mut self, other: &NameIndex) {
        if other.is_empty() {
            return;
        }
        self.entries.extend_from_slice(&other.entries);
        self.sorted = false;
    }

    /// Sort by name text and release spare capacity.
    pub fn finalize<R: NameReader>(&mut self, reader: &R) {
        self.finalize_with(reader, true);
    }

    /// Sort by name text. Equal names keep their insertion order.
    pub fn finalize_with<R: NameReader>(&mut self, reader: &R, shrink: bool) {
        self.entries.sort_by(|a, b| reader.compare_names(a.name, b.name));
        if shrink {
            self.entries.shrink_to_fit();
        }
        self.sorted = true;
        tracing::debug!(entries = self.entries.len(), "finalized name index");
    }

    // ---- Exact lookup ----

    pub fn find<R: NameReader>(&self, reader: &R, name: Name) -> DieArray {
        let mut out = DieArray::new();
        self.find_into(reader, name, &mut out);
        out
    }

    /// Append every entry named `name` to `out`, returning how many were added.
    pub fn find_into<R: NameReader>(&self, reader: &R, name: Name, out: &mut DieArray) -> usize {
        self.find_str_into(reader, reader.resolve_name(name), out)
    }

    /// Exact lookup by text, for names that may never have been interned.
    pub fn find_str<R: NameReader>(&self, reader: &R, name: &str) -> DieArray {
        let mut out = DieArray::new();
        self.find_str_into(reader, name, &mut out);
        out
    }

    pub fn find_str_into<R: NameReader>(
        &self,
        reader: &R,
        name: &str,
        out: &mut DieArray,
    ) -> usize {
        let run = self.equal_range(reader, name);
        let found = run.len();
        out.extend(self.entries[run].iter().map(|e| e.die));
        found
    }

    /// Lower/upper bound of the run of entries whose name text is `key`.
    fn equal_range<R: NameReader>(&self, reader: &R, key: &str) -> Range<usize> {
        debug_assert!(
            self.sorted,
            "exact lookup on a NameIndex that was modified after finalize"
        );
        let lower = self
            .entries
            .partition_point(|e| reader.resolve_name(e.name) < key);
        let upper = lower
            + self.entries[lower..].partition_point(|e| reader.resolve_name(e.name) <= key);
        lower..upper
    }

    // ---- Scans ----

    pub fn find_matching<R, M>(&self, reader: &R, matcher: &M) -> DieArray
    where
        R: NameReader,
        M: NameMatcher + ?Sized,
    {
        let mut out = DieArray::new();
        self.find_matching_into(reader, matcher, &mut out);
        out
    }

    /// Append every entry whose name `matcher` accepts, in storage order.
    pub fn find_matching_into<R, M>(&self, reader: &R, matcher: &M, out: &mut DieArray) -> usize
    where
        R: NameReader,
        M: NameMatcher + ?Sized,
    {
        let start = out.len();
        out.extend(
            self.entries
                .iter()
                .filter(|e| matcher.is_match(reader.resolve_name(e.name)))
                .map(|e| e.die),
        );
        out.len() - start
    }

    pub fn find_by_cu(&self, cu_offset: DwOffset) -> DieArray {
        let mut out = DieArray::new();
        self.find_by_cu_into(cu_offset, &mut out);
        out
    }

    /// Append every entry owned by the compile unit at `cu_offset`, in storage order.
    pub fn find_by_cu_into(&self, cu_offset: DwOffset, out: &mut DieArray) -> usize {
        let start = out.len();
        out.extend(
            self.entries
                .iter()
                .filter(|e| e.die.cu_offset == cu_offset)
                .map(|e| e.die),
        );
        out.len() - start
    }

    /// Visit entries in storage order until `visitor` returns `false`.
    pub fn for_each<R, F>(&self, reader: &R, mut visitor: F)
    where
        R: NameReader,
        F: FnMut(&str, &DieRef) -> bool,
    {
        for entry in &self.entries {
            if !visitor(reader.resolve_name(entry.name), &entry.die) {
                break;
            }
        }
    }

    /// Write one line per entry: interner slot, DIE reference and name.
    pub fn dump<R: NameReader, W: io::Write>(&self, reader: &R, out: &mut W) -> io::Result<()> {
        for entry in &self.entries {
            writeln!(
                out,
                "{:>8}: {} \"{}\"",
                entry.name.index(),
                entry.die,
                reader.resolve_name(entry.name)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lasso::Rodeo;
    use regex::Regex;

    fn name(rodeo: &mut Rodeo, text: &str) -> Name {
        Name(rodeo.get_or_intern(text))
    }

    /// foo{1,10}, bar{1,20}, foo{2,30}, finalized.
    fn sample() -> (Rodeo, NameIndex) {
        let mut rodeo = Rodeo::default();
        let mut index = NameIndex::new();
        let foo = name(&mut rodeo, "foo");
        let bar = name(&mut rodeo, "bar");
        index.insert(foo, DieRef::new(1, 10));
        index.insert(bar, DieRef::new(1, 20));
        index.insert(foo, DieRef::new(2, 30));
        index.finalize(&rodeo);
        (rodeo, index)
    }

    fn names_in_order(index: &NameIndex, rodeo: &Rodeo) -> Vec<String> {
        index
            .iter()
            .map(|e| rodeo.resolve(&e.name.0).to_string())
            .collect()
    }

    #[test]
    fn test_exact_lookup() {
        let (mut rodeo, index) = sample();
        let foo = name(&mut rodeo, "foo");
        let bar = name(&mut rodeo, "bar");
        let baz = name(&mut rodeo, "baz");

        assert_eq!(
            index.find(&rodeo, foo),
            vec![DieRef::new(1, 10), DieRef::new(2, 30)]
        );
        assert_eq!(index.find(&rodeo, bar), vec![DieRef::new(1, 20)]);
        assert!(index.find(&rodeo, baz).is_empty());
    }

    #[test]
    fn test_find_str_without_interning() {
        let (rodeo, index) = sample();
        assert_eq!(index.find_str(&rodeo, "bar"), vec![DieRef::new(1, 20)]);
        assert!(index.find_str(&rodeo, "fo").is_empty());
        assert!(index.find_str(&rodeo, "fooo").is_empty());
        assert!(index.find_str(&rodeo, "").is_empty());
    }

    #[test]
    fn test_find_into_appends_and_counts() {
        let (rodeo, index) = sample();
        let foo = rodeo.get("foo").map(Name).unwrap();
        let mut out = vec![DieRef::new(9, 9)];

        assert_eq!(index.find_into(&rodeo, foo, &mut out), 2);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0], DieRef::new(9, 9));
    }

    #[test]
    fn test_find_by_cu() {
        let (_rodeo, index) = sample();
        let mut unit1 = index.find_by_cu(1);
        unit1.sort();
        assert_eq!(unit1, vec![DieRef::new(1, 10), DieRef::new(1, 20)]);
        assert_eq!(index.find_by_cu(2), vec![DieRef::new(2, 30)]);
        assert!(index.find_by_cu(3).is_empty());
    }

    #[test]
    fn test_find_by_cu_before_finalize() {
        let mut rodeo = Rodeo::default();
        let mut index = NameIndex::new();
        index.insert(name(&mut rodeo, "b"), DieRef::new(5, 1));
        index.insert(name(&mut rodeo, "a"), DieRef::new(6, 2));
        index.insert(name(&mut rodeo, "c"), DieRef::new(5, 3));

        assert!(!index.is_finalized());
        assert_eq!(
            index.find_by_cu(5),
            vec![DieRef::new(5, 1), DieRef::new(5, 3)]
        );
    }

    #[test]
    fn test_find_matching_uses_storage_order() {
        let (rodeo, index) = sample();
        let re = Regex::new("^f").unwrap();
        assert_eq!(
            index.find_matching(&rodeo, &re),
            vec![DieRef::new(1, 10), DieRef::new(2, 30)]
        );

        let mut unsorted = NameIndex::new();
        let mut rodeo = Rodeo::default();
        unsorted.insert(name(&mut rodeo, "fz"), DieRef::new(1, 1));
        unsorted.insert(name(&mut rodeo, "x"), DieRef::new(1, 2));
        unsorted.insert(name(&mut rodeo, "fa"), DieRef::new(1, 3));
        assert_eq!(
            unsorted.find_matching(&rodeo, &re),
            vec![DieRef::new(1, 1), DieRef::new(1, 3)]
        );
    }

    #[test]
    fn test_finalize_sorts_and_groups_runs() {
        let mut rodeo = Rodeo::default();
        let mut index = NameIndex::new();
        for (i, text) in ["m", "a", "z", "a", "m", "b"].iter().enumerate() {
            index.insert(name(&mut rodeo, text), DieRef::new(0, i as u32));
        }
        index.finalize(&rodeo);

        assert_eq!(names_in_order(&index, &rodeo), ["a", "a", "b", "m", "m", "z"]);
        assert!(index.is_finalized());
    }

    #[test]
    fn test_equal_names_keep_insertion_order() {
        let mut rodeo = Rodeo::default();
        let mut index = NameIndex::new();
        let dup = name(&mut rodeo, "dup");
        let other = name(&mut rodeo, "aaa");
        index.insert(dup, DieRef::new(3, 0));
        index.insert(other, DieRef::new(0, 0));
        index.insert(dup, DieRef::new(1, 0));
        index.insert(dup, DieRef::new(2, 0));
        index.finalize(&rodeo);

        assert_eq!(
            index.find(&rodeo, dup),
            vec![DieRef::new(3, 0), DieRef::new(1, 0), DieRef::new(2, 0)]
        );
    }

    #[test]
    fn test_finalize_is_idempotent() {
        let (rodeo, mut index) = sample();
        let once: Vec<NameEntry> = index.iter().copied().collect();
        index.finalize(&rodeo);
        let twice: Vec<NameEntry> = index.iter().copied().collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_finalize_shrinks_capacity() {
        let mut rodeo = Rodeo::default();
        let mut index = NameIndex::with_capacity(64);
        index.insert(name(&mut rodeo, "x"), DieRef::new(0, 1));
        index.finalize(&rodeo);
        assert!(index.capacity() < 64);

        let mut index = NameIndex::with_capacity(64);
        index.insert(name(&mut rodeo, "x"), DieRef::new(0, 1));
        index.finalize_with(&rodeo, false);
        assert!(index.capacity() >= 64);
    }

    #[test]
    fn test_mutation_clears_finalized() {
        let (mut rodeo, mut index) = sample();
        index.insert(name(&mut rodeo, "aaa"), DieRef::new(3, 40));
        assert!(!index.is_finalized());
        index.finalize(&rodeo);
        assert_eq!(names_in_order(&index, &rodeo)[0], "aaa");
    }

    #[test]
    fn test_append_keeps_both_orders() {
        let mut rodeo = Rodeo::default();
        let mut left = NameIndex::new();
        left.insert(name(&mut rodeo, "z"), DieRef::new(1, 1));
        left.insert(name(&mut rodeo, "y"), DieRef::new(1, 2));
        let mut right = NameIndex::new();
        right.insert(name(&mut rodeo, "b"), DieRef::new(2, 1));
        right.insert(name(&mut rodeo, "a"), DieRef::new(2, 2));
        left.finalize(&rodeo);
        right.finalize(&rodeo);

        left.append(&right);

        assert_eq!(left.len(), 4);
        assert_eq!(right.len(), 2);
        assert!(!left.is_finalized());
        assert_eq!(names_in_order(&left, &rodeo), ["y", "z", "a", "b"]);

        left.finalize(&rodeo);
        assert_eq!(names_in_order(&left, &rodeo), ["a", "b", "y", "z"]);
    }

    #[test]
    fn test_append_empty_is_noop() {
        let (rodeo, mut index) = sample();
        index.append(&NameIndex::new());

        assert_eq!(index.len(), 3);
        assert!(index.is_finalized());
        assert_eq!(index.find_str(&rodeo, "foo").len(), 2);
        assert_eq!(index.find_by_cu(1).len(), 2);
    }

    #[test]
    fn test_for_each_stops_early() {
        let (rodeo, index) = sample();

        let mut seen = Vec::new();
        index.for_each(&rodeo, |name, die| {
            seen.push((name.to_string(), *die));
            seen.len() < 2
        });
        assert_eq!(
            seen,
            vec![
                ("bar".to_string(), DieRef::new(1, 20)),
                ("foo".to_string(), DieRef::new(1, 10)),
            ]
        );

        let mut calls = 0;
        index.for_each(&rodeo, |_, _| {
            calls += 1;
            true
        });
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_for_each_on_empty_index() {
        let rodeo = Rodeo::default();
        let mut calls = 0;
        NameIndex::new().for_each(&rodeo, |_, _| {
            calls += 1;
            false
        });
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_dump_lists_every_entry() {
        let (rodeo, index) = sample();
        let mut out = Vec::new();
        index.dump(&rodeo, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("{0x00000001/0x00000014} \"bar\""));
        assert!(lines[1].contains("{0x00000001/0x0000000a}"));
        assert!(lines[2].contains("{0x00000002/0x0000001e} \"foo\""));
    }

    #[test]
    fn test_concurrent_readers() {
        let rodeo = lasso::ThreadedRodeo::new();
        let mut index = NameIndex::new();
        index.insert(Name(rodeo.get_or_intern("foo")), DieRef::new(1, 10));
        index.insert(Name(rodeo.get_or_intern("bar")), DieRef::new(1, 20));
        index.insert(Name(rodeo.get_or_intern("foo")), DieRef::new(2, 30));
        index.finalize(&rodeo);
        let re = Regex::new("o+").unwrap();

        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..100 {
                        assert_eq!(index.find_str(&rodeo, "foo").len(), 2);
                        assert_eq!(index.find_matching(&rodeo, &re).len(), 2);
                        assert_eq!(index.find_by_cu(1).len(), 2);
                    }
                });
            }
        });
    }
}
