//! Interned name handles.
//!
//! A [`Name`] is a `lasso` key. The strings behind it live in whatever interner
//! produced the key; anything that needs the text, or needs to order names by
//! their text, goes through a [`NameReader`].

use lasso::{Key, Reader, Resolver, Spur};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Name(pub Spur);

impl Name {
    /// Raw interner slot, mainly useful for diagnostics.
    pub fn index(self) -> usize {
        self.0.into_usize()
    }

    pub fn resolve<'a, R: NameReader>(self, reader: &'a R) -> &'a str {
        reader.resolve_name(self)
    }
}

/// Read access to the interner that owns a set of [`Name`] handles.
pub trait NameReader {
    fn resolve_name(&self, name: Name) -> &str;

    /// Handle for `text` if it has been interned.
    fn lookup_name(&self, text: &str) -> Option<Name>;

    /// Total order over names by their content.
    fn compare_names(&self, a: Name, b: Name) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }
        self.resolve_name(a).cmp(self.resolve_name(b))
    }
}

impl<T: Reader<Spur>> NameReader for T {
    fn resolve_name(&self, name: Name) -> &str {
        Resolver::resolve(self, &name.0)
    }

    fn lookup_name(&self, text: &str) -> Option<Name> {
        Reader::get(self, text).map(Name)
    }
}
