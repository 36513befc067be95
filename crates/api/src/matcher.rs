use regex::{Regex, RegexSet};

/// Decides whether a name's text is selected by a pattern query.
pub trait NameMatcher {
    fn is_match(&self, name: &str) -> bool;
}

impl NameMatcher for Regex {
    fn is_match(&self, name: &str) -> bool {
        Regex::is_match(self, name)
    }
}

/// Matches when any pattern in the set matches.
impl NameMatcher for RegexSet {
    fn is_match(&self, name: &str) -> bool {
        RegexSet::is_match(self, name)
    }
}

impl<M: NameMatcher + ?Sized> NameMatcher for &M {
    fn is_match(&self, name: &str) -> bool {
        (**self).is_match(name)
    }
}

impl<M: NameMatcher + ?Sized> NameMatcher for Box<M> {
    fn is_match(&self, name: &str) -> bool {
        (**self).is_match(name)
    }
}
