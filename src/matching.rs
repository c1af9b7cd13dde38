//! Ordered name matching.
//!
//! Applications often enumerate the names they know about and map an
//! arbitrary resolved name onto that list. With prefix matching on, a general
//! entry (`primary`) catches every name under it (`primary.lvl1`), so order
//! matters: the first entry that matches wins. Put specific names before the
//! general ones they share a prefix with.
//!
//! ```
//! use swatch::matching::NameMatcher;
//!
//! let matcher = NameMatcher::new()
//!     .case("primary.lvl1", "emphasis")
//!     .case("primary", "brand")
//!     .otherwise("neutral");
//!
//! assert_eq!(matcher.find(&"primary.lvl1.hover".into()), Some(&"emphasis"));
//! assert_eq!(matcher.find(&"primary.lvl2".into()), Some(&"brand"));
//! assert_eq!(matcher.find(&"secondary".into()), Some(&"neutral"));
//! ```

use crate::types::{matches, SymbolicName};

/// An ordered list of `(pattern, handler)` cases with an optional default.
#[derive(Debug, Clone)]
pub struct NameMatcher<T> {
    cases: Vec<(SymbolicName, T)>,
    default: Option<T>,
}

impl<T> NameMatcher<T> {
    pub fn new() -> Self {
        Self {
            cases: Vec::new(),
            default: None,
        }
    }

    /// Append a case. Cases are tried in the order they were added.
    pub fn case(mut self, pattern: impl Into<SymbolicName>, handler: T) -> Self {
        self.cases.push((pattern.into(), handler));
        self
    }

    /// Handler used when no case matches.
    pub fn otherwise(mut self, handler: T) -> Self {
        self.default = Some(handler);
        self
    }

    /// The handler of the first case whose pattern matches `name`.
    pub fn find(&self, name: &SymbolicName) -> Option<&T> {
        self.find_case(name)
            .map(|(_, handler)| handler)
            .or(self.default.as_ref())
    }

    /// The first matching case, pattern included. Ignores the default.
    pub fn find_case(&self, name: &SymbolicName) -> Option<(&SymbolicName, &T)> {
        self.cases
            .iter()
            .find(|(pattern, _)| matches(pattern, name))
            .map(|(pattern, handler)| (pattern, handler))
    }

    pub fn patterns(&self) -> impl Iterator<Item = &SymbolicName> {
        self.cases.iter().map(|(pattern, _)| pattern)
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

impl<T> Default for NameMatcher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<(SymbolicName, T)> for NameMatcher<T> {
    fn from_iter<I: IntoIterator<Item = (SymbolicName, T)>>(iter: I) -> Self {
        Self {
            cases: iter.into_iter().collect(),
            default: None,
        }
    }
}
