//! Symbolic names and the prefix relation used for fallback matching.

use std::borrow::Borrow;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Process-wide prefix matching switch.
///
/// Treat this as configuration: set it once at startup, before any
/// resolution runs. Toggling it while other threads resolve is not
/// synchronised with those resolutions.
static PREFIX_MATCHING: AtomicBool = AtomicBool::new(true);

/// Whether prefix matching is enabled (the default).
pub fn prefix_matching_enabled() -> bool {
    PREFIX_MATCHING.load(Ordering::Relaxed)
}

/// Enable or disable prefix matching for the whole process.
pub fn set_prefix_matching(enabled: bool) {
    PREFIX_MATCHING.store(enabled, Ordering::Relaxed);
    tracing::debug!(enabled, "prefix matching configured");
}

/// An immutable name for a symbolic colour, e.g. `primary.lvl1`.
///
/// Names are dot-separated by convention only; equality, hashing and the
/// prefix relation all work on the raw string.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolicName(Arc<str>);

impl SymbolicName {
    pub fn new(value: impl AsRef<str>) -> Self {
        Self(Arc::from(value.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when `other` starts with this name as a literal string prefix.
    ///
    /// Not segment aware: `primary` is a prefix of `primaryX`.
    pub fn is_prefix_of(&self, other: &SymbolicName) -> bool {
        other.as_str().starts_with(self.as_str())
    }

    /// The name with its last dot segment removed, if there is a dot.
    ///
    /// `primary.lvl1.hover` -> `primary.lvl1` -> `primary` -> `None`.
    pub fn parent(&self) -> Option<SymbolicName> {
        self.0.rfind('.').map(|pos| SymbolicName::new(&self.0[..pos]))
    }
}

/// Does `value` match `pattern`?
///
/// With prefix matching enabled this is [`SymbolicName::is_prefix_of`],
/// so an empty pattern matches everything. Otherwise it is plain equality.
pub fn matches(pattern: &SymbolicName, value: &SymbolicName) -> bool {
    if prefix_matching_enabled() {
        pattern.is_prefix_of(value)
    } else {
        pattern == value
    }
}

impl fmt::Display for SymbolicName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for SymbolicName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolicName({:?})", &*self.0)
    }
}

impl From<&str> for SymbolicName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SymbolicName {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl AsRef<str> for SymbolicName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SymbolicName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::{Mutex, MutexGuard};

    static FLAG_LOCK: Mutex<()> = Mutex::new(());

    /// Serialises tests that read or flip the process-wide flag, and restores
    /// the default when the guard drops.
    pub(crate) struct PrefixMode {
        _guard: MutexGuard<'static, ()>,
    }

    impl PrefixMode {
        pub(crate) fn set(enabled: bool) -> Self {
            let guard = FLAG_LOCK.lock().unwrap_or_else(|e| e.into_inner());
            super::set_prefix_matching(enabled);
            Self { _guard: guard }
        }
    }

    impl Drop for PrefixMode {
        fn drop(&mut self) {
            super::set_prefix_matching(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::PrefixMode;
    use super::*;

    #[test]
    fn test_equality_is_exact() {
        assert_eq!(SymbolicName::new("primary"), SymbolicName::from("primary"));
        assert_ne!(SymbolicName::new("primary"), SymbolicName::new("Primary"));
    }

    #[test]
    fn test_prefix_is_lexical() {
        let primary = SymbolicName::new("primary");
        assert!(primary.is_prefix_of(&"primary.lvl1".into()));
        assert!(primary.is_prefix_of(&"primaryX".into()));
        assert!(!primary.is_prefix_of(&"prim".into()));
    }

    #[test]
    fn test_matches_prefix_mode() {
        let _mode = PrefixMode::set(true);
        assert!(matches(&"primary".into(), &"primary.lvl1".into()));
        assert!(matches(&"".into(), &"anything".into()));
        assert!(!matches(&"Primary".into(), &"primary.lvl1".into()));
    }

    #[test]
    fn test_matches_exact_mode() {
        let _mode = PrefixMode::set(false);
        assert!(matches(&"primary".into(), &"primary".into()));
        assert!(!matches(&"primary".into(), &"primary.lvl1".into()));
        assert!(!matches(&"".into(), &"anything".into()));
    }

    #[test]
    fn test_parent_strips_last_segment() {
        let name = SymbolicName::new("primary.lvl1.hover");
        let parent = name.parent().unwrap();
        assert_eq!(parent.as_str(), "primary.lvl1");
        assert_eq!(parent.parent().unwrap().as_str(), "primary");
        assert!(SymbolicName::new("primary").parent().is_none());
    }
}
