//! Asset-catalog lookup with hierarchical fallback.
//!
//! An asset catalog usually defines a few general colours (`primary`) and a
//! handful of specific ones (`primary.lvl1`). A lookup for a name the catalog
//! does not define drops the last dot segment and tries again:
//! `primary.lvl1.hover` -> `primary.lvl1` -> `primary`.

use crate::types::{prefix_matching_enabled, SymbolicName};

use super::ColourScheme;

/// Wraps a scheme with dot-segment fallback.
///
/// Fallback only happens while prefix matching is enabled; otherwise lookups
/// are exact.
#[derive(Debug, Clone)]
pub struct CatalogScheme<S> {
    inner: S,
}

impl<S> CatalogScheme<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Look up `name`, returning the colour and the name that supplied it.
    pub fn lookup<C>(&self, name: &SymbolicName) -> Option<(SymbolicName, C)>
    where
        S: ColourScheme<C>,
    {
        lookup_with_fallback(&self.inner, name)
    }
}

/// Catalog lookup against any scheme: exact first, then each dot-segment
/// ancestor in turn while prefix matching is enabled. Stripping stops before
/// the name becomes empty, so `.hover` never reaches the empty name.
pub fn lookup_with_fallback<C, S>(scheme: &S, name: &SymbolicName) -> Option<(SymbolicName, C)>
where
    S: ColourScheme<C> + ?Sized,
{
    let mut candidate = name.clone();
    loop {
        if let Some(colour) = scheme.colour_for(&candidate) {
            if &candidate != name {
                tracing::debug!(requested = %name, matched = %candidate, "catalog fallback");
            }
            return Some((candidate, colour));
        }

        if !prefix_matching_enabled() {
            return None;
        }

        candidate = candidate.parent().filter(|parent| !parent.is_empty())?;
    }
}

impl<C, S> ColourScheme<C> for CatalogScheme<S>
where
    S: ColourScheme<C>,
{
    fn colour_for(&self, name: &SymbolicName) -> Option<C> {
        self.lookup(name).map(|(_, colour)| colour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::Palette;
    use crate::types::name::test_support::PrefixMode;
    use crate::types::Colour;

    fn catalog() -> CatalogScheme<Palette> {
        let mut palette = Palette::new("catalog");
        palette.insert("primary", Colour::rgb(255, 0, 0));
        palette.insert("primary.lvl1", Colour::rgb(200, 0, 0));
        CatalogScheme::new(palette)
    }

    #[test]
    fn test_exact_hit() {
        let _mode = PrefixMode::set(true);
        let (matched, colour) = catalog().lookup(&"primary.lvl1".into()).unwrap();
        assert_eq!(matched.as_str(), "primary.lvl1");
        assert_eq!(colour, Colour::rgb(200, 0, 0));
    }

    #[test]
    fn test_strips_segments_until_hit() {
        let _mode = PrefixMode::set(true);
        let (matched, colour) = catalog().lookup(&"primary.lvl1.hover.x".into()).unwrap();
        assert_eq!(matched.as_str(), "primary.lvl1");
        assert_eq!(colour, Colour::rgb(200, 0, 0));

        assert_eq!(
            catalog().colour_for(&"primary.lvl2".into()),
            Some(Colour::rgb(255, 0, 0))
        );
    }

    #[test]
    fn test_gives_up_when_name_runs_out() {
        let _mode = PrefixMode::set(true);
        assert_eq!(catalog().colour_for(&"secondary.lvl1".into()), None);
        assert_eq!(catalog().colour_for(&"".into()), None);
    }

    #[test]
    fn test_leading_dot_name_stops_before_empty() {
        let _mode = PrefixMode::set(true);
        let root = |name: &SymbolicName| name.is_empty().then_some(Colour::WHITE);
        let catalog = CatalogScheme::new(root);

        assert_eq!(catalog.colour_for(&".hover".into()), None);
        assert_eq!(catalog.colour_for(&"".into()), Some(Colour::WHITE));
    }

    #[test]
    fn test_exact_only_without_prefix_matching() {
        let _mode = PrefixMode::set(false);
        assert_eq!(catalog().colour_for(&"primary.lvl2".into()), None);
        assert_eq!(
            catalog().colour_for(&"primary".into()),
            Some(Colour::rgb(255, 0, 0))
        );
    }
}
