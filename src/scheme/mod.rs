//! Colour schemes: the mapping from symbolic names to concrete colours.
//!
//! - `ColourScheme` - the single capability the resolver needs
//! - `Palette` - an in-memory scheme with named variants (light, dark, ...)
//! - `CatalogScheme` - asset-catalog style lookup with dot-segment fallback

mod catalog;
mod palette;

pub use catalog::{lookup_with_fallback, CatalogScheme};
pub use palette::{Palette, PaletteBuilder, VariantScheme};

use crate::types::{Colour, SymbolicName};

/// Maps a symbolic name to a concrete colour.
///
/// `None` means the scheme has no such colour. Schemes that are meant to be
/// exhaustive should be checked with [`crate::coverage::check_coverage`]
/// rather than papering over gaps with a default colour.
///
/// Resolution may call a scheme from several threads at once when the host
/// shares it; implementations with interior state must handle that.
pub trait ColourScheme<C = Colour> {
    fn colour_for(&self, name: &SymbolicName) -> Option<C>;
}

impl<C, F> ColourScheme<C> for F
where
    F: Fn(&SymbolicName) -> Option<C>,
{
    fn colour_for(&self, name: &SymbolicName) -> Option<C> {
        self(name)
    }
}
