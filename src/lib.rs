//! swatch - symbolic colours resolved through pluggable schemes
//!
//! Applications name colours by meaning (`primary.lvl1`) and compose them
//! lazily (blend, opacity, transforms). A scheme turns names into concrete
//! colours when the colour is finally needed.

pub mod cli;
pub mod coverage;
pub mod error;
pub mod manifest;
pub mod matching;
pub mod output;
pub mod parser;
pub mod resolver;
pub mod scheme;
pub mod types;

pub use coverage::{check_coverage, CoverageReport, Diagnostic, Severity};
pub use error::{Result, SwatchError};
pub use manifest::Manifest;
pub use matching::NameMatcher;
pub use parser::parse_symbolic;
pub use resolver::{resolve, Resolver};
pub use scheme::{CatalogScheme, ColourScheme, Palette, PaletteBuilder, VariantScheme};
pub use types::{
    matches, prefix_matching_enabled, set_prefix_matching, Colour, ConcreteColour, Expression,
    SymbolicColour, SymbolicName,
};
