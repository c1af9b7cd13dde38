//! Core domain types for swatch.
//!
//! This module contains the fundamental types the resolver works with:
//! - `SymbolicName` - hierarchical colour names and prefix matching
//! - `Colour` - RGBA colour values and the `ConcreteColour` primitives
//! - `Expression` - lazy colour expressions (lookup, literal, provider)
//! - `SymbolicColour` - the public value type built from expressions

mod colour;
mod expr;
pub(crate) mod name;
mod symbolic;

pub use colour::{Colour, ConcreteColour};
pub use expr::{Evaluate, Expression, DEFAULT_TRANSFORM_TAG};
pub use name::{matches, prefix_matching_enabled, set_prefix_matching, SymbolicName};
pub use symbolic::SymbolicColour;
