//! Resolution of expressions against a colour scheme.
//!
//! Resolution is a synchronous walk of the expression graph. Nothing is
//! cached and nothing is mutated, so resolving the same expression against
//! the same scheme always gives the same answer.

use crate::scheme::ColourScheme;
use crate::types::{Colour, ConcreteColour, Expression, SymbolicColour, SymbolicName};

/// Resolve an expression to a concrete colour, or `None` when it has none.
///
/// Lookups go straight to the scheme with no fallback of their own; fallback
/// is the scheme's business (see [`crate::scheme::CatalogScheme`]).
pub fn resolve<C: ConcreteColour>(expr: &Expression<C>, scheme: &dyn ColourScheme<C>) -> Option<C> {
    match expr {
        Expression::Lookup { name, .. } => {
            let colour = scheme.colour_for(name);
            if colour.is_none() {
                tracing::trace!(name = %name, "scheme has no colour");
            }
            colour
        }
        Expression::Literal { colour, .. } => Some(colour.clone()),
        Expression::Provider { evaluate, name, .. } => {
            let colour = evaluate(scheme);
            if colour.is_none() {
                tracing::trace!(provider = %name, "provider resolved to nothing");
            }
            colour
        }
    }
}

/// Resolves symbolic colours against one scheme.
pub struct Resolver<'a, C = Colour> {
    scheme: &'a dyn ColourScheme<C>,
}

impl<'a, C: ConcreteColour> Resolver<'a, C> {
    /// Create a resolver over the given scheme.
    pub fn new(scheme: &'a dyn ColourScheme<C>) -> Self {
        Self { scheme }
    }

    /// Resolve a symbolic colour.
    pub fn resolve(&self, colour: &SymbolicColour<C>) -> Option<C> {
        match colour.expression() {
            Some(expr) => resolve(expr, self.scheme),
            None => colour.name().and_then(|name| self.scheme.colour_for(&name)),
        }
    }

    /// Resolve a bare name.
    pub fn resolve_name(&self, name: &SymbolicName) -> Option<C> {
        self.scheme.colour_for(name)
    }

    /// Resolve a raw expression.
    pub fn resolve_expr(&self, expr: &Expression<C>) -> Option<C> {
        resolve(expr, self.scheme)
    }
}
