//! Lazy colour expressions.
//!
//! An expression describes how to produce a concrete colour without producing
//! it. There are three shapes:
//! - `Lookup` - ask the active scheme for a name
//! - `Literal` - a fixed concrete colour
//! - `Provider` - a named function of the scheme; blend, opacity and
//!   transforms are all providers that close over their operands
//!
//! Identity is the precomputed fingerprint, never the closure. Providers are
//! fingerprinted from their name alone, so two providers with the same name
//! compare equal even when their closures differ. Combinators embed operand
//! descriptions and parameters in that name, which keeps structurally
//! different compositions apart.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::resolver::resolve;
use crate::scheme::ColourScheme;

use super::colour::{Colour, ConcreteColour};
use super::name::SymbolicName;

/// Evaluation function carried by a provider expression.
pub type Evaluate<C> = Arc<dyn Fn(&dyn ColourScheme<C>) -> Option<C> + Send + Sync>;

/// Tag used by [`Expression::transform`] when the caller gives none.
pub const DEFAULT_TRANSFORM_TAG: &str = "t";

/// A lazily evaluated colour.
#[derive(Clone)]
pub enum Expression<C = Colour> {
    /// Resolve a name through the scheme.
    Lookup { name: SymbolicName, fingerprint: u64 },
    /// A fixed concrete colour.
    Literal {
        colour: C,
        description: String,
        fingerprint: u64,
    },
    /// A named function of the scheme.
    Provider {
        name: String,
        evaluate: Evaluate<C>,
        fingerprint: u64,
    },
}

fn fingerprint_of(tag: &str, content: impl Hash) -> u64 {
    let mut hasher = DefaultHasher::new();
    tag.hash(&mut hasher);
    content.hash(&mut hasher);
    hasher.finish()
}

/// Fingerprint of a lookup of `name`.
pub(crate) fn lookup_fingerprint(name: &str) -> u64 {
    fingerprint_of("Lookup", name)
}

impl<C: ConcreteColour> Expression<C> {
    pub fn from_name(name: impl Into<SymbolicName>) -> Self {
        let name: SymbolicName = name.into();
        let fingerprint = lookup_fingerprint(name.as_str());
        Expression::Lookup { name, fingerprint }
    }

    pub fn from_concrete(colour: C) -> Self {
        let description = colour.description();
        let fingerprint = fingerprint_of("Literal", (colour.content_fingerprint(), &description));
        Expression::Literal {
            colour,
            description,
            fingerprint,
        }
    }

    /// A custom provider. Its identity is `name`; see the module docs.
    pub fn from_provider<F>(name: impl Into<String>, evaluate: F) -> Self
    where
        F: Fn(&dyn ColourScheme<C>) -> Option<C> + Send + Sync + 'static,
    {
        let name: String = name.into();
        let fingerprint = fingerprint_of("Provider", &name);
        Expression::Provider {
            name,
            evaluate: Arc::new(evaluate),
            fingerprint,
        }
    }

    /// `from * ratio + to * (1 - ratio)`, falling back to whichever side
    /// resolves when the other does not.
    ///
    /// The ratio is rendered with two decimals and clamped only by the
    /// colour's blend primitive.
    pub fn blend(from: Expression<C>, ratio: f32, to: Expression<C>) -> Self {
        let name = format!(
            "({}({:.2}),{}({:.2}))",
            from.description(),
            ratio,
            to.description(),
            1.0 - ratio
        );

        Self::from_provider(name, move |scheme| match resolve(&from, scheme) {
            None => resolve(&to, scheme),
            Some(from) => match resolve(&to, scheme) {
                Some(to) => Some(from.blend(ratio, &to)),
                None => Some(from),
            },
        })
    }

    /// `base` with its alpha overwritten by `ratio`. Absent if `base` is.
    pub fn opacity(base: Expression<C>, ratio: f32) -> Self {
        let name = format!("{}({:.2})", base.description(), ratio);

        Self::from_provider(name, move |scheme| {
            resolve(&base, scheme).map(|colour| colour.with_alpha(ratio))
        })
    }

    /// `transform` applied to the resolved `base`. Absent if `base` is.
    ///
    /// `tag` discriminates transforms of the same base; without one every
    /// transform of a base shares the identity `(t->base)`.
    pub fn transform<F>(base: Expression<C>, tag: Option<&str>, transform: F) -> Self
    where
        F: Fn(C) -> C + Send + Sync + 'static,
    {
        let tag = tag.unwrap_or(DEFAULT_TRANSFORM_TAG);
        let name = format!("({}->{})", tag, base.description());

        Self::from_provider(name, move |scheme| resolve(&base, scheme).map(&transform))
    }

    /// The precomputed identity used for equality and hashing.
    pub fn fingerprint(&self) -> u64 {
        match self {
            Expression::Lookup { fingerprint, .. }
            | Expression::Literal { fingerprint, .. }
            | Expression::Provider { fingerprint, .. } => *fingerprint,
        }
    }

    /// Canonical textual rendering.
    pub fn description(&self) -> &str {
        match self {
            Expression::Lookup { name, .. } => name.as_str(),
            Expression::Literal { description, .. } => description,
            Expression::Provider { name, .. } => name,
        }
    }

    /// The looked-up name, for `Lookup` expressions.
    pub fn name(&self) -> Option<&SymbolicName> {
        match self {
            Expression::Lookup { name, .. } => Some(name),
            _ => None,
        }
    }
}

impl<C: ConcreteColour> PartialEq for Expression<C> {
    fn eq(&self, other: &Self) -> bool {
        self.fingerprint() == other.fingerprint()
    }
}

impl<C: ConcreteColour> Eq for Expression<C> {}

impl<C: ConcreteColour> Hash for Expression<C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fingerprint().hash(state);
    }
}

impl<C: ConcreteColour> fmt::Debug for Expression<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Expression::Lookup { .. } => "Lookup",
            Expression::Literal { .. } => "Literal",
            Expression::Provider { .. } => "Provider",
        };
        f.debug_struct(kind)
            .field("description", &self.description())
            .field("fingerprint", &format_args!("{:#018x}", self.fingerprint()))
            .finish()
    }
}

impl<C: ConcreteColour> fmt::Display for Expression<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    type Expr = Expression<Colour>;

    fn scheme(name: &SymbolicName) -> Option<Colour> {
        match name.as_str() {
            "primary" => Some(Colour::rgb(255, 0, 0)),
            "secondary" => Some(Colour::rgb(0, 0, 255)),
            _ => None,
        }
    }

    #[test]
    fn test_descriptions() {
        let blend = Expr::blend(Expr::from_name("primary"), 0.3, Expr::from_name("secondary"));
        assert_eq!(blend.description(), "(primary(0.30),secondary(0.70))");

        let opacity = Expr::opacity(Expr::from_name("primary"), 0.9);
        assert_eq!(opacity.description(), "primary(0.90)");

        let transform = Expr::transform(Expr::from_name("primary"), None, |c| c);
        assert_eq!(transform.description(), "(t->primary)");

        let tagged = Expr::transform(Expr::from_name("primary"), Some("invert"), |c| c);
        assert_eq!(tagged.description(), "(invert->primary)");
    }

    #[test]
    fn test_parameters_are_not_clamped_in_description() {
        let opacity = Expr::opacity(Expr::from_name("primary"), 1.5);
        assert_eq!(opacity.description(), "primary(1.50)");

        let blend = Expr::blend(Expr::from_name("a"), 1.25, Expr::from_name("b"));
        assert_eq!(blend.description(), "(a(1.25),b(-0.25))");
    }

    #[test]
    fn test_nested_descriptions_embed_children() {
        let inner = Expr::opacity(Expr::from_name("primary"), 0.5);
        let outer = Expr::blend(inner, 0.5, Expr::from_concrete(Colour::WHITE));
        assert_eq!(outer.description(), "(primary(0.50)(0.50),#FFFFFF(0.50))");
    }

    #[test]
    fn test_same_provider_name_collapses() {
        let a = Expr::from_provider("brand", |_| Some(Colour::BLACK));
        let b = Expr::from_provider("brand", |_| Some(Colour::WHITE));
        assert_eq!(a, b);

        // Same two-decimal rendering, different closures
        let x = Expr::opacity(Expr::from_name("primary"), 0.9);
        let y = Expr::opacity(Expr::from_name("primary"), 0.901);
        assert_eq!(x, y);

        let set: HashSet<Expr> = [a, b, x, y].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_variants_do_not_collide() {
        let lookup = Expr::from_name("#FF0000");
        let literal = Expr::from_concrete(Colour::rgb(255, 0, 0));
        let provider = Expr::from_provider("#FF0000", |_| None);
        assert_ne!(lookup, literal);
        assert_ne!(lookup, provider);
        assert_ne!(literal, provider);
    }

    #[test]
    fn test_literals_compare_by_content() {
        assert_eq!(Expr::from_concrete(Colour::WHITE), Expr::from_concrete(Colour::WHITE));
        assert_ne!(Expr::from_concrete(Colour::WHITE), Expr::from_concrete(Colour::BLACK));
    }

    #[test]
    fn test_transform_tags_distinguish() {
        let a = Expr::transform(Expr::from_name("primary"), Some("a"), |c| c);
        let b = Expr::transform(Expr::from_name("primary"), Some("b"), |c| c);
        assert_ne!(a, b);
    }

    #[test]
    fn test_blend_falls_back_to_present_side() {
        let blend = Expr::blend(Expr::from_name("primary"), 0.3, Expr::from_name("missing"));
        assert_eq!(resolve(&blend, &scheme), Some(Colour::rgb(255, 0, 0)));

        let blend = Expr::blend(Expr::from_name("missing"), 0.3, Expr::from_name("secondary"));
        assert_eq!(resolve(&blend, &scheme), Some(Colour::rgb(0, 0, 255)));

        let blend = Expr::blend(Expr::from_name("missing"), 0.3, Expr::from_name("gone"));
        assert_eq!(resolve(&blend, &scheme), None);
    }

    #[test]
    fn test_blend_both_present() {
        let blend = Expr::blend(
            Expr::from_concrete(Colour::WHITE),
            0.25,
            Expr::from_concrete(Colour::BLACK),
        );
        assert_eq!(resolve(&blend, &scheme), Some(Colour::rgb(64, 64, 64)));
    }

    #[test]
    fn test_opacity_overwrites_alpha() {
        let faded = Expr::opacity(Expr::from_concrete(Colour::new(255, 0, 0, 20)), 1.0);
        assert_eq!(resolve(&faded, &scheme), Some(Colour::rgb(255, 0, 0)));

        let missing = Expr::opacity(Expr::from_name("missing"), 0.5);
        assert_eq!(resolve(&missing, &scheme), None);
    }

    #[test]
    fn test_transform_absent_base() {
        let t = Expr::transform(Expr::from_name("missing"), None, |_| Colour::WHITE);
        assert_eq!(resolve(&t, &scheme), None);

        let t = Expr::transform(Expr::from_name("primary"), None, |_| Colour::WHITE);
        assert_eq!(resolve(&t, &scheme), Some(Colour::WHITE));
    }
}
