//! The public symbolic colour type.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::resolver::resolve;
use crate::scheme::ColourScheme;

use super::colour::{Colour, ConcreteColour};
use super::expr::{lookup_fingerprint, Expression};
use super::name::{matches, SymbolicName};

/// A colour named by meaning rather than value.
///
/// A bare named colour (`SymbolicColour::named("primary")`) carries no
/// expression, only its name, so it can be declared as a constant and
/// matched against other names cheaply. Composition builds a new colour
/// wrapping an expression over the operands; nothing is evaluated until
/// [`SymbolicColour::resolve`] runs against a scheme.
///
/// ```
/// use swatch::{Colour, SymbolicColour};
///
/// const PRIMARY: SymbolicColour = SymbolicColour::from_static("primary");
///
/// let hover = PRIMARY.blend(0.3, &SymbolicColour::named("secondary"));
/// assert_eq!(hover.description(), "(primary(0.30),secondary(0.70))");
///
/// let red = |name: &swatch::SymbolicName| {
///     (name.as_str() == "primary").then_some(Colour::rgb(255, 0, 0))
/// };
/// assert_eq!(hover.resolve(&red), Some(Colour::rgb(255, 0, 0)));
/// ```
#[derive(Clone)]
pub struct SymbolicColour<C = Colour> {
    description: Cow<'static, str>,
    expression: Option<Expression<C>>,
}

impl<C> SymbolicColour<C> {
    /// A bare named colour usable in `const` position.
    pub const fn from_static(name: &'static str) -> Self {
        Self {
            description: Cow::Borrowed(name),
            expression: None,
        }
    }
}

impl<C: ConcreteColour> SymbolicColour<C> {
    /// A bare named colour.
    pub fn named(name: impl Into<SymbolicName>) -> Self {
        let name: SymbolicName = name.into();
        Self {
            description: Cow::Owned(name.as_str().to_string()),
            expression: None,
        }
    }

    /// A fixed concrete colour.
    pub fn literal(colour: C) -> Self {
        Self::from_expression(Expression::from_concrete(colour))
    }

    /// A custom provider, identified by `name` alone.
    pub fn provider<F>(name: impl Into<String>, evaluate: F) -> Self
    where
        F: Fn(&dyn ColourScheme<C>) -> Option<C> + Send + Sync + 'static,
    {
        Self::from_expression(Expression::from_provider(name, evaluate))
    }

    pub fn from_expression(expression: Expression<C>) -> Self {
        Self {
            description: Cow::Owned(expression.description().to_string()),
            expression: Some(expression),
        }
    }

    /// Canonical rendering: the name for bare colours, the expression
    /// description otherwise.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The expression, absent for bare named colours.
    pub fn expression(&self) -> Option<&Expression<C>> {
        self.expression.as_ref()
    }

    /// The expression, building a lookup for bare named colours.
    pub fn to_expression(&self) -> Expression<C> {
        match &self.expression {
            Some(expr) => expr.clone(),
            None => Expression::from_name(&*self.description),
        }
    }

    /// The name of a bare named colour.
    pub fn name(&self) -> Option<SymbolicName> {
        match &self.expression {
            None => Some(SymbolicName::new(&*self.description)),
            Some(expr) => expr.name().cloned(),
        }
    }

    /// Does this colour's name match `pattern`'s name?
    ///
    /// Uses [`matches`], so with prefix matching on `primary` matches
    /// `primary.lvl1`. Colours without a name never match.
    pub fn matches(&self, pattern: &SymbolicColour<C>) -> bool {
        match (pattern.name(), self.name()) {
            (Some(pattern), Some(name)) => matches(&pattern, &name),
            _ => false,
        }
    }

    /// `self * ratio + to * (1 - ratio)`.
    ///
    /// If only one side resolves, that side is the result.
    pub fn blend(&self, ratio: f32, to: &SymbolicColour<C>) -> Self {
        Self::from_expression(Expression::blend(self.to_expression(), ratio, to.to_expression()))
    }

    /// This colour with alpha set to `ratio`.
    pub fn opacity(&self, ratio: f32) -> Self {
        Self::from_expression(Expression::opacity(self.to_expression(), ratio))
    }

    /// Apply `transform` to the resolved colour.
    ///
    /// Untagged transforms of the same colour are all equal to each other;
    /// use [`SymbolicColour::transform_tagged`] to tell them apart.
    pub fn transform<F>(&self, transform: F) -> Self
    where
        F: Fn(C) -> C + Send + Sync + 'static,
    {
        Self::from_expression(Expression::transform(self.to_expression(), None, transform))
    }

    /// Apply `transform` to the resolved colour, identified by `tag`.
    pub fn transform_tagged<F>(&self, tag: &str, transform: F) -> Self
    where
        F: Fn(C) -> C + Send + Sync + 'static,
    {
        Self::from_expression(Expression::transform(self.to_expression(), Some(tag), transform))
    }

    /// Resolve against a scheme.
    pub fn resolve(&self, scheme: &dyn ColourScheme<C>) -> Option<C> {
        match &self.expression {
            Some(expr) => resolve(expr, scheme),
            None => scheme.colour_for(&SymbolicName::new(&*self.description)),
        }
    }

    fn identity(&self) -> u64 {
        match &self.expression {
            Some(expr) => expr.fingerprint(),
            None => lookup_fingerprint(&self.description),
        }
    }
}

impl SymbolicColour<Colour> {
    /// Lighten by `amount` (0.0 - 1.0) of the remaining lightness.
    pub fn lighten(&self, amount: f32) -> Self {
        self.transform_tagged(&format!("lighten({:.2})", amount), move |c| c.lighten(amount))
    }

    /// Darken by `amount` (0.0 - 1.0) of the current lightness.
    pub fn darken(&self, amount: f32) -> Self {
        self.transform_tagged(&format!("darken({:.2})", amount), move |c| c.darken(amount))
    }

    pub fn saturate(&self, amount: f32) -> Self {
        self.transform_tagged(&format!("saturate({:.2})", amount), move |c| {
            c.saturate(amount)
        })
    }

    pub fn desaturate(&self, amount: f32) -> Self {
        self.transform_tagged(&format!("desaturate({:.2})", amount), move |c| {
            c.desaturate(amount)
        })
    }
}

impl<C: ConcreteColour> PartialEq for SymbolicColour<C> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.expression, &other.expression) {
            (None, None) => self.description == other.description,
            _ => self.identity() == other.identity(),
        }
    }
}

impl<C: ConcreteColour> Eq for SymbolicColour<C> {}

impl<C: ConcreteColour> Hash for SymbolicColour<C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl<C: ConcreteColour> fmt::Debug for SymbolicColour<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.expression {
            None => write!(f, "SymbolicColour({:?})", self.description),
            Some(expr) => f.debug_tuple("SymbolicColour").field(expr).finish(),
        }
    }
}

impl<C> fmt::Display for SymbolicColour<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

impl<C: ConcreteColour> From<SymbolicName> for SymbolicColour<C> {
    fn from(name: SymbolicName) -> Self {
        Self::named(name)
    }
}

impl<C: ConcreteColour> From<Expression<C>> for SymbolicColour<C> {
    fn from(expression: Expression<C>) -> Self {
        Self::from_expression(expression)
    }
}
