//! Palette scheme: named colour collections with variants.

use std::collections::{HashMap, HashSet};

use crate::error::{Result, SwatchError};
use crate::types::{Colour, SymbolicName};

use super::ColourScheme;

/// A collection of named colours with optional variants.
///
/// The palette itself is a scheme over its base colours. A variant (for
/// example `dark`) overrides some of them; see [`Palette::variant`].
#[derive(Debug, Clone)]
pub struct Palette {
    /// Palette name
    pub name: String,

    /// Base colours
    colours: HashMap<SymbolicName, Colour>,

    /// Variant overrides (variant_name -> colour_name -> colour)
    variants: HashMap<String, HashMap<SymbolicName, Colour>>,
}

impl Palette {
    /// Create a new empty palette.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            colours: HashMap::new(),
            variants: HashMap::new(),
        }
    }

    /// Get a base colour by name or `$reference`.
    pub fn get(&self, name: &str) -> Option<Colour> {
        let name = name.strip_prefix('$').unwrap_or(name);
        self.colours.get(name).copied()
    }

    /// A scheme view of one variant.
    pub fn variant<'a>(&'a self, variant: &'a str) -> VariantScheme<'a> {
        self.scheme(Some(variant))
    }

    /// A scheme view of a variant, or of the base colours for `None`.
    pub fn scheme<'a>(&'a self, variant: Option<&'a str>) -> VariantScheme<'a> {
        VariantScheme {
            palette: self,
            variant,
        }
    }

    /// Get all colour names.
    pub fn colour_names(&self) -> impl Iterator<Item = &SymbolicName> {
        self.colours.keys()
    }

    /// Get all variant names.
    pub fn variant_names(&self) -> impl Iterator<Item = &str> {
        self.variants.keys().map(|s| s.as_str())
    }

    /// Check if the palette has a variant.
    pub fn has_variant(&self, name: &str) -> bool {
        self.variants.contains_key(name)
    }

    /// Get the number of base colours.
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    /// Check if the palette is empty.
    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }

    /// Insert a base colour.
    pub fn insert(&mut self, name: impl Into<SymbolicName>, colour: Colour) {
        self.colours.insert(name.into(), colour);
    }

    /// Insert a variant colour override.
    pub fn insert_variant(
        &mut self,
        variant: impl Into<String>,
        name: impl Into<SymbolicName>,
        colour: Colour,
    ) {
        self.variants
            .entry(variant.into())
            .or_default()
            .insert(name.into(), colour);
    }

    /// Merge another palette into this one without overwriting (inheritance).
    pub fn merge_from(&mut self, other: &Palette) {
        for (name, colour) in &other.colours {
            self.colours.entry(name.clone()).or_insert(*colour);
        }

        for (variant_name, colours) in &other.variants {
            let entry = self.variants.entry(variant_name.clone()).or_default();
            for (name, colour) in colours {
                entry.entry(name.clone()).or_insert(*colour);
            }
        }
    }
}

impl ColourScheme<Colour> for Palette {
    fn colour_for(&self, name: &SymbolicName) -> Option<Colour> {
        self.colours.get(name).copied()
    }
}

/// A palette seen through one of its variants.
#[derive(Debug, Clone, Copy)]
pub struct VariantScheme<'a> {
    palette: &'a Palette,
    variant: Option<&'a str>,
}

impl VariantScheme<'_> {
    pub fn variant_name(&self) -> Option<&str> {
        self.variant
    }
}

impl ColourScheme<Colour> for VariantScheme<'_> {
    fn colour_for(&self, name: &SymbolicName) -> Option<Colour> {
        self.variant
            .and_then(|variant| self.palette.variants.get(variant))
            .and_then(|overrides| overrides.get(name))
            .copied()
            .or_else(|| self.palette.colour_for(name))
    }
}

/// Builder for palettes whose values are hex literals or `$references`.
#[derive(Debug)]
pub struct PaletteBuilder {
    name: String,
    definitions: Vec<(String, ColourDef)>,
    variant_defs: HashMap<String, Vec<(String, ColourDef)>>,
}

#[derive(Debug, Clone)]
enum ColourDef {
    /// A simple hex value: #FF0000
    Hex(String),
    /// A reference to another colour: $dark
    Reference(String),
}

impl PaletteBuilder {
    /// Create a new palette builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            definitions: Vec::new(),
            variant_defs: HashMap::new(),
        }
    }

    /// Add a colour definition (hex or reference).
    pub fn define(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let def = parse_colour_def(&value.into());
        self.definitions.push((name.into(), def));
    }

    /// Add a variant colour override.
    pub fn define_variant(
        &mut self,
        variant: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) {
        let def = parse_colour_def(&value.into());
        self.variant_defs
            .entry(variant.into())
            .or_default()
            .push((name.into(), def));
    }

    /// Build the palette, resolving all references.
    ///
    /// If `parent` is provided, colours will be inherited from it.
    pub fn build(self, parent: Option<&Palette>) -> Result<Palette> {
        let mut palette = Palette::new(self.name);

        if let Some(parent) = parent {
            palette.merge_from(parent);
        }

        for (name, colour) in resolve_colours(&self.definitions, &palette)? {
            palette.insert(name, colour);
        }

        // Each variant re-resolves the base definitions with its own
        // overrides in place, so `$references` follow the variant.
        let base = palette.clone();
        for (variant_name, defs) in self.variant_defs {
            let overridden: HashSet<&str> = defs.iter().map(|(name, _)| name.as_str()).collect();
            let mut combined = defs.clone();
            combined.extend(
                self.definitions
                    .iter()
                    .filter(|(name, _)| !overridden.contains(name.as_str()))
                    .cloned(),
            );

            for (name, colour) in resolve_colours(&combined, &base)? {
                if overridden.contains(name.as_str()) || base.get(&name) != Some(colour) {
                    palette.insert_variant(variant_name.clone(), name, colour);
                }
            }
        }

        Ok(palette)
    }
}

fn parse_colour_def(value: &str) -> ColourDef {
    let value = value.trim();
    if value.starts_with('$') {
        ColourDef::Reference(value.to_string())
    } else {
        ColourDef::Hex(value.to_string())
    }
}

/// Resolve a list of colour definitions, handling references.
fn resolve_colours(
    definitions: &[(String, ColourDef)],
    existing: &Palette,
) -> Result<Vec<(String, Colour)>> {
    let def_map: HashMap<&str, &ColourDef> = definitions
        .iter()
        .map(|(name, def)| (name.as_str(), def))
        .collect();

    let mut resolved: HashMap<String, Colour> = HashMap::new();
    let mut resolving: HashSet<String> = HashSet::new();

    for (name, _) in definitions {
        resolve_single(name, &def_map, existing, &mut resolved, &mut resolving)?;
    }

    Ok(definitions
        .iter()
        .filter_map(|(name, _)| resolved.get(name).map(|c| (name.clone(), *c)))
        .collect())
}

/// Resolve a single colour definition, detecting cycles.
fn resolve_single(
    name: &str,
    definitions: &HashMap<&str, &ColourDef>,
    existing: &Palette,
    resolved: &mut HashMap<String, Colour>,
    resolving: &mut HashSet<String>,
) -> Result<Colour> {
    if let Some(&colour) = resolved.get(name) {
        return Ok(colour);
    }

    if resolving.contains(name) {
        return Err(SwatchError::Parse {
            message: format!("Circular colour reference: ${}", name),
            help: Some("Check your colour definitions for circular references".to_string()),
        });
    }

    let def = match definitions.get(name) {
        Some(def) => def,
        None => {
            return existing.get(name).ok_or_else(|| SwatchError::Parse {
                message: format!("Undefined colour: ${}", name),
                help: None,
            });
        }
    };

    resolving.insert(name.to_string());

    let colour = match def {
        ColourDef::Hex(hex) => Colour::from_hex(hex)?,
        ColourDef::Reference(ref_name) => {
            let ref_name = ref_name.strip_prefix('$').unwrap_or(ref_name);
            resolve_single(ref_name, definitions, existing, resolved, resolving)?
        }
    };

    resolving.remove(name);
    resolved.insert(name.to_string(), colour);

    Ok(colour)
}
