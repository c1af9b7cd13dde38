//! Resolve command implementation.
//!
//! Parses each expression, resolves it against the selected scheme through
//! catalog fallback, and prints one line per expression on stdout.

use std::path::Path;

use clap::Args;
use serde::Serialize;

use crate::error::{Result, SwatchError};
use crate::manifest::Manifest;
use crate::output::{display_path, plural, Printer};
use crate::parser::parse_symbolic;
use crate::scheme::{CatalogScheme, ColourScheme};
use crate::types::{Colour, SymbolicColour};

/// Resolve colour expressions against a scheme
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Expressions such as `primary.lvl1` or `blend(primary, secondary, 30%)`
    #[arg(required = true)]
    pub expressions: Vec<String>,

    /// Scheme to resolve against (default: the manifest's default scheme)
    #[arg(long, short)]
    pub scheme: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Fail if any expression resolves to nothing
    #[arg(long)]
    pub strict: bool,
}

/// One resolved expression, as printed by `--json`.
#[derive(Debug, Serialize)]
struct Resolved {
    expression: String,
    description: String,
    scheme: Option<String>,
    colour: Option<String>,
}

pub fn run(args: ResolveArgs, config: Option<&Path>, printer: &Printer) -> Result<()> {
    let manifest = Manifest::discover(config)?;
    manifest.apply();

    let palette = manifest.build_palette()?;
    let scheme = manifest.select_scheme(args.scheme.as_deref())?;
    let catalog = CatalogScheme::new(palette.scheme(scheme));

    let colours = args
        .expressions
        .iter()
        .map(|input| parse_symbolic(input))
        .collect::<Result<Vec<SymbolicColour>>>()?;

    if let Some(path) = config {
        printer.info("Manifest", &display_path(path));
    }
    printer.status(
        "Resolving",
        &format!(
            "{} against {}",
            plural(colours.len(), "expression", "expressions"),
            scheme.map_or("base colours".to_string(), |s| format!("scheme '{}'", s))
        ),
    );

    let resolved = resolve_all(&colours, &catalog);

    if args.json {
        let records = to_records(&args.expressions, &colours, &resolved, scheme);
        println!("{}", encode_json(&records)?);
    } else {
        for (colour, result) in colours.iter().zip(&resolved) {
            printer.resolved(colour.description(), *result);
        }
    }

    let missing: Vec<&str> = colours
        .iter()
        .zip(&resolved)
        .filter(|(_, result)| result.is_none())
        .map(|(colour, _)| colour.description())
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    printer.warning("Unresolved", &missing.join(", "));
    if args.strict {
        return Err(SwatchError::Coverage {
            message: format!(
                "{} resolved to nothing",
                plural(missing.len(), "expression", "expressions")
            ),
            help: Some("Define the missing names in swatch.yaml".to_string()),
        });
    }

    Ok(())
}

fn resolve_all(colours: &[SymbolicColour], scheme: &dyn ColourScheme) -> Vec<Option<Colour>> {
    colours.iter().map(|colour| colour.resolve(scheme)).collect()
}

fn to_records(
    expressions: &[String],
    colours: &[SymbolicColour],
    resolved: &[Option<Colour>],
    scheme: Option<&str>,
) -> Vec<Resolved> {
    expressions
        .iter()
        .zip(colours)
        .zip(resolved)
        .map(|((input, colour), result)| Resolved {
            expression: input.clone(),
            description: colour.description().to_string(),
            scheme: scheme.map(str::to_string),
            colour: result.map(|c| c.to_string()),
        })
        .collect()
}

fn encode_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| SwatchError::Encode {
        message: format!("Failed to encode JSON: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::scheme::Palette;

    fn palette() -> Palette {
        let mut palette = Palette::new("test");
        palette.insert("primary", Colour::rgb(255, 0, 0));
        palette.insert_variant("dark", "primary", Colour::rgb(0x88, 0, 0));
        palette
    }

    #[test]
    fn test_json_records() {
        let palette = palette();
        let expressions = vec![
            "opacity($primary, 50%)".to_string(),
            "tertiary".to_string(),
        ];
        let colours: Vec<SymbolicColour> = expressions
            .iter()
            .map(|e| parse_symbolic(e).unwrap())
            .collect();

        let resolved = resolve_all(&colours, &palette.variant("dark"));
        let records = to_records(&expressions, &colours, &resolved, Some("dark"));

        insta::assert_snapshot!(encode_json(&records).unwrap(), @r###"
        [
          {
            "expression": "opacity($primary, 50%)",
            "description": "primary(0.50)",
            "scheme": "dark",
            "colour": "#88000080"
          },
          {
            "expression": "tertiary",
            "description": "tertiary",
            "scheme": "dark",
            "colour": null
          }
        ]
        "###);
    }

    #[test]
    fn test_json_base_scheme_is_null() {
        let palette = palette();
        let expressions = vec!["primary".to_string()];
        let colours = vec![SymbolicColour::named("primary")];

        let resolved = resolve_all(&colours, &palette);
        let records = to_records(&expressions, &colours, &resolved, None);
        let value: serde_json::Value =
            serde_json::from_str(&encode_json(&records).unwrap()).unwrap();

        assert_eq!(value[0]["scheme"], serde_json::Value::Null);
        assert_eq!(value[0]["colour"], "#FF0000");
    }

    #[test]
    fn test_encode_failure_is_encode_error() {
        let mut keyed = BTreeMap::new();
        keyed.insert((1, 2), "pair keys are not JSON object keys");

        let err = encode_json(&keyed).unwrap_err();
        assert!(matches!(err, SwatchError::Encode { .. }));
    }
}
