//! Check command implementation.

use std::path::Path;

use clap::Args;

use crate::coverage::check_coverage;
use crate::error::{Result, SwatchError};
use crate::manifest::Manifest;
use crate::output::{plural, Printer};

/// Check that every scheme covers the expected names
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Only check this scheme
    #[arg(long, short)]
    pub scheme: Option<String>,
}

pub fn run(args: CheckArgs, config: Option<&Path>, printer: &Printer) -> Result<()> {
    let manifest = Manifest::discover(config)?;
    manifest.apply();

    let palette = manifest.build_palette()?;
    let expected = manifest.expected_names();

    if expected.is_empty() {
        printer.warning("Skipped", "no expected names in manifest");
        return Ok(());
    }

    // The base colours count as a scheme when no others are defined
    let schemes: Vec<Option<&str>> = match args.scheme.as_deref() {
        Some(requested) => vec![manifest.select_scheme(Some(requested))?],
        None if manifest.schemes.is_empty() => vec![None],
        None => manifest.scheme_names().map(Some).collect(),
    };

    let mut failed = Vec::new();
    for scheme in &schemes {
        let label = scheme.unwrap_or("base");
        let report = check_coverage(label, &palette.scheme(*scheme), &expected);
        printer.coverage(&report);
        if report.has_errors() {
            failed.push(label.to_string());
        }
    }

    if failed.is_empty() {
        printer.status(
            "Finished",
            &format!(
                "{} checked against {}",
                plural(schemes.len(), "scheme", "schemes"),
                plural(expected.len(), "name", "names")
            ),
        );
        return Ok(());
    }

    Err(SwatchError::Coverage {
        message: format!("incomplete schemes: {}", failed.join(", ")),
        help: Some("Every name under `expected` needs a colour in every scheme".to_string()),
    })
}
