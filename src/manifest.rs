//! Project manifest (swatch.yaml) parsing.
//!
//! The manifest configures the command line tool: the prefix matching
//! switch, the colours of each scheme, and the names every scheme is
//! expected to cover. A scheme overrides base colours by name, and base
//! `$references` follow those overrides: below, `dark` resolves
//! `primary.lvl1` to `#880000`.
//!
//! ```yaml
//! prefix_matching: true
//! default_scheme: dark
//! colours:
//!   primary: "#FF0000"
//!   primary.lvl1: $primary
//! schemes:
//!   dark:
//!     primary: "#880000"
//! expected:
//!   - primary
//!   - primary.lvl1
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SwatchError};
use crate::scheme::{Palette, PaletteBuilder};
use crate::types::{set_prefix_matching, SymbolicName};

/// Default manifest file name.
pub const MANIFEST_FILE: &str = "swatch.yaml";

/// Project manifest loaded from swatch.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Process-wide prefix matching switch.
    #[serde(default = "default_prefix_matching")]
    pub prefix_matching: bool,

    /// Scheme used when none is named on the command line.
    #[serde(default)]
    pub default_scheme: Option<String>,

    /// Base colours shared by every scheme (hex or `$reference`).
    #[serde(default)]
    pub colours: BTreeMap<String, String>,

    /// Named schemes overriding base colours.
    #[serde(default)]
    pub schemes: BTreeMap<String, BTreeMap<String, String>>,

    /// Names every scheme must resolve.
    #[serde(default)]
    pub expected: Vec<String>,
}

fn default_prefix_matching() -> bool {
    true
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            prefix_matching: default_prefix_matching(),
            default_scheme: None,
            colours: BTreeMap::new(),
            schemes: BTreeMap::new(),
            expected: vec![],
        }
    }
}

impl Manifest {
    /// Load manifest from a swatch.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SwatchError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Load from `path`, or from `swatch.yaml` in the current directory.
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(MANIFEST_FILE));
        Self::load(&path)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Self = serde_yaml::from_str(content).map_err(|e| SwatchError::Config {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check swatch.yaml syntax".to_string()),
        })?;

        if let Some(scheme) = &manifest.default_scheme {
            if !manifest.schemes.contains_key(scheme) {
                return Err(SwatchError::Config {
                    message: format!("Unknown default scheme: {}", scheme),
                    help: Some(format!("Define it under schemes: ({})", manifest.scheme_list())),
                });
            }
        }

        Ok(manifest)
    }

    /// Apply process-wide settings. Call once at startup.
    pub fn apply(&self) {
        set_prefix_matching(self.prefix_matching);
    }

    /// Build one palette: base colours plus one variant per scheme.
    pub fn build_palette(&self) -> Result<Palette> {
        let mut builder = PaletteBuilder::new("swatch");

        for (name, value) in &self.colours {
            builder.define(name, value);
        }

        for (scheme, colours) in &self.schemes {
            for (name, value) in colours {
                builder.define_variant(scheme, name, value);
            }
        }

        builder.build(None)
    }

    /// The scheme to use: the requested one, the default, or `None` for the
    /// base colours.
    pub fn select_scheme<'a>(&'a self, requested: Option<&'a str>) -> Result<Option<&'a str>> {
        match requested.or(self.default_scheme.as_deref()) {
            Some(scheme) if self.schemes.contains_key(scheme) => Ok(Some(scheme)),
            Some(scheme) => Err(SwatchError::Config {
                message: format!("Unknown scheme: {}", scheme),
                help: Some(format!("Available schemes: {}", self.scheme_list())),
            }),
            None => Ok(None),
        }
    }

    pub fn scheme_names(&self) -> impl Iterator<Item = &str> {
        self.schemes.keys().map(|s| s.as_str())
    }

    pub fn expected_names(&self) -> Vec<SymbolicName> {
        self.expected.iter().map(SymbolicName::new).collect()
    }

    fn scheme_list(&self) -> String {
        if self.schemes.is_empty() {
            return "none".to_string();
        }
        self.scheme_names().collect::<Vec<_>>().join(", ")
    }
}
