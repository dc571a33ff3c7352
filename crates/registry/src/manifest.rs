//! Declarative component registration loaded from TOML.
//!
//! ```toml
//! [[component]]
//! name = "metrics.exporter"
//! start = true
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Components to register at bootstrap, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryManifest {
	#[serde(default, rename = "component")]
	pub components: Vec<ComponentDecl>,
}

/// One declared component and its initial intent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentDecl {
	pub name: String,
	#[serde(default)]
	pub start: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
	#[error("failed to read manifest {}: {source}", .path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("invalid manifest: {0}")]
	Parse(#[from] toml::de::Error),

	#[error("component `{0}` is declared more than once")]
	DuplicateName(String),

	#[error("component name must not be empty")]
	EmptyName,
}

impl RegistryManifest {
	pub fn from_toml_str(input: &str) -> Result<Self, ManifestError> {
		let manifest: Self = toml::from_str(input)?;
		manifest.validate()?;
		Ok(manifest)
	}

	pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
		let path = path.as_ref();
		let input = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		let manifest = Self::from_toml_str(&input)?;
		tracing::debug!(path = %path.display(), components = manifest.components.len(), "manifest.load");
		Ok(manifest)
	}

	fn validate(&self) -> Result<(), ManifestError> {
		let mut seen = HashSet::new();
		for decl in &self.components {
			if decl.name.trim().is_empty() {
				return Err(ManifestError::EmptyName);
			}
			if !seen.insert(decl.name.as_str()) {
				return Err(ManifestError::DuplicateName(decl.name.clone()));
			}
		}
		Ok(())
	}
}
