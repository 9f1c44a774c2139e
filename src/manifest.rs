//! Batch anchor updates read from a manifest file.
//!
//! A manifest lists updates and, optionally, the document they apply to. JSON
//! and YAML manifests go through the YAML parser; `.toml` files through `toml`.

use crate::anchors::{AnchorUpdate, Source};
use crate::error::PatchError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// A batch of anchor updates loaded from a JSON, YAML or TOML file.
#[derive(Debug, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Document to update instead of the default one.
    #[serde(default)]
    pub document: Option<PathBuf>,
    /// Updates applied in file order.
    #[serde(default)]
    pub updates: Vec<ManifestEntry>,
}

#[derive(Debug, Deserialize, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct ManifestEntry {
    pub anchor: String,
    /// Path to a file whose contents fill the block, or `-` for stdin.
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Inline content for the block.
    #[serde(default)]
    pub content: Option<String>,
    /// Optional human-readable note; ignored.
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    /// YAML, which also accepts JSON documents.
    Yaml,
    Toml,
}

impl ManifestFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ManifestFormat::Toml,
            _ => ManifestFormat::Yaml,
        }
    }
}

impl Manifest {
    pub fn parse(data: &str, format: ManifestFormat) -> Result<Self, PatchError> {
        match format {
            ManifestFormat::Yaml => serde_yaml::from_str(data)
                .map_err(|err| PatchError::ManifestParse(err.to_string())),
            ManifestFormat::Toml => {
                toml::from_str(data).map_err(|err| PatchError::ManifestParse(err.to_string()))
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self, PatchError> {
        let data = fs::read_to_string(path).map_err(|err| PatchError::io(path, err))?;
        Self::parse(&data, ManifestFormat::from_path(path))
    }

    /// Validates every entry and turns them into updates.
    pub fn into_updates(self) -> Result<Vec<AnchorUpdate>, PatchError> {
        self.updates
            .into_iter()
            .map(ManifestEntry::into_update)
            .collect()
    }
}

impl ManifestEntry {
    pub fn into_update(self) -> Result<AnchorUpdate, PatchError> {
        let source = match (self.file, self.content) {
            (Some(_), Some(_)) => return Err(PatchError::AmbiguousContentSource(self.anchor)),
            (None, None) => return Err(PatchError::NoContent(self.anchor)),
            (Some(path), None) => Source::from_arg(&path.to_string_lossy()),
            (None, Some(content)) => Source::Inline(content),
        };

        Ok(AnchorUpdate::new(self.anchor, source))
    }
}
