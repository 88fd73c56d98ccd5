use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tierlens_engine::{DetailLevel, ViewFilter};

/// A saved comparison: which documents to load, which tiers to compare, and
/// the default view over the result.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ComparisonProfile {
    /// Source document JSON files, in load order. Relative paths are
    /// resolved against the profile's directory.
    pub sources: Vec<PathBuf>,

    /// Tiers to compare, in column order.
    pub selection: Vec<ProfileTier>,

    /// Default view filter.
    pub view: ViewFilter,

    /// Default cell detail.
    pub detail: DetailLevel,
}

/// One selected tier in a profile.
#[derive(Debug, Deserialize)]
pub struct ProfileTier {
    pub source: String,
    pub tier: String,
}

impl ComparisonProfile {
    /// Load a profile from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read profile {}", path.display()))?;
        let mut profile: Self = toml::from_str(&raw)
            .with_context(|| format!("Invalid profile {}", path.display()))?;
        profile
            .validate()
            .map_err(|err| anyhow::anyhow!("Invalid profile {}: {err}", path.display()))?;

        if let Some(dir) = path.parent() {
            for source in &mut profile.sources {
                if source.is_relative() {
                    *source = dir.join(&*source);
                }
            }
        }

        log::debug!(
            "Loaded profile {} ({} sources, {} selected tiers)",
            path.display(),
            profile.sources.len(),
            profile.selection.len()
        );
        Ok(profile)
    }

    fn validate(&self) -> std::result::Result<(), String> {
        for source in &self.sources {
            if source.as_os_str().is_empty() {
                return Err("source paths must not be empty".to_string());
            }
        }

        let mut seen = HashSet::new();
        for entry in &self.selection {
            if entry.source.trim().is_empty() || entry.tier.trim().is_empty() {
                return Err("selection entries need both a source and a tier".to_string());
            }
            if !seen.insert((entry.source.as_str(), entry.tier.as_str())) {
                return Err(format!(
                    "duplicate selection entry '{}:{}'",
                    entry.source, entry.tier
                ));
            }
        }

        Ok(())
    }
}
