use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::filter::FacilityFilter;
use crate::data::rank::DEFAULT_LIMIT;

/// Calderdale public conveniences, served through a CSV → JSON converter.
pub const DEFAULT_SOURCE_URL: &str = "http://35.225.28.134:8080/api/csv/read?filePath=https://dataworks.calderdale.gov.uk/download/20qn9/3ge/public-conveniences.csv";

/// Settings for one finder run.
///
/// Every field has a default, so a config file only needs the keys it
/// changes:
///
/// ```toml
/// source_url = "http://localhost:8080/toilets.json"
/// limit = 5
///
/// [filter]
/// baby_change_required = false
/// accessible_required = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    pub source_url: String,
    pub limit: usize,
    pub filter: FacilityFilter,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            limit: DEFAULT_LIMIT,
            filter: FacilityFilter::default(),
        }
    }
}

impl FinderConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("parsing config TOML")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_toml_str(&text)
    }
}
