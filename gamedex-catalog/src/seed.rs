//! JSON loading for the seed dataset.
//!
//! The seed file is a single JSON array of scraped game records. Field names
//! follow the scraper's capitalized convention (`URL`, `Title`, `Provider`,
//! `Image_Path`), so the record type renames them on the way in.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// One record of the seed dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedGame {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Provider")]
    pub provider: String,
    #[serde(rename = "Image_Path")]
    pub image_path: String,
}

/// Load the seed dataset from a JSON file.
pub fn load_seed(path: &Path) -> Result<Vec<SeedGame>, SeedError> {
    let contents = std::fs::read_to_string(path).map_err(|e| SeedError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_json::from_str(&contents).map_err(|e| SeedError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}
