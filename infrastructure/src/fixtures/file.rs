//! Content fixture files (`.toml` or `.json`)
//!
//! ```toml
//! [[items]]
//! id = "POST-001"
//! author_id = "USER-12345"
//! author_name = "GoodUser123"
//! content_type = "text_post"
//! text = "I love this platform!"
//!
//! [assessments.POST-001]
//! category = "none"
//! severity = "low"
//! confidence = 0.95
//! explanation = "Positive content"
//! recommended_action = "approve"
//!
//! [failures]
//! POST-009 = "upstream returned 503"
//! ```

use moderation_domain::{AssessmentError, ContentItem, ViolationAssessment};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML fixture {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid JSON fixture {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported fixture extension for {0} (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),

    #[error("fixture {0} contains no items")]
    Empty(PathBuf),

    #[error("invalid canned assessment for {id}: {source}")]
    Assessment {
        id: String,
        #[source]
        source: AssessmentError,
    },
}

/// Items to moderate plus optional canned oracle outcomes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentFixture {
    #[serde(default)]
    pub items: Vec<ContentItem>,
    /// Canned assessments keyed by content id; validated on load
    #[serde(default)]
    pub assessments: BTreeMap<String, ViolationAssessment>,
    /// Content ids whose classification should fail, with the failure text
    #[serde(default)]
    pub failures: BTreeMap<String, String>,
}

impl ContentFixture {
    /// Load a fixture, picking the format from the file extension.
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let raw = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        let fixture: ContentFixture = match extension.as_deref() {
            Some("toml") => toml::from_str(&raw).map_err(|source| FixtureError::Toml {
                path: path.to_path_buf(),
                source,
            })?,
            Some("json") => serde_json::from_str(&raw).map_err(|source| FixtureError::Json {
                path: path.to_path_buf(),
                source,
            })?,
            _ => return Err(FixtureError::UnsupportedFormat(path.to_path_buf())),
        };

        if fixture.items.is_empty() {
            return Err(FixtureError::Empty(path.to_path_buf()));
        }

        debug!(
            "Loaded {} item(s), {} canned assessment(s) from {}",
            fixture.items.len(),
            fixture.assessments.len(),
            path.display()
        );
        Ok(fixture)
    }
}
