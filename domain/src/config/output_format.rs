//! Output format value object

use serde::{Deserialize, Serialize};

/// How the moderation summary is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable report (default)
    #[default]
    Text,
    /// JSON array of moderation results
    Json,
}
