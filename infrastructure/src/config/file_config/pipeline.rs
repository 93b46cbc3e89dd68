//! Pipeline configuration from TOML (`[pipeline]` section)

use moderation_domain::OracleFailurePolicy;
use serde::{Deserialize, Serialize};

/// Raw pipeline configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePipelineConfig {
    /// What happens to an item the oracle could not classify
    pub on_oracle_failure: OracleFailurePolicy,
}
