//! Configuration file loader with multi-source merging

use super::ConfigError;
use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use tracing::debug;

const PROJECT_FILES: [&str; 2] = ["moderation.toml", ".moderation.toml"];
const ENV_PREFIX: &str = "MODERATION_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `MODERATION_*` environment variables
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./moderation.toml` or `./.moderation.toml`
    /// 4. Global config under the platform config dir
    /// 5. Default values
    ///
    /// The merged result is validated before it is returned.
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, ConfigError> {
        let global = Self::global_config_path().filter(|p| p.exists());
        let project = Self::project_config_path();
        Self::load_layers(global.as_deref(), project.as_deref(), config_path)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    pub(crate) fn load_layers(
        global: Option<&Path>,
        project: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<FileConfig, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        for path in [global, project, explicit].into_iter().flatten() {
            debug!("Merging config file {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = explicit {
            // Toml::file silently skips missing files; an explicit path must exist
            if !path.exists() {
                return Err(ConfigError::Invalid {
                    issues: vec![format!("config file not found: {}", path.display())],
                });
            }
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: FileConfig = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/content-moderation/config.toml if set,
    /// otherwise falls back to the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("content-moderation").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Describe the config file locations being used (for --show-config)
    pub fn describe_sources(explicit: Option<&Path>) -> String {
        let mut out = String::from("Configuration sources (in priority order):\n");
        out.push_str(&format!("  [ENV  ] {}*\n", ENV_PREFIX));

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            out.push_str(&format!("  [{:<5}] Explicit: {}\n", mark, path.display()));
        }

        match Self::project_config_path() {
            Some(path) => out.push_str(&format!("  [FOUND] Project: {}\n", path.display())),
            None => out.push_str("  [     ] Project: ./moderation.toml or ./.moderation.toml\n"),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            out.push_str(&format!("  [{}] Global:  {}\n", mark, path.display()));
        }

        out.push_str("  [     ] Default: built-in defaults\n");
        out
    }
}
