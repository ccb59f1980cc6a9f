//! Configuration provider using Figment

use crate::{
    discovery::{ConfigFile, ConfigFormat, FileDiscovery},
    types::KanbanConfig,
    ConfigResult,
};
use adminboard_common::Pretty;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use tracing::{debug, trace};

/// Environment variable prefix; nested keys are separated by `__`
pub const ENV_PREFIX: &str = "ADMINBOARD_";

/// Configuration provider using figment
///
/// Sources are merged in precedence order (later overrides earlier):
/// 1. Built-in defaults
/// 2. Global then project configuration files
/// 3. `ADMINBOARD_` environment variables
///
/// Nothing is cached; every call re-reads the sources.
#[derive(Debug, Clone, Default)]
pub struct ConfigProvider {
    discovery: FileDiscovery,
}

impl ConfigProvider {
    /// Create a provider using the standard discovery locations
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider with a custom file discovery
    pub fn with_discovery(discovery: FileDiscovery) -> Self {
        Self { discovery }
    }

    /// Load and validate the engine configuration
    pub fn load(&self) -> ConfigResult<KanbanConfig> {
        let config: KanbanConfig = self.build_figment().extract()?;
        config.validate()?;
        debug!("Loaded kanban configuration: {}", Pretty(&config));
        Ok(config)
    }

    fn build_figment(&self) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(KanbanConfig::default()));

        for file in self.discovery.discover_all() {
            trace!("Merging config file {}", file.path.display());
            figment = figment.merge(file_provider(&file));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}

fn file_provider(file: &ConfigFile) -> Figment {
    match file.format {
        ConfigFormat::Toml => Figment::from(Toml::file(&file.path)),
        ConfigFormat::Yaml => Figment::from(Yaml::file(&file.path)),
        ConfigFormat::Json => Figment::from(Json::file(&file.path)),
    }
}
