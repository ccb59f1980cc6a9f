//! Configuration file discovery
//!
//! Looks for `kanban.{toml,yaml,yml,json}` in the global `~/.adminboard/`
//! directory and the project `./.adminboard/` directory. Project files
//! override global ones.

use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Directory name holding AdminBoard configuration
pub const CONFIG_DIR_NAME: &str = ".adminboard";

/// Base file name of the engine configuration
pub const CONFIG_FILE_STEM: &str = "kanban";

const EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// A discovered configuration file
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub path: PathBuf,
    pub format: ConfigFormat,
    pub scope: ConfigScope,
}

/// Configuration file format detected from file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Where a configuration file was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigScope {
    Global,
    Project,
}

/// File discovery service for finding configuration files
#[derive(Debug, Clone, Default)]
pub struct FileDiscovery {
    global_dir: Option<PathBuf>,
    project_dir: Option<PathBuf>,
}

impl FileDiscovery {
    /// Discover in `~/.adminboard/` and `./.adminboard/`
    pub fn new() -> Self {
        Self::default()
    }

    /// Discover in explicit directories instead of the standard locations
    pub fn with_dirs(global_dir: Option<PathBuf>, project_dir: Option<PathBuf>) -> Self {
        Self {
            global_dir,
            project_dir,
        }
    }

    /// All existing configuration files, lowest precedence first
    pub fn discover_all(&self) -> Vec<ConfigFile> {
        let global_dir = self
            .global_dir
            .clone()
            .or_else(|| dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME)));
        let project_dir = self
            .project_dir
            .clone()
            .or_else(|| std::env::current_dir().ok().map(|cwd| cwd.join(CONFIG_DIR_NAME)));

        let mut files = Vec::new();
        if let Some(dir) = global_dir {
            files.extend(search_directory(&dir, ConfigScope::Global));
        }
        if let Some(dir) = project_dir {
            files.extend(search_directory(&dir, ConfigScope::Project));
        }
        files.sort_by_key(|f| f.scope);

        debug!("Discovered {} configuration files", files.len());
        files
    }
}

fn search_directory(dir: &Path, scope: ConfigScope) -> Vec<ConfigFile> {
    if !dir.is_dir() {
        trace!("Config directory {} does not exist", dir.display());
        return Vec::new();
    }

    EXTENSIONS
        .iter()
        .filter_map(|ext| {
            let path = dir.join(format!("{}.{}", CONFIG_FILE_STEM, ext));
            let format = ConfigFormat::from_extension(ext)?;
            path.is_file().then(|| {
                trace!("Found config: {} ({:?})", path.display(), format);
                ConfigFile {
                    path,
                    format,
                    scope,
                }
            })
        })
        .collect()
}
