//! Launcher configuration file support.
//!
//! Configuration is loaded from, in order:
//! 1. An explicit path given with `--config` (or `MACROPAD_LAUNCHER_CONFIG`)
//! 2. The user config directory (`~/.config/macropad-launcher/config.toml` on Linux)
//! 3. Built-in defaults

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LauncherError, Result};
use crate::mapping::DEFAULT_MAPPING_FILE;

pub const DEFAULT_SUBCOMMAND: &str = "show-gui";
pub const DEFAULT_TOOLCHAIN: &str = "cargo";
pub const CONFIG_DIR_NAME: &str = "macropad-launcher";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Where installers are fetched from and what gets installed.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct InstallerConfig {
    pub rustup_sh_url: String,
    /// Base of `<base>/<triple>/rustup-init.exe` on Windows.
    pub rustup_init_base_url: String,
    /// Install native build dependencies through the system package manager.
    pub install_system_packages: bool,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            rustup_sh_url: "https://sh.rustup.rs".to_string(),
            rustup_init_base_url: "https://static.rust-lang.org/rustup/dist".to_string(),
            install_system_packages: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct LauncherConfig {
    /// Directory holding the editor's `Cargo.toml`.
    pub project_dir: PathBuf,
    pub toolchain: String,
    pub release: bool,
    pub subcommand: String,
    /// Prebuilt editor binary, used instead of the toolchain when it exists.
    pub binary: Option<PathBuf>,
    pub extra_args: Vec<String>,
    /// Install a missing toolchain instead of only printing instructions.
    pub auto_install: bool,
    /// Check the mapping file before launching.
    pub validate_mapping: bool,
    pub mapping_file: Option<PathBuf>,
    pub installer: InstallerConfig,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::from("."),
            toolchain: DEFAULT_TOOLCHAIN.to_string(),
            release: true,
            subcommand: DEFAULT_SUBCOMMAND.to_string(),
            binary: None,
            extra_args: Vec::new(),
            auto_install: true,
            validate_mapping: true,
            mapping_file: None,
            installer: InstallerConfig::default(),
        }
    }
}

impl LauncherConfig {
    /// Load configuration from an explicit path, the default location, or defaults.
    ///
    /// An explicit path must exist; a missing default file just means defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(LauncherError::ConfigNotFound { path: path.to_path_buf() });
            }
            return Self::load_from_file(path);
        }

        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
            debug!(path = %path.display(), "no config file, using defaults");
        }

        Ok(Self::default())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|source| LauncherError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Build profile directory name under `target/`.
    pub fn profile_dir(&self) -> &'static str {
        if self.release { "release" } else { "debug" }
    }

    /// The mapping file the editor reads: configured, or next to the built binary.
    pub fn mapping_path(&self) -> PathBuf {
        match &self.mapping_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => self.project_dir.join(path),
            None => self
                .project_dir
                .join("target")
                .join(self.profile_dir())
                .join(DEFAULT_MAPPING_FILE),
        }
    }
}
