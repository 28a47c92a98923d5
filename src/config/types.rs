//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::compiler::{CompileOptions, OutputStyle};
use crate::error::StyleResult;

use super::loader::{self, ConfigWarning};

/// Source / output / watch locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_source")]
    pub source: PathBuf,

    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Directory subscribed to for changes (parent of `source` when unset)
    #[serde(default)]
    pub watch_dir: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            output: default_output(),
            watch_dir: None,
        }
    }
}

fn default_source() -> PathBuf {
    PathBuf::from("sass/main.scss")
}

fn default_output() -> PathBuf {
    PathBuf::from("static/css/main.css")
}

/// Transform options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CompileConfig {
    #[serde(default)]
    pub style: OutputStyle,

    #[serde(default)]
    pub load_paths: Vec<PathBuf>,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub compile: CompileConfig,
}

impl Config {
    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> StyleResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load `path` if it exists (defaults otherwise), then apply env overrides.
    pub fn load_or_default(path: &Path) -> StyleResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(path)
    }

    /// Apply environment variable overrides (STYLEWATCH_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Directory to subscribe to for change notifications
    pub fn watch_dir(&self) -> PathBuf {
        if let Some(dir) = &self.paths.watch_dir {
            return dir.clone();
        }
        match self.paths.source.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions::new(&self.paths.source, &self.paths.output)
            .with_style(self.compile.style)
            .with_load_paths(self.compile.load_paths.clone())
    }
}
