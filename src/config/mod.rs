//! Configuration for stylewatch
//!
//! Resolution order:
//! 1. CLI flags (highest priority, applied by the binary)
//! 2. Environment variables (STYLEWATCH_*)
//! 3. Config file (stylewatch.toml)
//! 4. Built-in defaults (lowest priority)

mod env_validator;
mod loader;
mod types;

pub use loader::{ConfigWarning, DEFAULT_CONFIG_FILE};
pub use types::{CompileConfig, Config, PathsConfig};
