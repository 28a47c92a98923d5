//! Configuration loading

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::compiler::OutputStyle;
use crate::error::{StyleError, StyleResult};

use super::env_validator::{levenshtein, EnvVarValidator};
use super::types::Config;

/// Config file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "stylewatch.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> StyleResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| StyleError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load `path` when present, fall back to defaults, then apply env overrides.
pub fn load_or_default(path: &Path) -> StyleResult<(Config, Vec<ConfigWarning>)> {
    let (config, warnings) = if path.is_file() {
        log::debug!("Loading config from {}", path.display());
        load_with_warnings(path)?
    } else {
        log::debug!("No config at {}, using defaults", path.display());
        (Config::default(), Vec::new())
    };

    Ok((with_env_overrides(config), warnings))
}

/// Apply environment variable overrides (STYLEWATCH_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_env_overrides(config, |key| std::env::var(key).ok(), &mut std::io::stderr())
}

/// Apply overrides from an arbitrary variable lookup; invalid values are
/// reported to `warnings` and leave the config untouched.
pub fn apply_env_overrides<F, W>(mut config: Config, lookup: F, warnings: &mut W) -> Config
where
    F: Fn(&str) -> Option<String>,
    W: Write,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(source) = get("STYLEWATCH_SOURCE") {
        config.paths.source = PathBuf::from(source);
    }

    if let Some(output) = get("STYLEWATCH_OUTPUT") {
        config.paths.output = PathBuf::from(output);
    }

    if let Some(dir) = get("STYLEWATCH_WATCH_DIR") {
        config.paths.watch_dir = Some(PathBuf::from(dir));
    }

    if let Some(style) = get("STYLEWATCH_STYLE") {
        let validator = EnvVarValidator::new("STYLEWATCH_STYLE", OutputStyle::VALUES);
        config.compile.style = validator.parse_with_writer(
            &style,
            OutputStyle::parse,
            config.compile.style,
            warnings,
        );
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "paths",
        "source",
        "output",
        "watch_dir",
        "compile",
        "style",
        "load_paths",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}
