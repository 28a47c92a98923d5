//! Watch event types and options

use std::path::PathBuf;

use serde::Serialize;

use crate::compiler::CompileOptions;

use super::source::ChangeKind;

/// Watch options
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Directory subscribed to (recursively)
    pub watch_dir: PathBuf,
    pub compile: CompileOptions,
}

impl WatchOptions {
    pub fn new(watch_dir: impl Into<PathBuf>, compile: CompileOptions) -> Self {
        Self {
            watch_dir: watch_dir.into(),
            compile,
        }
    }
}

/// Watch event types for NDJSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    /// Watch started
    WatchStarted {
        watch_dir: String,
        source: String,
        output: String,
    },
    /// A change notification arrived
    FileChanged { kind: ChangeKind, paths: Vec<String> },
    /// Compile started
    CompileStarted,
    /// Compile finished and the output was written
    CompileComplete { output: String, bytes: usize },
    /// Compile failed; watching continues
    Error { message: String },
    /// Watch stopped
    Shutdown,
}

impl WatchEvent {
    /// Convert to JSON string with "command": "watch" field included
    pub fn to_json(&self) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("watch"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }
}
