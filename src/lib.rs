//! stylewatch - SCSS compiler and file watcher
//!
//! Compiles a site's root stylesheet to a single CSS file, once (`build`) or
//! continuously while the style sources change (`watch`).

pub mod compiler;
pub mod config;
pub mod error;
pub mod watcher;

// Re-exports for convenience
pub use compiler::{
    build, ensure_output_directory, CompileOptions, CompileReport, OutputStyle, StyleCompiler,
};
pub use config::{Config, ConfigWarning};
pub use error::{StyleError, StyleResult};
pub use watcher::{
    watch, ChangeKind, ChangeNotice, ChangeSource, NotifySource, SourcePoll, WatchEvent,
    WatchOptions, WatchSummary, WatchUseCase,
};
