//! SCSS → CSS compilation
//!
//! The transform runs entirely in memory through `grass`; the output file is
//! only opened once a stylesheet has been produced, so a syntax error never
//! truncates the previous artifact.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{StyleError, StyleResult};

/// CSS formatting of the compiled artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// One declaration per line (Sass default)
    #[default]
    Expanded,
    /// Minified, no insignificant whitespace
    Compressed,
}

impl OutputStyle {
    pub const VALUES: &'static [&'static str] = &["expanded", "compressed"];

    /// Parse a user-supplied style name (case-insensitive)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "expanded" => Some(Self::Expanded),
            "compressed" => Some(Self::Compressed),
            _ => None,
        }
    }

    fn to_grass(self) -> grass::OutputStyle {
        match self {
            Self::Expanded => grass::OutputStyle::Expanded,
            Self::Compressed => grass::OutputStyle::Compressed,
        }
    }
}

/// Paths and options for a single compile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Root stylesheet source
    pub source: PathBuf,
    /// Compiled CSS artifact
    pub output: PathBuf,
    pub style: OutputStyle,
    /// Extra directories searched by `@use` / `@import`
    pub load_paths: Vec<PathBuf>,
}

impl CompileOptions {
    pub fn new(source: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output: output.into(),
            style: OutputStyle::default(),
            load_paths: Vec::new(),
        }
    }

    pub fn with_style(mut self, style: OutputStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_load_paths(mut self, load_paths: Vec<PathBuf>) -> Self {
        self.load_paths = load_paths;
        self
    }
}

/// Outcome of a successful compile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileReport {
    pub output: PathBuf,
    pub bytes: usize,
}

/// Compiles one stylesheet source into one CSS file
#[derive(Debug, Clone)]
pub struct StyleCompiler {
    options: CompileOptions,
}

impl StyleCompiler {
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    /// Transform the source into CSS text without touching the output path.
    pub fn render(&self) -> StyleResult<String> {
        let grass_options = grass::Options::default()
            .style(self.options.style.to_grass())
            .load_paths(self.options.load_paths.as_slice());

        grass::from_path(&self.options.source, &grass_options).map_err(|e| StyleError::Compile {
            file: self.options.source.clone(),
            message: e.to_string(),
        })
    }

    /// Render the source and overwrite the output file with the result.
    ///
    /// The output's parent directory must already exist; see
    /// [`ensure_output_directory`].
    pub fn compile(&self) -> StyleResult<CompileReport> {
        let css = self.render()?;

        fs::write(&self.options.output, css.as_bytes()).map_err(|source| StyleError::Write {
            path: self.options.output.clone(),
            source,
        })?;

        log::info!(
            "Compiled {} -> {} ({} bytes)",
            self.options.source.display(),
            self.options.output.display(),
            css.len()
        );

        Ok(CompileReport {
            output: self.options.output.clone(),
            bytes: css.len(),
        })
    }
}

/// Create the parent directory of `output` (and any missing ancestors).
///
/// A bare file name has no parent to create and succeeds immediately.
pub fn ensure_output_directory(output: &Path) -> StyleResult<()> {
    let parent = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => return Ok(()),
    };

    if parent.is_dir() {
        return Ok(());
    }

    log::debug!("Creating output directory {}", parent.display());
    fs::create_dir_all(parent).map_err(|source| StyleError::CreateOutputDir {
        path: parent.to_path_buf(),
        source,
    })
}

/// One-shot build: prepare the output directory and compile once.
pub fn build(options: &CompileOptions) -> StyleResult<CompileReport> {
    ensure_output_directory(&options.output)?;
    StyleCompiler::new(options.clone()).compile()
}
