//! Watch use case implementation

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::compiler::{ensure_output_directory, CompileReport, StyleCompiler};
use crate::error::StyleResult;

use super::event::{WatchEvent, WatchOptions};
use super::source::{ChangeSource, NotifySource, SourcePoll};

/// How long one poll of the change source may block before the running
/// flag is checked again
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Counters for a finished watch session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchSummary {
    /// Compiles attempted, including the initial one
    pub compiles: usize,
    /// Compiles that failed after startup
    pub failures: usize,
}

/// Watch Use Case
///
/// Compiles once at startup, then once per change notification until the
/// running flag is cleared or the change source closes.
pub struct WatchUseCase {
    options: WatchOptions,
    compiler: StyleCompiler,
}

impl WatchUseCase {
    pub fn new(options: WatchOptions) -> Self {
        let compiler = StyleCompiler::new(options.compile.clone());
        Self { options, compiler }
    }

    /// Start watching with the `notify` backend (blocking)
    pub fn start<F>(&self, running: Arc<AtomicBool>, on_event: F) -> StyleResult<WatchSummary>
    where
        F: Fn(WatchEvent),
    {
        self.start_with(running, NotifySource::subscribe, on_event)
    }

    /// Start watching with a caller-supplied subscription.
    ///
    /// Directory-creation, initial compile and subscription failures are
    /// returned. Compile failures after startup are reported through
    /// `on_event` and watching continues.
    pub fn start_with<S, Sub, F>(
        &self,
        running: Arc<AtomicBool>,
        subscribe: Sub,
        on_event: F,
    ) -> StyleResult<WatchSummary>
    where
        S: ChangeSource,
        Sub: FnOnce(&Path) -> StyleResult<S>,
        F: Fn(WatchEvent),
    {
        let compile = &self.options.compile;

        ensure_output_directory(&compile.output)?;

        on_event(WatchEvent::WatchStarted {
            watch_dir: self.options.watch_dir.display().to_string(),
            source: compile.source.display().to_string(),
            output: compile.output.display().to_string(),
        });

        self.compile_once(&on_event)?;
        let mut summary = WatchSummary {
            compiles: 1,
            failures: 0,
        };

        let mut source = subscribe(&self.options.watch_dir)?;
        let own_output = resolve(&compile.output);

        while running.load(Ordering::SeqCst) {
            match source.poll(POLL_INTERVAL) {
                SourcePoll::Change(notice) => {
                    // Writing the output would otherwise retrigger itself
                    // when it lives under the watched directory.
                    if notice.only_concerns(&own_output) {
                        log::trace!("ignoring change to compiled output");
                        continue;
                    }

                    on_event(WatchEvent::FileChanged {
                        kind: notice.kind,
                        paths: notice
                            .paths
                            .iter()
                            .map(|p| p.display().to_string())
                            .collect(),
                    });

                    summary.compiles += 1;
                    if let Err(e) = self.compile_once(&on_event) {
                        summary.failures += 1;
                        log::error!("{}", e);
                    }
                }
                SourcePoll::Idle => {}
                SourcePoll::Closed => {
                    log::debug!("change source closed");
                    break;
                }
            }
        }

        on_event(WatchEvent::Shutdown);
        Ok(summary)
    }

    fn compile_once(&self, callback: &impl Fn(WatchEvent)) -> StyleResult<CompileReport> {
        callback(WatchEvent::CompileStarted);

        match self.compiler.compile() {
            Ok(report) => {
                callback(WatchEvent::CompileComplete {
                    output: report.output.display().to_string(),
                    bytes: report.bytes,
                });
                Ok(report)
            }
            Err(e) => {
                callback(WatchEvent::Error {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }
}

fn resolve(path: &Path) -> PathBuf {
    path.canonicalize()
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Start watching for changes
pub fn watch(
    options: WatchOptions,
    running: Arc<AtomicBool>,
    event_callback: impl Fn(WatchEvent),
) -> StyleResult<WatchSummary> {
    WatchUseCase::new(options).start(running, event_callback)
}
