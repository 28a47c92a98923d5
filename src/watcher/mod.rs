//! Watch mode: compile once, then recompile on every change notification
//!
//! - `WatchUseCase` - main loop, generic over the change source
//! - `NotifySource` - `notify`-backed change source
//! - `WatchEvent` - events emitted for the CLI (text or NDJSON)
//!
//! There is no debouncing: each notification triggers one full compile.

mod event;
mod source;
mod use_case;


pub use event::{WatchEvent, WatchOptions};
pub use source::{ChangeKind, ChangeNotice, ChangeSource, NotifySource, SourcePoll};
pub use use_case::{watch, WatchSummary, WatchUseCase};
