//! appdata - inspect and manipulate per-application settings and data stores
//!
//! # Module Structure
//!
//! - `value` - typed values and their kinds
//! - `writer` - XML and JSON settings writers
//! - `walk` - export and query walks over settings trees
//! - `store` - file-system backed package store
//! - `selection` - locality part selectors
//! - `export` - export to a directory or archive
//! - `usage` - folder and settings usage reports
//! - `console` - level-gated user output
//! - `prompt` - confirmations and overwrite policy
//! - `output` - colored query display
//! - `cmd` - settings commands

pub mod cmd;
pub mod console;
pub mod error;
pub mod export;
pub mod output;
pub mod prompt;
pub mod selection;
pub mod store;
pub mod usage;
pub mod value;
pub mod walk;
pub mod writer;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use console::{Console, DisplayLevel};
pub use error::{AppDataError, CancelReason, Result};
pub use export::{ExportOptions, ExportSummary, TargetFormat};
pub use output::QueryPrinter;
pub use prompt::{LinePrompter, Overwrite, Prompter};
pub use selection::{Part, Selection, Selector};
pub use store::{ApplicationData, Container, Locality, SettingsPath, StoreConfig};
pub use usage::{SizeFormat, SizeOptions, SizeUnit};
pub use value::{Kind, TypedValue};
pub use walk::{QueryFilter, SortOrder, WalkContext, Wildcard};
pub use writer::{SettingsFormat, SettingsWriter};
