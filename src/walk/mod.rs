//! Settings tree walking
//!
//! Two walks run over container trees:
//!
//! - `WalkContext`: depth-first export walk feeding a `SettingsWriter`
//! - `QueryWalker`: filtered walk feeding a `QueryOutput` for display
//!
//! # Module Structure
//!
//! - `order` - key and child ordering
//! - `export` - export walk with visibility-aware last flags
//! - `wildcard` - `*`/`?` patterns
//! - `query` - query filters and the display walk

mod export;
mod order;
mod query;
mod wildcard;

pub use export::WalkContext;
pub use order::SortOrder;
pub use query::{QueryFilter, QueryOutput, QueryWalker};
pub use wildcard::Wildcard;
