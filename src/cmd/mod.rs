//! Command implementations
//!
//! Each command works on an opened [`ApplicationData`](crate::store::ApplicationData),
//! prints through a [`Console`](crate::console::Console) and asks for
//! confirmation through a [`Prompter`](crate::prompt::Prompter). Package
//! export and usage reporting live in [`crate::export`] and [`crate::usage`].
//!
//! # Module Structure
//!
//! - `get` - filtered display of settings
//! - `set` - create containers and set values
//! - `delete` - remove containers and values
//! - `clear` - empty localities
//! - `info` - folder paths, quota, version and change signalling

pub mod clear;
pub mod delete;
pub mod get;
pub mod info;
pub mod set;

/// Printed after a settings change has been saved.
pub const SUCCESS: &str = "The operation completed successfully.";
