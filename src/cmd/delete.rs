//! `delete`: remove a container, one value or all values of a container

use std::io::Write;

use tracing::debug;

use crate::console::Console;
use crate::error::{AppDataError, Result};
use crate::prompt::{Prompter, confirm_unless};
use crate::store::{ApplicationData, SettingsPath};

/// What `delete` removes at the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    /// The container itself and everything below it.
    Container,
    Value(String),
    AllValues,
}

#[derive(Debug, Clone)]
pub struct DeleteOptions {
    pub path: SettingsPath,
    pub target: DeleteTarget,
    /// Skip confirmation prompts.
    pub force: bool,
}

pub fn run<W: Write>(
    app: &ApplicationData,
    options: &DeleteOptions,
    console: &mut Console<W>,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    let path = &options.path;
    match &options.target {
        DeleteTarget::Container => delete_container(app, path, options.force, prompter)?,
        target => delete_values(app, path, target, options.force, prompter)?,
    }
    console.line(super::SUCCESS)?;
    Ok(())
}

fn delete_container(
    app: &ApplicationData,
    path: &SettingsPath,
    force: bool,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    if path.is_root() {
        return Err(AppDataError::InvalidPath(path.display()));
    }
    if app.settings(path.locality)?.find(&path.segments).is_none() {
        return Err(AppDataError::not_found("Container path", path.relative()));
    }
    let question = format!("Permanently delete the container {} (Yes/No)? ", path.display());
    confirm_unless(force, prompter, &question)?;
    app.delete_container(path.locality, &path.segments)?;
    debug!(path = %path.display(), "deleted container");
    Ok(())
}

fn delete_values(
    app: &ApplicationData,
    path: &SettingsPath,
    target: &DeleteTarget,
    force: bool,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    let mut root = app.settings(path.locality)?;
    let container = root.create_path(&path.segments);
    let values = container.values_mut();

    match target {
        DeleteTarget::Value(key) => {
            if !values.contains_key(key) {
                debug!(path = %path.display(), key, "value absent");
                return Ok(());
            }
            confirm_unless(force, prompter, &format!("Delete the value {} (Yes/No)? ", key))?;
            values.remove(key);
            debug!(path = %path.display(), key, "deleted value");
        }
        _ => {
            let count = values.len();
            if count == 0 {
                return Ok(());
            }
            let question = format!(
                "Delete all {} {} in the container {} (Yes/No)? ",
                count,
                if count == 1 { "value" } else { "values" },
                path.display()
            );
            confirm_unless(force, prompter, &question)?;
            values.clear();
            debug!(path = %path.display(), count, "deleted values");
        }
    }
    app.save_settings(path.locality, &root)
}
