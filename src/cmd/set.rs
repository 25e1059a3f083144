//! `set`: create containers and write values

use std::io::Write;

use tracing::debug;

use crate::console::Console;
use crate::error::Result;
use crate::prompt::{Overwrite, Prompter};
use crate::store::{ApplicationData, CreateDisposition, SettingsPath};
use crate::value::{self, Kind};

/// A value to write into the target container.
#[derive(Debug, Clone)]
pub struct NewValue {
    pub key: String,
    pub kind: Kind,
    pub data: String,
}

#[derive(Debug, Clone)]
pub struct SetOptions {
    pub path: SettingsPath,
    /// Without a value only the container path is created.
    pub value: Option<NewValue>,
    pub overwrite: Overwrite,
}

pub fn run<W: Write>(
    app: &ApplicationData,
    options: &SetOptions,
    console: &mut Console<W>,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    let locality = options.path.locality;
    match &options.value {
        None => {
            app.create_container(locality, &options.path.segments, CreateDisposition::Always)?;
        }
        Some(new) => {
            let value = value::parse(new.kind, &new.data)?;
            let mut root = app.settings(locality)?;
            let container = root.create_path(&options.path.segments);
            if container.values().contains_key(&new.key) {
                let question = format!("Value {} exists, overwrite (Yes/No)? ", new.key);
                options.overwrite.confirm(prompter, &question)?;
            }
            debug!(path = %options.path.display(), key = %new.key, kind = %value.kind(), "set value");
            container.values_mut().insert(new.key.as_str(), value);
            app.save_settings(locality, &root)?;
        }
    }
    console.line(super::SUCCESS)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::console::DisplayLevel;
    use crate::error::{AppDataError, CancelReason};
    use crate::prompt::LinePrompter;
    use crate::store::{Locality, StoreConfig};
    use crate::value::TypedValue;
    use tempfile::TempDir;

    fn options(path: &str, key: &str, kind: Kind, data: &str, overwrite: Overwrite) -> SetOptions {
        SetOptions {
            path: SettingsPath::parse(path).unwrap(),
            value: Some(NewValue {
                key: key.to_string(),
                kind,
                data: data.to_string(),
            }),
            overwrite,
        }
    }

    fn answers(input: &str) -> LinePrompter<Cursor<Vec<u8>>, Vec<u8>> {
        LinePrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_set_creates_path_and_value() {
        let dir = TempDir::new().unwrap();
        let app = ApplicationData::provision(&StoreConfig::new(dir.path()), "pkg").unwrap();
        let mut console = Console::new(Vec::new(), DisplayLevel::Brief);
        let opts = options("roaming/a/b", "count", Kind::Int32, " 42 ", Overwrite::Prompt);
        run(&app, &opts, &mut console, &mut answers("")).unwrap();

        let root = app.settings(Locality::Roaming).unwrap();
        let b = root.find(&["a".to_string(), "b".to_string()]).unwrap();
        assert_eq!(b.values().get("count"), Some(&TypedValue::Int32(42)));
        assert_eq!(
            String::from_utf8(console.into_inner()).unwrap(),
            "The operation completed successfully.\n"
        );
    }

    #[test]
    fn test_set_container_only() {
        let dir = TempDir::new().unwrap();
        let app = ApplicationData::provision(&StoreConfig::new(dir.path()), "pkg").unwrap();
        let opts = SetOptions {
            path: SettingsPath::parse("local\\empty").unwrap(),
            value: None,
            overwrite: Overwrite::Prompt,
        };
        let mut console = Console::new(Vec::new(), DisplayLevel::Quiet);
        run(&app, &opts, &mut console, &mut answers("")).unwrap();
        assert!(app.settings(Locality::Local).unwrap().find(&["empty".to_string()]).is_some());
        assert!(console.into_inner().is_empty());
    }

    #[test]
    fn test_set_existing_value_prompts() {
        let dir = TempDir::new().unwrap();
        let app = ApplicationData::provision(&StoreConfig::new(dir.path()), "pkg").unwrap();
        let mut console = Console::new(Vec::new(), DisplayLevel::Quiet);
        run(&app, &options("local", "k", Kind::String, "one", Overwrite::Yes), &mut console, &mut answers("")).unwrap();

        let err = run(&app, &options("local", "k", Kind::String, "two", Overwrite::Prompt), &mut console, &mut answers("n\n"))
            .unwrap_err();
        assert!(matches!(err, AppDataError::UserCancelled(CancelReason::ByUser)));

        let err = run(&app, &options("local", "k", Kind::String, "two", Overwrite::No), &mut console, &mut answers(""))
            .unwrap_err();
        assert!(matches!(err, AppDataError::UserCancelled(CancelReason::OverwriteNo)));

        run(&app, &options("local", "k", Kind::String, "three", Overwrite::Prompt), &mut console, &mut answers("maybe\ny\n"))
            .unwrap();
        let root = app.settings(Locality::Local).unwrap();
        assert_eq!(root.values().get("k"), Some(&TypedValue::String("three".into())));
    }

    #[test]
    fn test_set_rejects_bad_data_before_writing() {
        let dir = TempDir::new().unwrap();
        let app = ApplicationData::provision(&StoreConfig::new(dir.path()), "pkg").unwrap();
        let mut console = Console::new(Vec::new(), DisplayLevel::Quiet);
        let err = run(&app, &options("local/x", "k", Kind::UInt8, "300", Overwrite::Yes), &mut console, &mut answers(""))
            .unwrap_err();
        assert!(matches!(err, AppDataError::Format { .. }));
        assert!(app.settings(Locality::Local).unwrap().find(&["x".to_string()]).is_none());
    }
}
