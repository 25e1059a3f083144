//! `get`: show containers and values below a settings path

use termcolor::WriteColor;
use tracing::debug;

use crate::error::Result;
use crate::output::QueryPrinter;
use crate::store::{ApplicationData, CreateDisposition, SettingsPath};
use crate::walk::{QueryFilter, QueryWalker};

/// Print what `filter` selects below `path`. Returns the number of values
/// shown.
pub fn run<W: WriteColor>(
    app: &ApplicationData,
    path: &SettingsPath,
    filter: &QueryFilter,
    printer: &mut QueryPrinter<W>,
) -> Result<usize> {
    let container =
        app.create_container(path.locality, &path.segments, CreateDisposition::Existing)?;
    let shown =
        QueryWalker::new(path.locality, filter).walk(&container, &path.relative(), printer)?;
    debug!(path = %path.display(), shown, "query complete");
    Ok(shown)
}

#[cfg(test)]
mod tests {
    use termcolor::NoColor;

    use super::*;
    use crate::store::{Container, Locality, StoreConfig};
    use crate::value::{Kind, TypedValue};
    use crate::walk::Wildcard;
    use tempfile::TempDir;

    fn app(dir: &TempDir) -> ApplicationData {
        let app = ApplicationData::provision(&StoreConfig::new(dir.path()), "pkg").unwrap();
        let root = Container::new("Local")
            .with_value("top", TypedValue::Int32(1))
            .with_child(
                Container::new("people")
                    .with_value("Jan", TypedValue::String("x".into()))
                    .with_value("Jon", TypedValue::Boolean(false))
                    .with_child(Container::new("archive").with_value("Jaan", TypedValue::Int32(3))),
            );
        app.save_settings(Locality::Local, &root).unwrap();
        app
    }

    fn query(app: &ApplicationData, path: &str, filter: &QueryFilter) -> (usize, String) {
        let mut printer = QueryPrinter::new(NoColor::new(Vec::new()));
        let shown = run(app, &SettingsPath::parse(path).unwrap(), filter, &mut printer).unwrap();
        (shown, String::from_utf8(printer.into_inner().into_inner()).unwrap())
    }

    #[test]
    fn test_get_container_values() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);
        let (shown, text) = query(&app, "local\\people", &QueryFilter::default());
        assert_eq!(shown, 2);
        assert_eq!(text, "\nLOCAL\\people\n    Jan    STRING    x\n    Jon    BOOLEAN    false\n");
    }

    #[test]
    fn test_get_recursive_wildcard() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);
        let filter = QueryFilter {
            value_pattern: Some(Wildcard::new("J?n", false).unwrap()),
            recurse: true,
            ..Default::default()
        };
        let (shown, text) = query(&app, "LOCAL", &filter);
        assert_eq!(shown, 2);
        assert!(text.contains("LOCAL\\people\n"));
        assert!(!text.contains("archive"));
    }

    #[test]
    fn test_get_type_filter() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);
        let filter = QueryFilter {
            kind: Some(Kind::Int32),
            recurse: true,
            ..Default::default()
        };
        let (shown, text) = query(&app, "local", &filter);
        assert_eq!(shown, 2);
        assert_eq!(
            text,
            "\nLOCAL\n    top    INT32    1\n\nLOCAL\\people\\archive\n    Jaan    INT32    3\n"
        );
    }

    #[test]
    fn test_get_missing_container() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);
        let mut printer = QueryPrinter::new(NoColor::new(Vec::new()));
        let path = SettingsPath::parse("local/nobody").unwrap();
        let err = run(&app, &path, &QueryFilter::default(), &mut printer).unwrap_err();
        assert_eq!(err.to_string(), "Container path not found (nobody)");
    }
}
