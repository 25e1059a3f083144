//! `path`, `quota`, `version` and `signaldatachanged`

use std::io::Write;

use tracing::info;

use crate::console::Console;
use crate::error::Result;
use crate::store::{ApplicationData, Locality};

/// Print the folder of each requested locality, in the fixed order local,
/// local cache, roaming, temporary.
pub fn paths<W: Write>(app: &ApplicationData, localities: &[Locality], console: &mut Console<W>) -> Result<()> {
    for locality in Locality::ALL {
        if localities.contains(&locality) {
            console.line(&format!("{:>10}: {}", locality.name(), app.folder(locality).display()))?;
        }
    }
    Ok(())
}

pub fn quota<W: Write>(app: &ApplicationData, console: &mut Console<W>) -> Result<()> {
    console.line(&format!("Quota: {} KB", app.roaming_storage_quota()))?;
    Ok(())
}

pub fn version<W: Write>(app: &ApplicationData, console: &mut Console<W>) -> Result<()> {
    console.line(&format!("Version: {}", app.version()))?;
    Ok(())
}

pub fn signal_data_changed<W: Write>(app: &mut ApplicationData, console: &mut Console<W>) -> Result<()> {
    let at = app.signal_data_changed()?;
    info!(package = app.package(), %at, "data changed");
    console.verbose(&format!("Signalled at {}", at.to_rfc3339()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::DisplayLevel;
    use crate::store::StoreConfig;
    use tempfile::TempDir;

    fn shown(console: Console<Vec<u8>>) -> String {
        String::from_utf8(console.into_inner()).unwrap()
    }

    #[test]
    fn test_paths_are_aligned() {
        let dir = TempDir::new().unwrap();
        let app = ApplicationData::provision(&StoreConfig::new(dir.path()), "pkg").unwrap();
        let mut console = Console::new(Vec::new(), DisplayLevel::Brief);
        paths(&app, &[Locality::Temporary, Locality::Local], &mut console).unwrap();

        let text = shown(console);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("     Local: "));
        assert!(lines[0].ends_with("Local"));
        assert!(lines[1].starts_with(" Temporary: "));
        assert!(lines[1].ends_with("Temp"));
    }

    #[test]
    fn test_quota_and_version() {
        let dir = TempDir::new().unwrap();
        let app = ApplicationData::provision(&StoreConfig::new(dir.path()), "pkg").unwrap();
        let mut console = Console::new(Vec::new(), DisplayLevel::Brief);
        quota(&app, &mut console).unwrap();
        version(&app, &mut console).unwrap();
        assert_eq!(shown(console), "Quota: 100 KB\nVersion: 0\n");
    }

    #[test]
    fn test_signal_persists() {
        let dir = TempDir::new().unwrap();
        let config = StoreConfig::new(dir.path());
        let mut app = ApplicationData::provision(&config, "pkg").unwrap();
        assert!(app.data_changed().is_none());
        let mut console = Console::new(Vec::new(), DisplayLevel::Brief);
        signal_data_changed(&mut app, &mut console).unwrap();
        assert!(shown(console).is_empty());
        assert!(ApplicationData::open(&config, "pkg").unwrap().data_changed().is_some());
    }
}
