//! `clear`: remove the files and settings of localities

use std::io::Write;

use tracing::info;

use crate::console::Console;
use crate::error::Result;
use crate::store::{ApplicationData, Locality};

/// Localities emptied by `clear --all`.
pub const CLEAR_ALL: [Locality; 3] = [Locality::Local, Locality::Roaming, Locality::Temporary];

pub fn run<W: Write>(app: &ApplicationData, localities: &[Locality], console: &mut Console<W>) -> Result<()> {
    for &locality in localities {
        console.verbose(&format!("Clearing {}", locality))?;
        app.clear(locality)?;
    }
    info!(package = app.package(), count = localities.len(), "cleared localities");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::console::DisplayLevel;
    use crate::store::{Container, StoreConfig};
    use crate::value::TypedValue;
    use tempfile::TempDir;

    #[test]
    fn test_clear_selected_localities() {
        let dir = TempDir::new().unwrap();
        let app = ApplicationData::provision(&StoreConfig::new(dir.path()), "pkg").unwrap();
        for locality in Locality::ALL {
            fs::write(app.folder(locality).join("f.txt"), "x").unwrap();
        }
        let root = Container::new("Roaming").with_value("k", TypedValue::Boolean(true));
        app.save_settings(Locality::Roaming, &root).unwrap();

        let mut console = Console::new(Vec::new(), DisplayLevel::Verbose);
        run(&app, &[Locality::Roaming, Locality::Temporary], &mut console).unwrap();

        assert!(app.folder(Locality::Local).join("f.txt").exists());
        assert!(app.folder(Locality::LocalCache).join("f.txt").exists());
        assert!(!app.folder(Locality::Roaming).join("f.txt").exists());
        assert!(!app.folder(Locality::Temporary).join("f.txt").exists());
        assert!(app.settings(Locality::Roaming).unwrap().values().is_empty());
        assert_eq!(
            String::from_utf8(console.into_inner()).unwrap(),
            "Clearing Roaming\nClearing Temporary\n"
        );
    }

    #[test]
    fn test_clear_all_leaves_local_cache() {
        assert!(!CLEAR_ALL.contains(&Locality::LocalCache));
    }
}
