//! Store partitions and the `ROOT\container` path syntax

use std::fmt;

use crate::error::{AppDataError, Result};

/// A named partition of an application's store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locality {
    Local,
    Roaming,
    Temporary,
    LocalCache,
}

impl Locality {
    pub const ALL: [Locality; 4] = [
        Locality::Local,
        Locality::LocalCache,
        Locality::Roaming,
        Locality::Temporary,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Locality::Local => "Local",
            Locality::Roaming => "Roaming",
            Locality::Temporary => "Temporary",
            Locality::LocalCache => "LocalCache",
        }
    }

    /// Directory holding this locality's files inside a package.
    pub fn folder_name(self) -> &'static str {
        match self {
            Locality::Local => "Local",
            Locality::Roaming => "Roaming",
            Locality::Temporary => "Temp",
            Locality::LocalCache => "LocalCache",
        }
    }

    /// Only local and roaming data carry settings containers.
    pub fn has_settings(self) -> bool {
        matches!(self, Locality::Local | Locality::Roaming)
    }

    /// Parse a settings root (`local` or `roaming`), ignoring case.
    pub fn from_settings_root(root: &str) -> Option<Locality> {
        if root.eq_ignore_ascii_case("local") {
            Some(Locality::Local)
        } else if root.eq_ignore_ascii_case("roaming") {
            Some(Locality::Roaming)
        } else {
            None
        }
    }
}

impl fmt::Display for Locality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A container location: a settings locality plus container names below
/// its root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsPath {
    pub locality: Locality,
    pub segments: Vec<String>,
}

impl SettingsPath {
    /// Parse `ROOT`, `ROOT\a\b` or `ROOT/a/b`.
    pub fn parse(text: &str) -> Result<SettingsPath> {
        let (root, rest) = match text.find(['\\', '/']) {
            Some(i) => (&text[..i], &text[i + 1..]),
            None => (text, ""),
        };
        if root.is_empty() {
            return Err(AppDataError::InvalidPath(text.to_string()));
        }
        let locality = Locality::from_settings_root(root)
            .ok_or_else(|| AppDataError::InvalidPath(text.to_string()))?;
        let segments: Vec<String> = rest
            .split(['\\', '/'])
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Ok(SettingsPath { locality, segments })
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Container path below the root, `\`-separated.
    pub fn relative(&self) -> String {
        self.segments.join("\\")
    }

    /// Display form with an upper-cased locality prefix, e.g. `LOCAL\people`.
    pub fn display(&self) -> String {
        display_path(self.locality, &self.relative())
    }
}

/// Join an upper-cased locality with a container path.
pub fn display_path(locality: Locality, relative: &str) -> String {
    let mut path = locality.name().to_uppercase();
    if !relative.is_empty() {
        if !relative.starts_with('\\') {
            path.push('\\');
        }
        path.push_str(relative);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_root_only() {
        let path = SettingsPath::parse("Local").unwrap();
        assert_eq!(path.locality, Locality::Local);
        assert!(path.is_root());
        assert_eq!(path.display(), "LOCAL");
    }

    #[test]
    fn test_parse_both_separators() {
        let path = SettingsPath::parse("roaming\\people/Places").unwrap();
        assert_eq!(path.locality, Locality::Roaming);
        assert_eq!(path.segments, vec!["people", "Places"]);
        assert_eq!(path.display(), "ROAMING\\people\\Places");
    }

    #[test]
    fn test_parse_rejects_bad_roots() {
        assert!(matches!(
            SettingsPath::parse("temporary\\x"),
            Err(AppDataError::InvalidPath(_))
        ));
        assert!(SettingsPath::parse("\\x").is_err());
        assert!(SettingsPath::parse("").is_err());
    }

    #[test]
    fn test_display_path_with_leading_separator() {
        assert_eq!(display_path(Locality::Local, "\\child"), "LOCAL\\child");
        assert_eq!(display_path(Locality::Local, ""), "LOCAL");
    }
}
