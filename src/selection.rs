//! Locality selectors (`--locality=local:files`, `--locality=temporary-`)

use std::fmt;
use std::str::FromStr;

use crate::store::Locality;

/// One exportable part of a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    LocalFiles,
    LocalSettings,
    RoamingFiles,
    RoamingSettings,
    Temporary,
    LocalCacheFiles,
}

impl Part {
    /// Processing order: file folders first, then settings.
    pub const ORDER: [Part; 6] = [
        Part::LocalFiles,
        Part::LocalCacheFiles,
        Part::RoamingFiles,
        Part::Temporary,
        Part::LocalSettings,
        Part::RoamingSettings,
    ];

    const fn bit(self) -> u32 {
        match self {
            Part::LocalFiles => 0x0001,
            Part::LocalSettings => 0x0002,
            Part::RoamingFiles => 0x0010,
            Part::RoamingSettings => 0x0020,
            Part::Temporary => 0x0100,
            Part::LocalCacheFiles => 0x1000,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Part::LocalFiles => "LocalFiles",
            Part::LocalSettings => "LocalSettings",
            Part::RoamingFiles => "RoamingFiles",
            Part::RoamingSettings => "RoamingSettings",
            Part::Temporary => "Temporary",
            Part::LocalCacheFiles => "LocalCacheFiles",
        }
    }

    pub fn locality(self) -> Locality {
        match self {
            Part::LocalFiles | Part::LocalSettings => Locality::Local,
            Part::RoamingFiles | Part::RoamingSettings => Locality::Roaming,
            Part::Temporary => Locality::Temporary,
            Part::LocalCacheFiles => Locality::LocalCache,
        }
    }

    pub fn is_settings(self) -> bool {
        matches!(self, Part::LocalSettings | Part::RoamingSettings)
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const ALL_BITS: u32 = 0x1133;

const SELECTORS: [(&str, u32); 9] = [
    ("all", ALL_BITS),
    ("local", 0x0003),
    ("local:files", 0x0001),
    ("local:settings", 0x0002),
    ("roaming", 0x0030),
    ("roaming:files", 0x0010),
    ("roaming:settings", 0x0020),
    ("temporary", 0x0100),
    ("localcache:files", 0x1000),
];

/// One `--locality` argument: a set of parts to add or remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selector {
    bits: u32,
    remove: bool,
}

impl FromStr for Selector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, remove) = match s.strip_suffix('-') {
            Some(name) => (name, true),
            None => (s, false),
        };
        SELECTORS
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, bits)| Selector { bits, remove })
            .ok_or_else(|| {
                let names: Vec<&str> = SELECTORS.iter().map(|(n, _)| *n).collect();
                format!("unknown locality '{}' (expected one of: {})", s, names.join(", "))
            })
    }
}

/// The set of parts a command operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection(u32);

impl Selection {
    pub const ALL: Selection = Selection(ALL_BITS);

    /// Apply selectors left to right from an empty set; nothing selected
    /// means everything.
    pub fn from_selectors(selectors: &[Selector]) -> Self {
        let bits = selectors.iter().fold(0, |bits, s| {
            if s.remove { bits & !s.bits } else { bits | s.bits }
        });
        if bits == 0 { Self::ALL } else { Selection(bits) }
    }

    pub fn contains(self, part: Part) -> bool {
        self.0 & part.bit() != 0
    }

    /// Selected parts in processing order.
    pub fn parts(self) -> impl Iterator<Item = Part> {
        Part::ORDER.into_iter().filter(move |p| self.contains(*p))
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::ALL
    }
}
