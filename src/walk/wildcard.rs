//! `*`/`?` wildcard patterns

use regex::{Regex, RegexBuilder};

use crate::error::{AppDataError, Result};

/// A fully anchored wildcard: `*` matches any run, `?` exactly one
/// character, everything else literally.
#[derive(Debug, Clone)]
pub struct Wildcard {
    regex: Regex,
}

impl Wildcard {
    pub fn new(pattern: &str, case_sensitive: bool) -> Result<Self> {
        let mut source = String::with_capacity(pattern.len() + 8);
        source.push('^');
        for c in pattern.chars() {
            match c {
                '*' => source.push_str(".*"),
                '?' => source.push('.'),
                c => source.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
            }
        }
        source.push('$');

        let regex = RegexBuilder::new(&source)
            .case_insensitive(!case_sensitive)
            .dot_matches_new_line(true)
            .build()
            .map_err(|_| AppDataError::format("WILDCARD", pattern))?;
        Ok(Self {
            regex,
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}
