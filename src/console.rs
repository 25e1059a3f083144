//! User-facing output gated by display level

use std::io::{self, Stdout, Write};

/// How much a command prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum DisplayLevel {
    Quiet,
    #[default]
    Brief,
    Verbose,
}

/// Command output sink. Brief lines are hidden by `--quiet`, verbose lines
/// only appear with `--verbose`.
pub struct Console<W: Write = Stdout> {
    out: W,
    level: DisplayLevel,
}

impl Console<Stdout> {
    pub fn stdout(level: DisplayLevel) -> Self {
        Self::new(io::stdout(), level)
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W, level: DisplayLevel) -> Self {
        Self { out, level }
    }

    pub fn is_verbose(&self) -> bool {
        self.level >= DisplayLevel::Verbose
    }

    /// Print without a line break (progress dots).
    pub fn print(&mut self, text: &str) -> io::Result<()> {
        if self.level >= DisplayLevel::Brief {
            write!(self.out, "{}", text)?;
            self.out.flush()?;
        }
        Ok(())
    }

    pub fn line(&mut self, text: &str) -> io::Result<()> {
        if self.level >= DisplayLevel::Brief {
            writeln!(self.out, "{}", text)?;
        }
        Ok(())
    }

    pub fn verbose(&mut self, text: &str) -> io::Result<()> {
        if self.is_verbose() {
            writeln!(self.out, "{}", text)?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
