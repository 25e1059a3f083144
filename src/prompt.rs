//! Yes/No confirmation and overwrite policy

use std::io::{self, BufRead, Write};

use clap::ValueEnum;

use crate::error::{AppDataError, CancelReason, Result};

/// Asks the user to confirm a destructive step.
pub trait Prompter {
    /// Ask `question`; `true` means yes.
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Prompts on a text stream and reads answers line by line until one
/// starts with `y` or `n` (either case). End of input counts as no.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl LinePrompter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        loop {
            write!(self.output, "{}", question)?;
            self.output.flush()?;
            let mut answer = String::new();
            if self.input.read_line(&mut answer)? == 0 {
                writeln!(self.output)?;
                return Ok(false);
            }
            match answer.trim_start().chars().next() {
                Some('y' | 'Y') => return Ok(true),
                Some('n' | 'N') => return Ok(false),
                _ => continue,
            }
        }
    }
}

/// What to do when an operation would replace existing data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Overwrite {
    #[default]
    Prompt,
    Yes,
    No,
}

impl Overwrite {
    /// Succeed when replacing is allowed, otherwise fail with `UserCancelled`.
    pub fn confirm(self, prompter: &mut dyn Prompter, question: &str) -> Result<()> {
        match self {
            Overwrite::Yes => Ok(()),
            Overwrite::No => Err(AppDataError::UserCancelled(CancelReason::OverwriteNo)),
            Overwrite::Prompt if prompter.confirm(question)? => Ok(()),
            Overwrite::Prompt => Err(AppDataError::UserCancelled(CancelReason::ByUser)),
        }
    }
}

/// Ask `question` unless `force` is set; fail with `UserCancelled` on no.
pub fn confirm_unless(force: bool, prompter: &mut dyn Prompter, question: &str) -> Result<()> {
    if force || prompter.confirm(question)? {
        Ok(())
    } else {
        Err(AppDataError::UserCancelled(CancelReason::ByUser))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn prompter(input: &str) -> LinePrompter<Cursor<Vec<u8>>, Vec<u8>> {
        LinePrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_repeats_until_yes_or_no() {
        let mut p = prompter("maybe\n\nYes please\n");
        assert!(p.confirm("Go (Yes/No)? ").unwrap());
        let shown = String::from_utf8(p.output).unwrap();
        assert_eq!(shown.matches("Go (Yes/No)? ").count(), 3);
    }

    #[test]
    fn test_no_and_end_of_input() {
        assert!(!prompter("n\n").confirm("? ").unwrap());
        assert!(!prompter("").confirm("? ").unwrap());
    }

    #[test]
    fn test_overwrite_policy() {
        let mut p = prompter("");
        assert!(Overwrite::Yes.confirm(&mut p, "?").is_ok());
        assert!(matches!(
            Overwrite::No.confirm(&mut p, "?"),
            Err(AppDataError::UserCancelled(CancelReason::OverwriteNo))
        ));
        assert!(matches!(
            Overwrite::Prompt.confirm(&mut prompter("no\n"), "?"),
            Err(AppDataError::UserCancelled(CancelReason::ByUser))
        ));
        assert!(Overwrite::Prompt.confirm(&mut prompter("y\n"), "?").is_ok());
    }

    #[test]
    fn test_force_skips_prompt() {
        let mut p = prompter("");
        assert!(confirm_unless(true, &mut p, "?").is_ok());
        assert!(p.output.is_empty());
        assert!(confirm_unless(false, &mut p, "?").is_err());
    }
}
