//! Line-oriented prompting over any reader/writer pair.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    /// The input reached end-of-file while waiting for an answer.
    #[error("input closed")]
    Closed,

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type PromptResult<T> = Result<T, PromptError>;

/// Asks questions on `output` and reads one-line answers from `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print a full line of output.
    pub fn say(&mut self, message: impl core::fmt::Display) -> PromptResult<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    /// Print `label` and read the answer, trimmed.
    pub fn ask(&mut self, label: &str) -> PromptResult<String> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed);
        }
        Ok(line.trim().to_string())
    }

    /// Ask until the answer parses as `T`; `expected` describes a valid answer.
    pub fn ask_parsed<T: FromStr>(&mut self, label: &str, expected: &str) -> PromptResult<T> {
        self.ask_with(label, expected, |raw| raw.parse().ok())
    }

    /// Ask until `convert` accepts the answer.
    pub fn ask_with<T>(
        &mut self,
        label: &str,
        expected: &str,
        convert: impl Fn(&str) -> Option<T>,
    ) -> PromptResult<T> {
        loop {
            let answer = self.ask(label)?;
            match convert(&answer) {
                Some(value) => return Ok(value),
                None => self.say(format_args!("Please enter {expected}."))?,
            }
        }
    }

    /// Yes/no question; anything but `y`/`yes` counts as no.
    pub fn confirm(&mut self, label: &str) -> PromptResult<bool> {
        let answer = self.ask(&format!("{label} [y/N]"))?;
        Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn printed(p: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.into_output()).unwrap()
    }

    #[test]
    fn ask_trims_answer_and_prints_label() {
        let mut p = prompter("  Laptop \r\n");
        assert_eq!(p.ask("Name").unwrap(), "Laptop");
        assert_eq!(printed(p), "Name: ");
    }

    #[test]
    fn ask_reports_closed_input() {
        let mut p = prompter("");
        assert!(matches!(p.ask("Name"), Err(PromptError::Closed)));
    }

    #[test]
    fn ask_parsed_reprompts_until_valid() {
        let mut p = prompter("ten\n-3.5x\n12\n");
        let value: i64 = p.ask_parsed("Quantity", "a whole number").unwrap();
        assert_eq!(value, 12);
        let out = printed(p);
        assert_eq!(out.matches("Please enter a whole number.").count(), 2);
        assert_eq!(out.matches("Quantity: ").count(), 3);
    }

    #[test]
    fn ask_parsed_gives_up_when_input_closes() {
        let mut p = prompter("abc\n");
        let result: PromptResult<f64> = p.ask_parsed("Price", "a number");
        assert!(matches!(result, Err(PromptError::Closed)));
    }

    #[test]
    fn confirm_accepts_only_yes() {
        let mut p = prompter("Y\nno\n\nyes\n");
        assert!(p.confirm("Replace").unwrap());
        assert!(!p.confirm("Replace").unwrap());
        assert!(!p.confirm("Replace").unwrap());
        assert!(p.confirm("Replace").unwrap());
    }
}
