//! Line-oriented prompt/print helpers over any reader and writer.

use std::fmt::Display;
use std::io::{BufRead, Write};

use super::{MenuError, MenuResult};

/// Prompts on `output` and reads answers from `input`, one line each.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print one line.
    pub fn say(&mut self, line: impl Display) -> MenuResult<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    /// Print `label` and read the answer without its line ending.
    pub fn prompt(&mut self, label: &str) -> MenuResult<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(MenuError::EndOfInput);
        }
        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
    }

    /// Read a whole number.
    pub fn prompt_number(&mut self, label: &str) -> MenuResult<i64> {
        let answer = self.prompt(label)?;
        parse_number(&answer)
    }

    /// Read a replacement value; an empty answer keeps `current`.
    pub fn prompt_or_keep(&mut self, label: &str, current: &str) -> MenuResult<String> {
        let answer = self.prompt(&format!("{} (current: {}): ", label, current))?;
        if answer.is_empty() {
            Ok(current.to_string())
        } else {
            Ok(answer)
        }
    }

    /// Read a replacement number; an empty answer keeps `current`.
    pub fn prompt_number_or_keep(&mut self, label: &str, current: i64) -> MenuResult<i64> {
        let answer = self.prompt(&format!("{} (current: {}): ", label, current))?;
        if answer.is_empty() {
            Ok(current)
        } else {
            parse_number(&answer)
        }
    }

    /// Ask a yes/no question; only "y" or "yes" (any case) count as yes.
    pub fn confirm(&mut self, question: &str) -> MenuResult<bool> {
        let answer = self.prompt(&format!("{} (y/n): ", question))?;
        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }

    /// Give back the writer, e.g. to inspect captured output.
    pub fn into_output(self) -> W {
        self.output
    }
}

fn parse_number(answer: &str) -> MenuResult<i64> {
    answer
        .trim()
        .parse()
        .map_err(|_| MenuError::InvalidNumber(answer.to_string()))
}
