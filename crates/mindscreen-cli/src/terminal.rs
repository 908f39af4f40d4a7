//! Line-oriented prompts over any reader/writer pair.
//!
//! Invalid input is reported and asked again; only a closed input stream
//! ends a prompt with an error.

use std::fmt::Display;
use std::io::{BufRead, Write};

pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, text: impl Display) -> eyre::Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    pub fn blank(&mut self) -> eyre::Result<()> {
        writeln!(self.output)?;
        Ok(())
    }

    /// Print `prompt` and read one trimmed line.
    pub fn read_line(&mut self, prompt: &str) -> eyre::Result<String> {
        write!(self.output, "{prompt} ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(eyre::eyre!("input closed"));
        }
        Ok(line.trim().to_string())
    }

    /// Numbered menu. Returns the 0-based index of the chosen option.
    pub fn choose(&mut self, prompt: &str, options: &[&str]) -> eyre::Result<usize> {
        self.say(prompt)?;
        for (i, option) in options.iter().enumerate() {
            self.say(format_args!("  {}) {option}", i + 1))?;
        }
        loop {
            let line = self.read_line(">")?;
            match line.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(n - 1),
                _ => self.say(format_args!("Please enter a number from 1 to {}.", options.len()))?,
            }
        }
    }

    /// Yes/no question. An empty answer keeps `default`.
    pub fn confirm(&mut self, prompt: &str, default: bool) -> eyre::Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            let line = self.read_line(&format!("{prompt} {hint}"))?;
            match line.to_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.say("Please answer y or n.")?,
            }
        }
    }

    /// Whole number. An empty answer yields `default`, which may be `None`.
    pub fn ask_integer(&mut self, prompt: &str, default: Option<i64>) -> eyre::Result<Option<i64>> {
        self.ask_parsed(prompt, default, "Please enter a whole number.")
    }

    /// Decimal number. An empty answer yields `default`.
    pub fn ask_decimal(&mut self, prompt: &str, default: Option<f64>) -> eyre::Result<Option<f64>> {
        self.ask_parsed(prompt, default, "Please enter a number.")
    }

    fn ask_parsed<T>(&mut self, prompt: &str, default: Option<T>, retry: &str) -> eyre::Result<Option<T>>
    where
        T: std::str::FromStr + Display + Copy,
    {
        let prompt = match default {
            Some(d) => format!("{prompt} [{d}]:"),
            None => format!("{prompt}:"),
        };
        loop {
            let line = self.read_line(&prompt)?;
            if line.is_empty() {
                return Ok(default);
            }
            match line.parse::<T>() {
                Ok(v) => return Ok(Some(v)),
                Err(_) => self.say(retry)?,
            }
        }
    }
}
