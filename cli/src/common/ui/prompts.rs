//! # Programidex Operator Prompts (`common::ui::prompts`)
//!
//! File: cli/src/common/ui/prompts.rs
//!
//! ## Overview
//!
//! Every interaction with the operator is one line of output or one line of
//! input. The `Prompter` trait captures exactly that, and `Console` implements
//! it over any `BufRead`/`Write` pair: real stdin/stdout in `main`, in-memory
//! cursors in tests.
//!
//! End of input is reported as `None` rather than an empty answer, so a menu
//! loop can stop instead of spinning on a closed stdin. Bytes that are not
//! valid UTF-8 are replaced, never rejected: a garbled line is just another
//! answer for the caller to validate.
//!
//! ## Answer Conventions
//!
//! - `confirm`: affirmative when the trimmed, lowercased answer starts with
//!   `y`; anything else, including end of input, is "no".
//! - `ask_with_default`: an empty answer selects the default.
//!
use crate::core::error::Result;
use anyhow::Context;
use std::io::{BufRead, Write};
use tracing::debug;

/// Line-oriented operator I/O.
pub trait Prompter {
    /// Shows one line of output.
    fn say(&mut self, message: &str);

    /// Shows `prompt` (without a newline) and reads one line.
    ///
    /// Returns the line without its terminator, or `None` at end of input.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// True when `answer` counts as "yes".
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().to_lowercase().starts_with('y')
}

/// Asks a yes/no question; end of input counts as "no".
pub fn confirm<P: Prompter + ?Sized>(prompter: &mut P, question: &str) -> Result<bool> {
    let answer = prompter.ask(&format!("{} (y/n): ", question))?;
    Ok(answer.as_deref().map(is_affirmative).unwrap_or(false))
}

/// Asks for a value showing `default` in brackets; empty input selects it.
pub fn ask_with_default<P: Prompter + ?Sized>(
    prompter: &mut P,
    question: &str,
    default: &str,
) -> Result<String> {
    let answer = prompter.ask(&format!("{} [{}]: ", question, default))?;
    let trimmed = answer.as_deref().map(str::trim).unwrap_or("");
    if trimmed.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

/// Asks for a trimmed answer; end of input yields an empty string.
pub fn ask_trimmed<P: Prompter + ?Sized>(prompter: &mut P, prompt: &str) -> Result<String> {
    Ok(prompter
        .ask(prompt)?
        .map(|answer| answer.trim().to_string())
        .unwrap_or_default())
}

/// # Console (`Console`)
///
/// `Prompter` over a reader and a writer. Write failures on the output side
/// are logged at debug level and otherwise ignored; read failures propagate.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    /// Consumes the console, returning the writer with the transcript.
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for Console<R, W> {
    fn say(&mut self, message: &str) {
        if let Err(e) = writeln!(self.output, "{}", message) {
            debug!("Failed to write to console: {}", e);
        }
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        if let Err(e) = write!(self.output, "{}", prompt).and_then(|_| self.output.flush()) {
            debug!("Failed to write prompt to console: {}", e);
        }
        let mut raw = Vec::new();
        let read = self
            .input
            .read_until(b'\n', &mut raw)
            .context("Failed to read operator input")?;
        if read == 0 {
            debug!("End of operator input reached.");
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&raw);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
