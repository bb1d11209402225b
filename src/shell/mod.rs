// 🖥️ Command Shell - prompts, dispatch table and the interactive programs
//
// The core never prompts; everything interactive lives here. Each program
// gets a `Console` over any reader/writer pair so tests can script a session.

pub mod athletes;
pub mod calc;
pub mod grades;
pub mod loan;
pub mod squad;
pub mod stock;

use crate::calculator::CalcError;
use crate::error::{AggregateError, StoreError};
use crate::input::InputError;
use log::{debug, warn};
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("end of input")]
    EndOfInput,

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error(transparent)]
    Calc(#[from] CalcError),

    #[error("{0} does not exist")]
    NotFound(String),
}

impl ShellError {
    /// Errors that abandon one operation but leave the session running
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ShellError::EndOfInput | ShellError::Io(_))
    }
}

// ============================================================================
// CONSOLE
// ============================================================================

pub struct Console<'a> {
    input: &'a mut dyn BufRead,
    output: &'a mut dyn Write,
}

impl<'a> Console<'a> {
    pub fn new(input: &'a mut dyn BufRead, output: &'a mut dyn Write) -> Self {
        Console { input, output }
    }

    /// Print `label` and read one trimmed line
    ///
    /// Returns `ShellError::EndOfInput` once the input is exhausted.
    pub fn prompt(&mut self, label: &str) -> Result<String, ShellError> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ShellError::EndOfInput);
        }
        Ok(line.trim().to_string())
    }

    pub fn say(&mut self, text: impl Display) -> Result<(), ShellError> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    pub fn blank(&mut self) -> Result<(), ShellError> {
        writeln!(self.output)?;
        Ok(())
    }
}

// ============================================================================
// COMMAND TABLE
// ============================================================================

pub type Handler<S> = fn(&mut S, &mut Console<'_>) -> Result<(), ShellError>;

pub enum Action<S> {
    Run(Handler<S>),
    Help,
    Quit,
}

/// Fixed mapping from command words to actions, built once per program
pub struct CommandTable<S> {
    entries: Vec<(&'static str, Action<S>)>,
    fold_case: bool,
}

impl<S> CommandTable<S> {
    pub fn new() -> Self {
        CommandTable {
            entries: Vec::new(),
            fold_case: false,
        }
    }

    pub fn command(mut self, name: &'static str, handler: Handler<S>) -> Self {
        self.entries.push((name, Action::Run(handler)));
        self
    }

    pub fn help(mut self, name: &'static str) -> Self {
        self.entries.push((name, Action::Help));
        self
    }

    pub fn quit(mut self, name: &'static str) -> Self {
        self.entries.push((name, Action::Quit));
        self
    }

    /// Lower-case typed words before lookup (entries must be lower case)
    pub fn fold_case(mut self) -> Self {
        self.fold_case = true;
        self
    }

    pub fn lookup(&self, word: &str) -> Option<&Action<S>> {
        let word = if self.fold_case {
            word.to_lowercase()
        } else {
            word.to_string()
        };
        self.entries
            .iter()
            .find(|(name, _)| *name == word)
            .map(|(_, action)| action)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    pub fn print_help(&self, console: &mut Console<'_>) -> Result<(), ShellError> {
        console.say("Available commands:")?;
        for name in self.names() {
            console.say(format!("- {}", name))?;
        }
        Ok(())
    }
}

impl<S> Default for CommandTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Read command words until quit or end of input
///
/// Validation and lookup failures are printed and the loop carries on;
/// only I/O errors end it early.
pub fn run_loop<S>(
    state: &mut S,
    table: &CommandTable<S>,
    console: &mut Console<'_>,
) -> Result<(), ShellError> {
    loop {
        let word = match console.prompt("Command: ") {
            Ok(word) => word,
            Err(ShellError::EndOfInput) => return Ok(()),
            Err(e) => return Err(e),
        };
        console.blank()?;

        match table.lookup(&word) {
            None => {
                debug!("unknown command '{}'", word);
                console.say("################")?;
                console.say("Invalid command")?;
                console.say("################")?;
                console.blank()?;
                table.print_help(console)?;
            }
            Some(Action::Quit) => return Ok(()),
            Some(Action::Help) => table.print_help(console)?,
            Some(Action::Run(handler)) => {
                debug!("dispatching '{}'", word);
                match handler(state, console) {
                    Ok(()) => {}
                    Err(ShellError::EndOfInput) => return Ok(()),
                    Err(e) if e.is_recoverable() => {
                        warn!("'{}' failed: {}", word, e);
                        console.say(&e)?;
                    }
                    Err(e) => return Err(e),
                }
            }
        }
        console.blank()?;
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Console;
    use std::io::Cursor;

    /// Run `f` against scripted input and return everything it printed
    pub fn scripted<T>(input: &str, f: impl FnOnce(&mut Console<'_>) -> T) -> (T, String) {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut output: Vec<u8> = Vec::new();
        let result = {
            let mut console = Console::new(&mut reader, &mut output);
            f(&mut console)
        };
        (result, String::from_utf8(output).unwrap())
    }
}
