use std::fmt::Display;
use std::io::{BufRead, Read as _, Write};

use chrono::NaiveDate;
use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};

use crate::store::DATE_FORMAT;

/// Failure reading from or writing to the console.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("console i/o failed: {0}")]
    Io(#[from] std::io::Error),
    /// End of input reached at a prompt that has no default.
    #[error("input closed while waiting for {0}")]
    Closed(&'static str),
}

/// Why a minutes string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinutesError {
    Invalid,
    Negative,
}

/// Parse a whole, non-negative number of minutes.
///
/// # Errors
/// [`MinutesError::Negative`] for values below zero, [`MinutesError::Invalid`]
/// for anything else that is not a `u32`.
pub fn parse_minutes(s: &str) -> Result<u32, MinutesError> {
    let value: i64 = s.trim().parse().map_err(|_| MinutesError::Invalid)?;
    if value < 0 {
        return Err(MinutesError::Negative);
    }
    u32::try_from(value).map_err(|_| MinutesError::Invalid)
}

/// Parse a `MM/DD/YYYY` date. The year must be exactly four digits.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let (_, year) = s.rsplit_once('/')?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Line-based prompts over any reader/writer pair.
///
/// The binary wraps locked stdin/stdout; tests script input with a `Cursor`
/// and capture output in a `Vec<u8>`.
pub struct Console<R, W> {
    reader: R,
    writer: W,
    clear_screen: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub const fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            clear_screen: true,
        }
    }

    #[must_use]
    pub fn with_clear_screen(mut self, enabled: bool) -> Self {
        self.clear_screen = enabled;
        self
    }

    pub const fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Read one line without its terminator. `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>, InputError> {
        self.writer.flush()?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>, InputError> {
        write!(self.writer, "{text}")?;
        self.read_line()
    }

    /// Write one line of output.
    ///
    /// # Errors
    /// Returns an error if the writer fails.
    pub fn say(&mut self, text: impl Display) -> Result<(), InputError> {
        writeln!(self.writer, "{text}")?;
        Ok(())
    }

    /// # Errors
    /// Returns an error if the writer fails.
    pub fn clear_screen(&mut self) -> Result<(), InputError> {
        if self.clear_screen {
            crossterm::queue!(self.writer, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }

    /// Prompt with `> ` and return the trimmed reply. End of input reads as an
    /// empty reply, which every menu treats as its default.
    ///
    /// # Errors
    /// Returns an error on console I/O failure.
    pub fn get_input(&mut self) -> Result<String, InputError> {
        Ok(self.get_reply()?.unwrap_or_default())
    }

    /// Like [`Console::get_input`], but reports end of input as `None` for
    /// prompts that loop until they get a usable reply.
    ///
    /// # Errors
    /// Returns an error on console I/O failure.
    pub fn get_reply(&mut self) -> Result<Option<String>, InputError> {
        Ok(self.prompt("> ")?.map(|line| line.trim().to_owned()))
    }

    fn get_required_text(
        &mut self,
        prompt: &str,
        what: &'static str,
    ) -> Result<String, InputError> {
        loop {
            let line = self.prompt(prompt)?.ok_or(InputError::Closed(what))?;
            let text = line.trim();
            if !text.is_empty() {
                return Ok(text.to_owned());
            }
        }
    }

    /// Prompt until a non-blank employee name is entered.
    ///
    /// # Errors
    /// Returns an error on console I/O failure or end of input.
    pub fn get_name(&mut self) -> Result<String, InputError> {
        self.get_required_text("Enter name: ", "a name")
    }

    /// Prompt until a non-blank task name is entered.
    ///
    /// # Errors
    /// Returns an error on console I/O failure or end of input.
    pub fn get_task(&mut self) -> Result<String, InputError> {
        self.get_required_text("Enter task name: ", "a task name")
    }

    /// Prompt until a non-negative whole number of minutes is entered.
    ///
    /// # Errors
    /// Returns an error on console I/O failure or end of input.
    pub fn get_spent_minutes(&mut self) -> Result<u32, InputError> {
        loop {
            let line = self
                .prompt("Enter time spent in (rounded) minutes: ")?
                .ok_or(InputError::Closed("minutes spent"))?;
            match parse_minutes(&line) {
                Ok(minutes) => return Ok(minutes),
                Err(MinutesError::Invalid) => {
                    self.say("Invalid minutes entered. Please enter again")?;
                }
                Err(MinutesError::Negative) => {
                    self.say("Minutes cannot be negative. Please enter again")?;
                }
            }
        }
    }

    /// Read free-form notes up to end of input, trimmed. May be empty.
    ///
    /// # Errors
    /// Returns an error on console I/O failure.
    pub fn get_notes(&mut self) -> Result<String, InputError> {
        self.say("Enter additional notes (Optional):")?;
        self.say("Enter ctrl+d to finish")?;
        self.writer.flush()?;
        let mut notes = String::new();
        self.reader.read_to_string(&mut notes)?;
        Ok(notes.trim().to_owned())
    }

    /// Prompt until a `MM/DD/YYYY` date is entered. `q` cancels with `None`.
    ///
    /// # Errors
    /// Returns an error on console I/O failure or end of input.
    pub fn get_date(&mut self) -> Result<Option<NaiveDate>, InputError> {
        loop {
            let line = self.prompt("> ")?.ok_or(InputError::Closed("a date"))?;
            let line = line.trim();
            if line.eq_ignore_ascii_case("q") {
                return Ok(None);
            }
            if let Some(date) = parse_date(line) {
                return Ok(Some(date));
            }
            self.say("Invalid date. Please enter again.")?;
        }
    }

    /// Wait for the user to acknowledge a message.
    ///
    /// # Errors
    /// Returns an error on console I/O failure.
    pub fn enter_any_key(&mut self) -> Result<(), InputError> {
        self.prompt("Enter any key to go back")?;
        Ok(())
    }
}
