use std::io::{self, BufRead, Write};

use pipenet_core::ValidationError;

use crate::Console;

impl<R: BufRead, W: Write> Console<R, W> {
    pub(crate) fn write_prompt(&mut self, prompt: &str) -> io::Result<()> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()
    }

    /// Read one raw line as bytes. A closed input stream is reported as
    /// `UnexpectedEof`.
    fn read_raw_line(&mut self) -> io::Result<Vec<u8>> {
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input stream closed",
            ));
        }
        Ok(line)
    }

    /// Skip blank and non UTF-8 lines and return the next one without surrounding
    /// whitespace.
    fn read_non_blank_line(&mut self) -> io::Result<String> {
        loop {
            let Ok(line) = String::from_utf8(self.read_raw_line()?) else {
                tracing::debug!("Discarded a line that is not valid UTF-8");
                continue;
            };
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Ok(trimmed.to_string());
            }
        }
    }

    /// Prompt for a free-text name. Inner spaces are kept.
    pub(crate) fn ask_name(&mut self, prompt: &str) -> io::Result<String> {
        self.write_prompt(prompt)?;
        self.read_non_blank_line()
    }

    /// Prompt for a single word, such as a file name. Anything after the first
    /// word on the line is dropped.
    pub(crate) fn ask_token(&mut self, prompt: &str) -> io::Result<String> {
        self.write_prompt(prompt)?;
        let line = self.read_non_blank_line()?;
        Ok(line.split_whitespace().next().unwrap_or_default().to_string())
    }

    /// Prompt until `parse` accepts the line, printing its error after each rejection.
    pub(crate) fn ask<T>(
        &mut self,
        prompt: &str,
        parse: fn(&str) -> Result<T, ValidationError>,
    ) -> io::Result<T> {
        loop {
            self.write_prompt(prompt)?;
            let raw = self.read_raw_line()?;
            let line = String::from_utf8_lossy(&raw);
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(error) => {
                    tracing::debug!("Rejected input {:?}: {:?}", line.trim(), error);
                    writeln!(self.output, "{}", error)?;
                }
            }
        }
    }
}
