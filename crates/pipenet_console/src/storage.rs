use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::Console;

impl<R: BufRead, W: Write> Console<R, W> {
    pub(crate) fn save(&mut self) -> io::Result<()> {
        let filename = self.ask_token("Filename: ")?;
        match self.engine.save(Path::new(&filename)) {
            Ok(()) => writeln!(self.output, "Data saved"),
            Err(error) => writeln!(self.output, "Error saving file: {}", error),
        }
    }

    pub(crate) fn load(&mut self) -> io::Result<()> {
        let filename = self.ask_token("Filename: ")?;
        self.load_file(Path::new(&filename))
    }

    /// Replace the current records with the contents of `path`, reporting the
    /// outcome on the console.
    pub fn load_file(&mut self, path: &Path) -> io::Result<()> {
        match self.engine.load(path) {
            Ok(()) => writeln!(self.output, "Data loaded"),
            Err(error) => writeln!(self.output, "Error loading file: {}", error),
        }
    }
}
