use std::io::{self, BufRead, Write};

use pipenet_core::validation::{parse_flag, parse_positive_int, parse_positive_real};
use pipenet_core::{NewPipe, Pipe, PipeFilter, RecordError};

use crate::Console;

const STATUS_PROMPT: &str = "Status (0-working, 1-under repair): ";

pub(crate) fn format_pipe(pipe: &Pipe) -> String {
    format!(
        "ID: {} | {} | Length: {} | Repair: {}",
        pipe.id,
        pipe.name,
        pipe.length,
        if pipe.in_repair { "yes" } else { "no" }
    )
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub(crate) fn add_pipe(&mut self) -> io::Result<()> {
        let name = self.ask_name("Pipe name: ")?;
        let length = self.ask("Length: ", parse_positive_real)?;
        let diameter = self.ask("Diameter: ", parse_positive_int)?;
        let in_repair = self.ask("In repair (0-no, 1-yes): ", parse_flag)?;

        match self.engine.add_pipe(NewPipe {
            name,
            length,
            diameter,
            in_repair,
        }) {
            Ok(pipe) => writeln!(self.output, "Pipe added (ID: {})", pipe.id),
            Err(error) => writeln!(self.output, "{}", error),
        }
    }

    /// Ask for pipe search criteria. `None` means the choice was not recognized and
    /// "Invalid choice" has already been printed.
    fn read_pipe_filter(&mut self, header: &str) -> io::Result<Option<PipeFilter>> {
        writeln!(self.output, "{}", header)?;
        writeln!(self.output, "1 - name")?;
        writeln!(self.output, "2 - repair status")?;
        match self.ask("Choice: ", parse_positive_int)? {
            1 => Ok(Some(PipeFilter::NameContains(self.ask_name("Name: ")?))),
            2 => Ok(Some(PipeFilter::RepairStatus(
                self.ask(STATUS_PROMPT, parse_flag)?,
            ))),
            _ => {
                writeln!(self.output, "Invalid choice")?;
                Ok(None)
            }
        }
    }

    pub(crate) fn find_pipes(&mut self) -> io::Result<()> {
        let Some(filter) = self.read_pipe_filter("Search by:")? else {
            return Ok(());
        };

        let lines: Vec<String> = self
            .engine
            .find_pipes(&filter)
            .into_iter()
            .map(|pipe| match &filter {
                PipeFilter::NameContains(_) => format_pipe(pipe),
                PipeFilter::RepairStatus(_) => {
                    format!("ID: {} | {} | Length: {}", pipe.id, pipe.name, pipe.length)
                }
            })
            .collect();

        if lines.is_empty() {
            return writeln!(self.output, "No pipes found");
        }
        for line in lines {
            writeln!(self.output, "{}", line)?;
        }
        Ok(())
    }

    pub(crate) fn batch_edit_pipes(&mut self) -> io::Result<()> {
        let Some(filter) = self.read_pipe_filter("Search criteria:")? else {
            return Ok(());
        };

        let pipe_ids = self.engine.select_pipes(&filter);
        if pipe_ids.is_empty() {
            return writeln!(self.output, "No pipes found");
        }

        writeln!(self.output, "Found pipes: {}", pipe_ids.len())?;
        let in_repair = self.ask(
            "Change repair status to (0-working, 1-under repair): ",
            parse_flag,
        )?;

        let report = self.engine.apply_repair_status(&pipe_ids, in_repair);
        for (pipe_id, outcome) in &report.outcomes {
            match outcome {
                Ok(()) => writeln!(self.output, "Pipe {} updated", pipe_id)?,
                Err(RecordError::PipeNotFound { .. }) => writeln!(self.output, "Pipe not found")?,
                Err(error) => writeln!(self.output, "{}", error)?,
            }
        }
        writeln!(self.output, "Batch editing completed")
    }
}
