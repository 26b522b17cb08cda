use std::io::{self, BufRead, Write};

use pipenet_core::validation::{parse_percentage, parse_positive_int};
use pipenet_core::{CompressorStation, NewStation, RecordError, StationFilter};

use crate::Console;

pub(crate) fn format_unused(station: &CompressorStation) -> String {
    format!("{:.1}%", station.unused_percent())
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub(crate) fn add_station(&mut self) -> io::Result<()> {
        let name = self.ask_name("Station name: ")?;
        let total_workshops = self.ask("Total workshops: ", parse_positive_int)?;

        loop {
            let working_workshops = self.ask("Working workshops: ", parse_positive_int)?;
            match self.engine.add_station(NewStation {
                name: name.clone(),
                total_workshops,
                working_workshops,
            }) {
                Ok(station) => return writeln!(self.output, "Station added (ID: {})", station.id),
                Err(error @ RecordError::WorkingExceedsTotal { .. }) => {
                    writeln!(self.output, "{}", error)?;
                }
                Err(error) => return writeln!(self.output, "{}", error),
            }
        }
    }

    pub(crate) fn find_stations(&mut self) -> io::Result<()> {
        writeln!(self.output, "Search by:")?;
        writeln!(self.output, "1 - name")?;
        writeln!(self.output, "2 - unused workshops percentage")?;
        let filter = match self.ask("Choice: ", parse_positive_int)? {
            1 => StationFilter::NameContains(self.ask_name("Name: ")?),
            2 => StationFilter::MinUnusedPercent(
                self.ask("Minimum unused percentage: ", parse_percentage)?,
            ),
            _ => return writeln!(self.output, "Invalid choice"),
        };

        let lines: Vec<String> = self
            .engine
            .find_stations(&filter)
            .into_iter()
            .map(|station| {
                format!(
                    "ID: {} | {} | Unused: {}",
                    station.id,
                    station.name,
                    format_unused(station)
                )
            })
            .collect();

        if lines.is_empty() {
            return writeln!(self.output, "No stations found");
        }
        for line in lines {
            writeln!(self.output, "{}", line)?;
        }
        Ok(())
    }
}
