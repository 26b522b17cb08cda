//! Interactive console for pipe and compressor station records.
//!
//! The console reads commands from any [`BufRead`] and writes to any [`Write`], so
//! the whole menu can be driven from a script in tests.

pub mod config;
mod pipe;
mod prompt;
mod station;
mod storage;

use std::io::{self, BufRead, Write};

use pipenet_core::validation::parse_positive_int;
use pipenet_engine::Engine;

use crate::pipe::format_pipe;
use crate::station::format_unused;

/// Entries of the main menu, numbered as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    AddPipe = 1,
    AddStation = 2,
    ViewAll = 3,
    FindPipes = 4,
    FindStations = 5,
    BatchEditPipes = 6,
    Save = 7,
    Load = 8,
    Exit = 9,
}

impl Command {
    pub const ALL: [Command; 9] = [
        Command::AddPipe,
        Command::AddStation,
        Command::ViewAll,
        Command::FindPipes,
        Command::FindStations,
        Command::BatchEditPipes,
        Command::Save,
        Command::Load,
        Command::Exit,
    ];

    pub fn from_choice(choice: u32) -> Option<Command> {
        Self::ALL
            .into_iter()
            .find(|command| *command as u32 == choice)
    }

    pub fn label(self) -> &'static str {
        match self {
            Command::AddPipe => "Add pipe",
            Command::AddStation => "Add station",
            Command::ViewAll => "View all",
            Command::FindPipes => "Find pipes",
            Command::FindStations => "Find stations",
            Command::BatchEditPipes => "Batch edit pipes",
            Command::Save => "Save",
            Command::Load => "Load",
            Command::Exit => "Exit",
        }
    }
}

pub struct Console<R, W> {
    engine: Engine,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(engine: Engine, input: R, output: W) -> Self {
        Console {
            engine,
            input,
            output,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn into_parts(self) -> (Engine, W) {
        (self.engine, self.output)
    }

    /// Run the menu until the user picks Exit or the input stream ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            match self.step() {
                Ok(Some(Command::Exit)) => return Ok(()),
                Ok(_) => {}
                Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => {
                    tracing::info!("Input closed, ending session");
                    return self.output.flush();
                }
                Err(error) => return Err(error),
            }
        }
    }

    /// Show the menu, read one choice and execute it.
    fn step(&mut self) -> io::Result<Option<Command>> {
        self.show_menu()?;
        let choice = self.ask("Choice: ", parse_positive_int)?;
        let Some(command) = Command::from_choice(choice) else {
            writeln!(self.output, "Invalid choice")?;
            return Ok(None);
        };

        tracing::debug!("Dispatching {:?}", command);
        match command {
            Command::AddPipe => self.add_pipe()?,
            Command::AddStation => self.add_station()?,
            Command::ViewAll => self.view_all()?,
            Command::FindPipes => self.find_pipes()?,
            Command::FindStations => self.find_stations()?,
            Command::BatchEditPipes => self.batch_edit_pipes()?,
            Command::Save => self.save()?,
            Command::Load => self.load()?,
            Command::Exit => writeln!(self.output, "Exit")?,
        }
        Ok(Some(command))
    }

    fn show_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n=== MANAGEMENT SYSTEM ===")?;
        for command in Command::ALL {
            writeln!(self.output, "{}. {}", command as u32, command.label())?;
        }
        Ok(())
    }

    fn view_all(&mut self) -> io::Result<()> {
        let state = self.engine.state();

        writeln!(self.output, "\n=== PIPES ===")?;
        if state.pipes().is_empty() {
            writeln!(self.output, "No pipes")?;
        }
        for pipe in state.pipes() {
            writeln!(self.output, "{}", format_pipe(pipe))?;
        }

        writeln!(self.output, "\n=== COMPRESSOR STATIONS ===")?;
        if state.stations().is_empty() {
            writeln!(self.output, "No stations")?;
        }
        for station in state.stations() {
            writeln!(
                self.output,
                "ID: {} | {} | Workshops: {}/{} | Unused: {}",
                station.id,
                station.name,
                station.working_workshops,
                station.total_workshops,
                format_unused(station)
            )?;
        }
        Ok(())
    }
}
