//! Plain-text save files.
//!
//! ```text
//! PIPES <count>
//! <id> <name> <length> <diameter> <in_repair 0|1>
//! STATIONS <count>
//! <id> <name> <total_workshops> <working_workshops>
//! ```
//!
//! The reader works on whitespace-separated tokens, not lines. Names are written
//! verbatim, so a name containing spaces is read back as its first word and the
//! remaining words shift into the following fields. Files are trusted: loaded
//! stations are not checked against the creation-time invariants.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::{CompressorStation, NetworkState, Pipe};

const PIPES_TAG: &str = "PIPES";
const STATIONS_TAG: &str = "STATIONS";

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("expected section {expected}, found '{found}'")]
    UnexpectedSection {
        expected: &'static str,
        found: String,
    },
    #[error("unexpected end of file while reading {field}")]
    UnexpectedEof { field: &'static str },
    #[error("invalid {field} '{token}'")]
    InvalidValue { field: &'static str, token: String },
}

/// Records read from a save file, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub pipes: Vec<Pipe>,
    pub stations: Vec<CompressorStation>,
}

/// Render both collections in the save file format.
pub fn render(state: &NetworkState) -> String {
    let mut out = format!("{} {}\n", PIPES_TAG, state.pipes().len());
    for pipe in state.pipes() {
        out.push_str(&format!(
            "{} {} {} {} {}\n",
            pipe.id,
            pipe.name,
            pipe.length,
            pipe.diameter,
            u8::from(pipe.in_repair)
        ));
    }
    out.push_str(&format!("{} {}\n", STATIONS_TAG, state.stations().len()));
    for station in state.stations() {
        out.push_str(&format!(
            "{} {} {} {}\n",
            station.id, station.name, station.total_workshops, station.working_workshops
        ));
    }
    out
}

/// Parse a save file. Tokens after the last station record are ignored.
pub fn parse(text: &str) -> Result<Snapshot, PersistenceError> {
    let mut tokens = Tokens(text.split_whitespace());

    let pipe_count: usize = tokens.section(PIPES_TAG)?;
    let mut pipes = Vec::new();
    for _ in 0..pipe_count {
        pipes.push(Pipe {
            id: tokens.value("pipe id")?,
            name: tokens.next("pipe name")?.to_string(),
            length: tokens.value("pipe length")?,
            diameter: tokens.value("pipe diameter")?,
            in_repair: tokens.flag("pipe repair status")?,
        });
    }

    let station_count: usize = tokens.section(STATIONS_TAG)?;
    let mut stations = Vec::new();
    for _ in 0..station_count {
        stations.push(CompressorStation {
            id: tokens.value("station id")?,
            name: tokens.next("station name")?.to_string(),
            total_workshops: tokens.value("total workshops")?,
            working_workshops: tokens.value("working workshops")?,
        });
    }

    Ok(Snapshot { pipes, stations })
}

/// Write the state to `path`.
///
/// The document goes to a temporary file in the same directory and is renamed over
/// `path` once fully written, so a failed save never leaves a truncated file behind.
pub fn save_to_file(state: &NetworkState, path: &Path) -> Result<(), PersistenceError> {
    let data = render(state);
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let result = (|| -> std::io::Result<()> {
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(data.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(path).map_err(|error| error.error)?;
        Ok(())
    })();

    if let Err(error) = result {
        tracing::warn!("Failed to save {}: {}", path.display(), error);
        return Err(error.into());
    }

    tracing::info!(
        "Saved {} pipes and {} stations to {}",
        state.pipes().len(),
        state.stations().len(),
        path.display()
    );
    Ok(())
}

/// Read and parse the file at `path` without touching any in-memory state.
pub fn load_from_file(path: &Path) -> Result<Snapshot, PersistenceError> {
    let text = fs::read_to_string(path).inspect_err(|error| {
        tracing::warn!("Failed to read {}: {}", path.display(), error);
    })?;
    parse(&text).inspect_err(|error| {
        tracing::warn!("Failed to parse {}: {}", path.display(), error);
    })
}

struct Tokens<'a>(std::str::SplitWhitespace<'a>);

impl<'a> Tokens<'a> {
    fn next(&mut self, field: &'static str) -> Result<&'a str, PersistenceError> {
        self.0.next().ok_or(PersistenceError::UnexpectedEof { field })
    }

    fn value<T: std::str::FromStr>(&mut self, field: &'static str) -> Result<T, PersistenceError> {
        let token = self.next(field)?;
        token.parse().map_err(|_| PersistenceError::InvalidValue {
            field,
            token: token.to_string(),
        })
    }

    fn flag(&mut self, field: &'static str) -> Result<bool, PersistenceError> {
        match self.next(field)? {
            "0" => Ok(false),
            "1" => Ok(true),
            token => Err(PersistenceError::InvalidValue {
                field,
                token: token.to_string(),
            }),
        }
    }

    fn section(&mut self, tag: &'static str) -> Result<usize, PersistenceError> {
        let found = self.next("section header")?;
        if found != tag {
            return Err(PersistenceError::UnexpectedSection {
                expected: tag,
                found: found.to_string(),
            });
        }
        self.value("record count")
    }
}
