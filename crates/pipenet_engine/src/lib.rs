//! Operations behind each console command, on top of the record store.

mod batch;

pub use crate::batch::BatchReport;

use std::path::Path;

use pipenet_core::persistence;
use pipenet_core::{
    CompressorStation, NetworkState, NewPipe, NewStation, PersistenceError, Pipe, PipeFilter,
    RecordError, StationFilter,
};

pub struct Engine {
    state: NetworkState,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::with_state(NetworkState::new())
    }

    pub fn with_state(state: NetworkState) -> Self {
        Engine { state }
    }

    pub fn state(&self) -> &NetworkState {
        &self.state
    }

    pub fn add_pipe(&mut self, new_pipe: NewPipe) -> Result<Pipe, RecordError> {
        self.state.add_pipe(new_pipe)
    }

    pub fn add_station(
        &mut self,
        new_station: NewStation,
    ) -> Result<CompressorStation, RecordError> {
        self.state.add_station(new_station)
    }

    pub fn set_pipe_repair(&mut self, pipe_id: u32, in_repair: bool) -> Result<(), RecordError> {
        self.state.set_pipe_repair(pipe_id, in_repair).map(|_| ())
    }

    pub fn find_pipes(&self, filter: &PipeFilter) -> Vec<&Pipe> {
        self.state.find_pipes(filter)
    }

    pub fn find_stations(&self, filter: &StationFilter) -> Vec<&CompressorStation> {
        self.state.find_stations(filter)
    }

    /// First half of a batch edit: the IDs a later [`Engine::apply_repair_status`]
    /// will touch. Uses the same filters as pipe search.
    pub fn select_pipes(&self, filter: &PipeFilter) -> Vec<u32> {
        self.state.pipe_ids(filter)
    }

    /// Second half of a batch edit: set `in_repair` on every listed pipe, in order.
    pub fn apply_repair_status(&mut self, pipe_ids: &[u32], in_repair: bool) -> BatchReport {
        batch::apply_repair_status(&mut self.state, pipe_ids, in_repair)
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        persistence::save_to_file(&self.state, path)
    }

    /// Replace the current records with the contents of `path`.
    ///
    /// The file is read and parsed in full before anything is replaced, so on error
    /// the current records stay exactly as they were.
    pub fn load(&mut self, path: &Path) -> Result<(), PersistenceError> {
        let snapshot = persistence::load_from_file(path)?;
        self.state.replace_all(snapshot);
        Ok(())
    }
}
