//! Record store for pipes and compressor stations.
//!
//! Everything here is free of console I/O: values come in already parsed, results
//! and [`RecordError`]s go back out.

mod filter;
mod models;
pub mod persistence;
pub mod validation;

pub use crate::filter::{PipeFilter, StationFilter};
pub use crate::models::*;
pub use crate::persistence::{PersistenceError, Snapshot};
pub use crate::validation::ValidationError;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("Pipe {pipe_id} not found")]
    PipeNotFound { pipe_id: u32 },
    #[error("{field} must be a positive number")]
    NotPositive { field: &'static str },
    #[error("Error! Working workshops cannot exceed total workshops")]
    WorkingExceedsTotal { working: u32, total: u32 },
    #[error("No free {kind} IDs left")]
    IdsExhausted { kind: &'static str },
}

/// Take the next ID from `counter`. The counter is wider than the ID so that it can
/// sit one past `u32::MAX` once every ID has been handed out.
fn allocate_id(counter: &mut u64, kind: &'static str) -> Result<u32, RecordError> {
    let id = u32::try_from(*counter).map_err(|_| RecordError::IdsExhausted { kind })?;
    *counter += 1;
    Ok(id)
}

/// Both record collections plus the counters used to hand out IDs.
///
/// Collections keep insertion order; listing and searching follow it.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkState {
    pipes: Vec<Pipe>,
    stations: Vec<CompressorStation>,
    next_pipe_id: u64,
    next_station_id: u64,
}

impl Default for NetworkState {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkState {
    pub fn new() -> Self {
        NetworkState {
            pipes: Vec::new(),
            stations: Vec::new(),
            next_pipe_id: 1,
            next_station_id: 1,
        }
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    pub fn stations(&self) -> &[CompressorStation] {
        &self.stations
    }

    pub fn next_pipe_id(&self) -> u64 {
        self.next_pipe_id
    }

    pub fn next_station_id(&self) -> u64 {
        self.next_station_id
    }

    pub fn pipe(&self, pipe_id: u32) -> Option<&Pipe> {
        self.pipes.iter().find(|pipe| pipe.id == pipe_id)
    }

    pub fn add_pipe(&mut self, new_pipe: NewPipe) -> Result<Pipe, RecordError> {
        if !(new_pipe.length.is_finite() && new_pipe.length > 0.0) {
            return Err(RecordError::NotPositive { field: "length" });
        }
        if new_pipe.diameter == 0 {
            return Err(RecordError::NotPositive { field: "diameter" });
        }

        let pipe = Pipe {
            id: allocate_id(&mut self.next_pipe_id, "pipe")?,
            name: new_pipe.name,
            length: new_pipe.length,
            diameter: new_pipe.diameter,
            in_repair: new_pipe.in_repair,
        };
        tracing::info!("Added pipe {} ({})", pipe.id, pipe.name);
        self.pipes.push(pipe.clone());
        Ok(pipe)
    }

    pub fn add_station(&mut self, new_station: NewStation) -> Result<CompressorStation, RecordError> {
        let NewStation {
            name,
            total_workshops: total,
            working_workshops: working,
        } = new_station;
        if total == 0 {
            return Err(RecordError::NotPositive {
                field: "total workshops",
            });
        }
        if working == 0 {
            return Err(RecordError::NotPositive {
                field: "working workshops",
            });
        }
        if working > total {
            return Err(RecordError::WorkingExceedsTotal { working, total });
        }

        let station = CompressorStation {
            id: allocate_id(&mut self.next_station_id, "station")?,
            name,
            total_workshops: total,
            working_workshops: working,
        };
        tracing::info!("Added station {} ({})", station.id, station.name);
        self.stations.push(station.clone());
        Ok(station)
    }

    /// Overwrite the repair flag of the pipe with the given ID.
    pub fn set_pipe_repair(&mut self, pipe_id: u32, in_repair: bool) -> Result<&Pipe, RecordError> {
        let Some(pipe) = self.pipes.iter_mut().find(|pipe| pipe.id == pipe_id) else {
            tracing::warn!("Pipe {} not found", pipe_id);
            return Err(RecordError::PipeNotFound { pipe_id });
        };
        pipe.in_repair = in_repair;
        tracing::info!("Pipe {} repair status set to {}", pipe_id, in_repair);
        Ok(pipe)
    }

    pub fn find_pipes(&self, filter: &PipeFilter) -> Vec<&Pipe> {
        tracing::debug!("Searching pipes with {:?}", filter);
        self.pipes.iter().filter(|pipe| filter.matches(pipe)).collect()
    }

    /// IDs of the pipes matching `filter`, in insertion order.
    pub fn pipe_ids(&self, filter: &PipeFilter) -> Vec<u32> {
        self.find_pipes(filter).iter().map(|pipe| pipe.id).collect()
    }

    pub fn find_stations(&self, filter: &StationFilter) -> Vec<&CompressorStation> {
        tracing::debug!("Searching stations with {:?}", filter);
        self.stations
            .iter()
            .filter(|station| filter.matches(station))
            .collect()
    }

    /// Copy both collections out for saving.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pipes: self.pipes.clone(),
            stations: self.stations.clone(),
        }
    }

    /// Replace both collections with the loaded records.
    ///
    /// Counters only move forward: each becomes `max(counter, loaded id + 1)`, so IDs
    /// handed out before the load are never reused. Loaded records are trusted as-is.
    pub fn replace_all(&mut self, snapshot: Snapshot) {
        self.pipes.clear();
        self.stations.clear();

        for pipe in snapshot.pipes {
            self.next_pipe_id = self.next_pipe_id.max(u64::from(pipe.id) + 1);
            self.pipes.push(pipe);
        }
        for station in snapshot.stations {
            self.next_station_id = self.next_station_id.max(u64::from(station.id) + 1);
            self.stations.push(station);
        }
        tracing::info!(
            "Loaded {} pipes and {} stations",
            self.pipes.len(),
            self.stations.len()
        );
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn new_pipe(name: &str, in_repair: bool) -> NewPipe {
        NewPipe {
            name: name.into(),
            length: 12.5,
            diameter: 700,
            in_repair,
        }
    }

    fn new_station(name: &str, total: u32, working: u32) -> NewStation {
        NewStation {
            name: name.into(),
            total_workshops: total,
            working_workshops: working,
        }
    }

    fn batch_state() -> NetworkState {
        let mut state = NetworkState::new();
        state.add_pipe(new_pipe("Main", false)).unwrap();
        state.add_pipe(new_pipe("Main-2", false)).unwrap();
        state.add_pipe(new_pipe("Other", true)).unwrap();
        state
    }

    #[test]
    fn test_pipe_ids_are_sequential_from_one() {
        let mut state = NetworkState::new();
        let ids: Vec<u32> = (0..5)
            .map(|i| state.add_pipe(new_pipe(&format!("P{i}"), false)).unwrap().id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(state.next_pipe_id(), 6);
    }

    #[test]
    fn test_station_ids_are_independent_of_pipe_ids() {
        let mut state = NetworkState::new();
        state.add_pipe(new_pipe("A", false)).unwrap();
        state.add_pipe(new_pipe("B", false)).unwrap();
        let station = state.add_station(new_station("KS-1", 5, 3)).unwrap();
        assert_eq!(station.id, 1);
        assert_eq!(state.next_station_id(), 2);
    }

    #[test]
    fn test_add_pipe_rejects_non_positive_fields() {
        let mut state = NetworkState::new();
        let mut pipe = new_pipe("A", false);
        pipe.length = 0.0;
        assert_eq!(
            state.add_pipe(pipe),
            Err(RecordError::NotPositive { field: "length" })
        );

        let mut pipe = new_pipe("A", false);
        pipe.diameter = 0;
        assert_eq!(
            state.add_pipe(pipe),
            Err(RecordError::NotPositive { field: "diameter" })
        );

        // Rejected records do not consume an ID
        assert!(state.pipes().is_empty());
        assert_eq!(state.next_pipe_id(), 1);
    }

    #[test]
    fn test_add_station_enforces_working_not_above_total() {
        let mut state = NetworkState::new();
        let result = state.add_station(new_station("KS-1", 3, 4));
        assert_eq!(
            result,
            Err(RecordError::WorkingExceedsTotal {
                working: 4,
                total: 3
            })
        );
        assert!(state.stations().is_empty());

        let station = state.add_station(new_station("KS-1", 3, 3)).unwrap();
        assert!(station.working_workshops <= station.total_workshops);
        assert_eq!(state.stations().len(), 1);
    }

    #[test]
    fn test_add_station_rejects_zero_workshops() {
        let mut state = NetworkState::new();
        assert!(matches!(
            state.add_station(new_station("KS-1", 0, 0)),
            Err(RecordError::NotPositive { .. })
        ));
        assert!(matches!(
            state.add_station(new_station("KS-1", 2, 0)),
            Err(RecordError::NotPositive { .. })
        ));
    }

    #[test]
    fn test_set_pipe_repair() {
        let mut state = batch_state();
        let pipe = state.set_pipe_repair(2, true).unwrap();
        assert_eq!(pipe.id, 2);
        assert!(pipe.in_repair);
        assert!(state.pipe(2).unwrap().in_repair);
        assert!(!state.pipe(1).unwrap().in_repair);
    }

    #[test]
    fn test_set_pipe_repair_not_found() {
        let mut state = batch_state();
        let before = state.clone();

        match state.set_pipe_repair(42, true) {
            Err(RecordError::PipeNotFound { pipe_id }) => assert_eq!(pipe_id, 42),
            other => panic!("Expected PipeNotFound error, got {other:?}"),
        }
        assert_eq!(state, before);
    }

    #[test]
    fn test_find_pipes_keeps_insertion_order() {
        let state = batch_state();
        let ids = state.pipe_ids(&PipeFilter::NameContains("Main".into()));
        assert_eq!(ids, vec![1, 2]);

        let in_repair = state.find_pipes(&PipeFilter::RepairStatus(true));
        assert_eq!(in_repair.len(), 1);
        assert_eq!(in_repair[0].name, "Other");

        assert!(
            state
                .find_pipes(&PipeFilter::NameContains("Zzz".into()))
                .is_empty()
        );
    }

    #[test]
    fn test_find_stations_by_unused_percent() {
        let mut state = NetworkState::new();
        state.add_station(new_station("KS-1", 4, 1)).unwrap();
        state.add_station(new_station("KS-2", 4, 4)).unwrap();

        let found = state.find_stations(&StationFilter::MinUnusedPercent(75.0));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);

        assert!(
            state
                .find_stations(&StationFilter::MinUnusedPercent(76.0))
                .is_empty()
        );
        assert_eq!(
            state
                .find_stations(&StationFilter::NameContains("KS".into()))
                .len(),
            2
        );
    }

    #[test]
    fn test_replace_all_advances_counters() {
        let mut state = NetworkState::new();
        state.replace_all(Snapshot {
            pipes: vec![Pipe {
                id: 7,
                name: "Loaded".into(),
                length: 1.0,
                diameter: 10,
                in_repair: false,
            }],
            stations: vec![CompressorStation {
                id: 3,
                name: "KS".into(),
                total_workshops: 2,
                working_workshops: 5,
            }],
        });

        assert_eq!(state.next_pipe_id(), 8);
        assert_eq!(state.next_station_id(), 4);
        // Loaded records are not re-validated
        assert_eq!(state.stations()[0].working_workshops, 5);

        let pipe = state.add_pipe(new_pipe("Fresh", false)).unwrap();
        assert_eq!(pipe.id, 8);
    }

    #[test]
    fn test_replace_all_never_lowers_counters() {
        let mut state = batch_state();
        assert_eq!(state.next_pipe_id(), 4);

        state.replace_all(Snapshot {
            pipes: vec![Pipe {
                id: 1,
                name: "Only".into(),
                length: 1.0,
                diameter: 10,
                in_repair: false,
            }],
            stations: Vec::new(),
        });

        assert_eq!(state.pipes().len(), 1);
        assert_eq!(state.next_pipe_id(), 4);
    }

    #[test]
    fn test_ids_are_not_reused_after_loading_the_last_id() {
        let mut state = NetworkState::new();
        state.replace_all(Snapshot {
            pipes: vec![Pipe {
                id: u32::MAX,
                name: "Last".into(),
                length: 1.0,
                diameter: 10,
                in_repair: false,
            }],
            stations: vec![CompressorStation {
                id: u32::MAX,
                name: "KS-Last".into(),
                total_workshops: 1,
                working_workshops: 1,
            }],
        });

        assert_eq!(
            state.add_pipe(new_pipe("Fresh", false)),
            Err(RecordError::IdsExhausted { kind: "pipe" })
        );
        assert_eq!(
            state.add_pipe(new_pipe("Again", false)),
            Err(RecordError::IdsExhausted { kind: "pipe" })
        );
        assert_eq!(
            state.add_station(new_station("KS-New", 2, 1)),
            Err(RecordError::IdsExhausted { kind: "station" })
        );

        let ids: Vec<u32> = state.pipes().iter().map(|pipe| pipe.id).collect();
        assert_eq!(ids, vec![u32::MAX]);
        assert_eq!(state.stations().len(), 1);
    }

    #[test]
    fn test_last_id_can_still_be_assigned() {
        let mut state = NetworkState::new();
        state.replace_all(Snapshot {
            pipes: vec![Pipe {
                id: u32::MAX - 1,
                name: "Almost".into(),
                length: 1.0,
                diameter: 10,
                in_repair: false,
            }],
            stations: Vec::new(),
        });

        assert_eq!(state.add_pipe(new_pipe("Last", false)).unwrap().id, u32::MAX);
        assert!(state.add_pipe(new_pipe("Over", false)).is_err());
    }

    #[test]
    fn test_replace_all_is_idempotent() {
        let snapshot = batch_state().snapshot();
        let mut state = NetworkState::new();

        state.replace_all(snapshot.clone());
        let first = state.clone();
        state.replace_all(snapshot);
        assert_eq!(state, first);
    }
}
