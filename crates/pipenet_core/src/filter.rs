use crate::{CompressorStation, Pipe};

/// Selection criteria shared by pipe search and batch editing.
#[derive(Debug, Clone, PartialEq)]
pub enum PipeFilter {
    /// Case-sensitive substring match on the name.
    NameContains(String),
    /// Exact match on the repair flag.
    RepairStatus(bool),
}

impl PipeFilter {
    pub fn matches(&self, pipe: &Pipe) -> bool {
        match self {
            PipeFilter::NameContains(needle) => pipe.name.contains(needle.as_str()),
            PipeFilter::RepairStatus(status) => pipe.in_repair == *status,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StationFilter {
    NameContains(String),
    /// Keeps stations whose unused percentage is at least this threshold.
    MinUnusedPercent(f64),
}

impl StationFilter {
    pub fn matches(&self, station: &CompressorStation) -> bool {
        match self {
            StationFilter::NameContains(needle) => station.name.contains(needle.as_str()),
            StationFilter::MinUnusedPercent(threshold) => station.unused_percent() >= *threshold,
        }
    }
}
