use pipenet_core::{NetworkState, RecordError};

/// Result of applying one repair status to a set of pipes.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    /// One entry per requested ID, in the order the IDs were given.
    pub outcomes: Vec<(u32, Result<(), RecordError>)>,
}

impl BatchReport {
    pub fn updated(&self) -> impl Iterator<Item = u32> + '_ {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| outcome.is_ok())
            .map(|(pipe_id, _)| *pipe_id)
    }

    pub fn updated_count(&self) -> usize {
        self.updated().count()
    }
}

pub(crate) fn apply_repair_status(
    state: &mut NetworkState,
    pipe_ids: &[u32],
    in_repair: bool,
) -> BatchReport {
    tracing::info!("Setting repair status {} on {} pipes", in_repair, pipe_ids.len());
    let outcomes = pipe_ids
        .iter()
        .map(|&pipe_id| {
            let outcome = state.set_pipe_repair(pipe_id, in_repair).map(|_| ());
            (pipe_id, outcome)
        })
        .collect();
    BatchReport { outcomes }
}
