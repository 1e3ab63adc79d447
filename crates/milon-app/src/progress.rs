use std::collections::BTreeMap;
use std::sync::Mutex;

use milon_core::practice::ProgressionSink;
use milon_types::{DifficultyRating, EntryId};

/// Logs ratings and keeps per-difficulty counts for the session summary.
/// Scheduling of future reviews is not done here.
#[derive(Default)]
pub struct ProgressLog {
    tally: Mutex<BTreeMap<DifficultyRating, u32>>,
}

impl ProgressLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts for every difficulty, in scale order
    pub fn summary(&self) -> Vec<(DifficultyRating, u32)> {
        let tally = self.tally.lock().unwrap_or_else(|p| p.into_inner());
        DifficultyRating::ALL
            .iter()
            .map(|d| (*d, tally.get(d).copied().unwrap_or(0)))
            .collect()
    }

    pub fn reset(&self) {
        self.tally.lock().unwrap_or_else(|p| p.into_inner()).clear();
    }
}

impl ProgressionSink for ProgressLog {
    fn record(&self, entry_id: EntryId, difficulty: DifficultyRating) {
        tracing::info!(%entry_id, %difficulty, "rating recorded");
        *self
            .tally
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .entry(difficulty)
            .or_insert(0) += 1;
    }
}
