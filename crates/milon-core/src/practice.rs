//! Flashcard practice over one list.
//!
//! Every card goes `Unrevealed -> Revealed -> Answered`; `advance` starts the
//! next card back at `Unrevealed`. Direction is a session property and is not
//! touched by per-card transitions.

use std::sync::Arc;

use milon_types::{CardFace, CardState, CardView, DifficultyRating, Direction, Entry, EntryId};

use crate::error::PracticeError;

/// Receives one rating per answered card
pub trait ProgressionSink: Send + Sync {
    fn record(&self, entry_id: EntryId, difficulty: DifficultyRating);
}

pub struct PracticeSession {
    entries: Vec<Entry>,
    position: usize,
    round: u32,
    direction: Direction,
    state: CardState,
    progression: Arc<dyn ProgressionSink>,
}

impl PracticeSession {
    pub fn new(
        entries: Vec<Entry>,
        direction: Direction,
        progression: Arc<dyn ProgressionSink>,
    ) -> Result<Self, PracticeError> {
        if entries.is_empty() {
            return Err(PracticeError::EmptyDeck);
        }

        Ok(Self {
            entries,
            position: 0,
            round: 1,
            direction,
            state: CardState::Unrevealed,
            progression,
        })
    }

    pub fn current(&self) -> &Entry {
        &self.entries[self.position]
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// Flip the card. Returns `false` when it was already flipped, in which
    /// case callers must not repeat reveal side effects such as audio.
    pub fn reveal(&mut self) -> bool {
        if self.state != CardState::Unrevealed {
            tracing::trace!(state = %self.state, "reveal ignored");
            return false;
        }

        self.state = CardState::Revealed;
        true
    }

    pub fn rate(&mut self, difficulty: DifficultyRating) -> Result<(), PracticeError> {
        if self.state != CardState::Revealed {
            return Err(PracticeError::InvalidTransition {
                action: "rate",
                state: self.state,
            });
        }

        let entry_id = self.current().id;
        self.state = CardState::Answered;
        self.progression.record(entry_id, difficulty);
        tracing::debug!(%entry_id, %difficulty, "card rated");

        Ok(())
    }

    /// Move to the next card, wrapping to a new round after the last one
    pub fn advance(&mut self) -> Result<&Entry, PracticeError> {
        if self.state != CardState::Answered {
            return Err(PracticeError::InvalidTransition {
                action: "advance",
                state: self.state,
            });
        }

        self.position += 1;
        if self.position == self.entries.len() {
            self.position = 0;
            self.round += 1;
            tracing::info!(round = self.round, "starting new practice round");
        }
        self.state = CardState::Unrevealed;

        Ok(self.current())
    }

    pub fn toggle_direction(&mut self) -> Direction {
        self.direction = self.direction.flipped();
        self.direction
    }

    /// Show the current card fresh, e.g. after a direction change
    pub fn reset_card(&mut self) {
        self.state = CardState::Unrevealed;
    }

    pub fn front(&self) -> CardFace {
        match self.direction {
            Direction::SourceToTarget => self.native_face(),
            Direction::TargetToSource => self.gloss_face(),
        }
    }

    /// Only available once the card has been flipped
    pub fn back(&self) -> Option<CardFace> {
        if self.state == CardState::Unrevealed {
            return None;
        }

        Some(match self.direction {
            Direction::SourceToTarget => self.gloss_face(),
            Direction::TargetToSource => self.native_face(),
        })
    }

    /// Native-script word, offered for playback only while its face is shown
    pub fn speakable_text(&self) -> Option<&str> {
        let shown = self.front().speakable || self.back().is_some_and(|face| face.speakable);
        shown.then(|| self.current().source_text.as_str())
    }

    pub fn view(&self) -> CardView {
        CardView {
            position: self.position,
            len: self.entries.len(),
            round: self.round,
            direction: self.direction,
            state: self.state,
            front: self.front(),
            back: self.back(),
        }
    }

    fn native_face(&self) -> CardFace {
        let entry = self.current();
        CardFace {
            text: entry.source_text.clone(),
            gender: entry.gender,
            speakable: true,
        }
    }

    fn gloss_face(&self) -> CardFace {
        CardFace {
            text: self.current().target_text.clone(),
            gender: None,
            speakable: false,
        }
    }
}
