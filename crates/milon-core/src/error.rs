use milon_types::{CardState, EntryId, ListId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PracticeError {
    #[error("cannot {action} a card that is {state}")]
    InvalidTransition {
        action: &'static str,
        state: CardState,
    },

    #[error("No words available for practice")]
    EmptyDeck,
}

/// Local submission failures, the message is what the user sees
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Both Hebrew word and English translation are required")]
    MissingSource,

    #[error("Both Hebrew word and English translation are required")]
    MissingTarget,

    #[error("No vocabulary list is selected")]
    NoActiveList,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("List not found: {0}")]
    ListNotFound(ListId),

    #[error("Entry not found: {0}")]
    EntryNotFound(EntryId),
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("Speech backend failed: {0}")]
    Backend(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
