use crate::entry::{CardState, DifficultyRating, Direction, Entry, Gender, TranslationResult};

#[derive(Debug, Clone)]
pub enum AppEvent {
    UiEvent(UiEvent),
    /// A debounced lookup has started waiting on the remote source
    TranslationStarted { request: u64 },
    /// Result of a debounced lookup, tagged with the request it answers
    TranslationReply(TranslationReply),
    ShowForm(FormView),
    ShowEntries(Vec<Entry>),
    ShowCard(CardView),
    ShowSummary(Vec<(DifficultyRating, u32)>),
    Notice(Notice),
    BackendReady,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    NewEntry,
    /// Open the form for the entry at this position of the active list
    EditEntry(usize),
    SourceInput(String),
    TargetInput(String),
    SetGender(Option<Gender>),
    NotesInput(String),
    Submit,
    CancelForm,
    ListEntries,
    StartPractice,
    Reveal,
    Rate(DifficultyRating),
    Next,
    ToggleDirection,
    Speak,
    StopPractice,
    Quit,
}

#[derive(Debug, Clone)]
pub struct TranslationReply {
    pub request: u64,
    pub word: String,
    /// `Err` carries the user-facing failure message
    pub outcome: Result<TranslationResult, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Transient, dismissable message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    pub mode: FormMode,
    pub source: String,
    pub target: String,
    pub gender: Option<Gender>,
    pub notes: String,
    pub is_translating: bool,
    pub translate_error: Option<String>,
}

/// One side of a practice card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardFace {
    pub text: String,
    /// Present only on the native-script face of a gendered entry
    pub gender: Option<Gender>,
    /// Audio is offered for the native-script face only
    pub speakable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub position: usize,
    pub len: usize,
    pub round: u32,
    pub direction: Direction,
    pub state: CardState,
    pub front: CardFace,
    pub back: Option<CardFace>,
}
