use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(pub Uuid);

impl ListId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ListId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Grammatical gender of a noun-like entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Gender {
    Masculine,
    Feminine,
}

impl Gender {
    /// Short tag shown next to the native-script word
    pub fn tag(&self) -> &'static str {
        match self {
            Gender::Masculine => "m",
            Gender::Feminine => "f",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One vocabulary pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: EntryId,
    pub source_text: String,
    pub target_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Entry {
    pub fn new(fields: EntryFields) -> Self {
        Self::with_id(EntryId::new(), fields)
    }

    pub fn with_id(id: EntryId, fields: EntryFields) -> Self {
        Self {
            id,
            source_text: fields.source_text,
            target_text: fields.target_text,
            gender: fields.gender,
            notes: fields.notes,
        }
    }

    pub fn apply(&mut self, fields: EntryFields) {
        self.source_text = fields.source_text;
        self.target_text = fields.target_text;
        self.gender = fields.gender;
        self.notes = fields.notes;
    }
}

/// Field values submitted by the edit flow, already trimmed
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryFields {
    pub source_text: String,
    pub target_text: String,
    pub gender: Option<Gender>,
    pub notes: Option<String>,
}

/// Best-effort guess produced by the inference engine, never persisted
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranslationResult {
    pub gloss: Option<String>,
    pub gender: Option<Gender>,
}

impl TranslationResult {
    pub fn is_empty(&self) -> bool {
        self.gloss.is_none() && self.gender.is_none()
    }
}

/// Which side of an entry is asked first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    #[default]
    SourceToTarget,
    TargetToSource,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::SourceToTarget => Direction::TargetToSource,
            Direction::TargetToSource => Direction::SourceToTarget,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Direction::SourceToTarget => "HE → EN",
            Direction::TargetToSource => "EN → HE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardState {
    #[default]
    Unrevealed,
    Revealed,
    Answered,
}

impl fmt::Display for CardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CardState::Unrevealed => "unrevealed",
            CardState::Revealed => "revealed",
            CardState::Answered => "answered",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DifficultyRating {
    Again,
    Hard,
    Good,
    Easy,
}

impl DifficultyRating {
    pub const ALL: [DifficultyRating; 4] = [
        DifficultyRating::Again,
        DifficultyRating::Hard,
        DifficultyRating::Good,
        DifficultyRating::Easy,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "again" | "1" => Some(Self::Again),
            "hard" | "2" => Some(Self::Hard),
            "good" | "3" => Some(Self::Good),
            "easy" | "4" => Some(Self::Easy),
            _ => None,
        }
    }
}

impl fmt::Display for DifficultyRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DifficultyRating::Again => "again",
            DifficultyRating::Hard => "hard",
            DifficultyRating::Good => "good",
            DifficultyRating::Easy => "easy",
        })
    }
}
