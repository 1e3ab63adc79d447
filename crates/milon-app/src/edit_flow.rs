//! Add/edit form for one entry, with auto-fill of the gloss and gender while a
//! new Hebrew word is being typed.
//!
//! Keystrokes on the source field are debounced; the lookup itself runs in a
//! spawned task that reports back through the app's inbound channel. Every
//! source change takes a new request number and replies for any other number
//! are dropped, so a slow response can never overwrite newer input.

use std::time::Duration;

use kanal::AsyncSender;
use milon_core::debounce::InputDebouncer;
use milon_core::error::{StoreError, ValidationError};
use milon_core::store::EntryStore;
use milon_translator::Lookup;
use milon_types::{
    AppEvent, Entry, EntryFields, EntryId, FormMode, FormView, Gender, ListId, TranslationReply,
};
use unicode_normalization::UnicodeNormalization;

const SOURCE_FIELD: &str = "source";

/// Word as sent to the dictionary: NFC, no line breaks, trimmed. Composed
/// form keeps niqqud in a stable order.
pub fn lookup_word(text: &str) -> String {
    text.nfc()
        .filter(|c| !matches!(c, '\n' | '\r'))
        .collect::<String>()
        .trim()
        .to_string()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryForm {
    pub source: String,
    pub target: String,
    pub gender: Option<Gender>,
    pub notes: String,
    /// Set when the form was opened for an existing entry
    pub editing: Option<EntryId>,
    pub is_translating: bool,
    pub translate_error: Option<String>,
}

impl EntryForm {
    pub fn for_entry(entry: &Entry) -> Self {
        Self {
            source: entry.source_text.clone(),
            target: entry.target_text.clone(),
            gender: entry.gender,
            notes: entry.notes.clone().unwrap_or_default(),
            editing: Some(entry.id),
            ..Self::default()
        }
    }

    /// Trimmed field values, or the reason they cannot be submitted
    pub fn fields(&self) -> Result<EntryFields, ValidationError> {
        let source_text = self.source.trim();
        if source_text.is_empty() {
            return Err(ValidationError::MissingSource);
        }
        let target_text = self.target.trim();
        if target_text.is_empty() {
            return Err(ValidationError::MissingTarget);
        }
        let notes = self.notes.trim();

        Ok(EntryFields {
            source_text: source_text.to_string(),
            target_text: target_text.to_string(),
            gender: self.gender,
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        })
    }

    pub fn view(&self) -> FormView {
        FormView {
            mode: if self.editing.is_some() {
                FormMode::Edit
            } else {
                FormMode::Create
            },
            source: self.source.clone(),
            target: self.target.clone(),
            gender: self.gender,
            notes: self.notes.clone(),
            is_translating: self.is_translating,
            translate_error: self.translate_error.clone(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Submitted {
    Added(Entry),
    Updated(Entry),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReplyOutcome {
    Applied,
    /// Message for a transient error notice
    Failed(String),
    Stale,
}

pub struct EntryEditFlow {
    form: EntryForm,
    open: bool,
    debouncer: InputDebouncer<&'static str>,
    lookup: Option<Lookup>,
    replies: AsyncSender<AppEvent>,
    settle: Duration,
    min_chars: usize,
    next_request: u64,
    awaiting: Option<u64>,
}

impl EntryEditFlow {
    pub fn new(
        lookup: Option<Lookup>,
        replies: AsyncSender<AppEvent>,
        settle: Duration,
        min_chars: usize,
    ) -> Self {
        Self {
            form: EntryForm::default(),
            open: false,
            debouncer: InputDebouncer::new(),
            lookup,
            replies,
            settle,
            min_chars,
            next_request: 0,
            awaiting: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn form(&self) -> &EntryForm {
        &self.form
    }

    pub fn view(&self) -> FormView {
        self.form.view()
    }

    pub fn open_new(&mut self) {
        self.reset();
        self.open = true;
    }

    /// Pre-populated form, auto-fill stays off for its whole lifetime
    pub fn open_edit(&mut self, entry: &Entry) {
        self.reset();
        self.form = EntryForm::for_entry(entry);
        self.open = true;
    }

    /// Teardown: pending and in-flight lookups are dropped
    pub fn close(&mut self) {
        self.reset();
        self.open = false;
    }

    /// Keystroke on the source field
    pub fn set_source(&mut self, text: impl Into<String>) {
        self.form.source = text.into();

        // Any change supersedes whatever is pending or in flight
        self.next_request += 1;
        self.awaiting = None;
        self.form.is_translating = false;
        self.debouncer.cancel(&SOURCE_FIELD);

        if self.form.editing.is_some() {
            return;
        }

        let word = lookup_word(&self.form.source);
        if word.chars().count() < self.min_chars {
            tracing::trace!("input too short for lookup");
            return;
        }

        let Some(lookup) = self.lookup.clone() else {
            return;
        };

        let request = self.next_request;
        self.awaiting = Some(request);

        let replies = self.replies.clone();
        self.debouncer.schedule(SOURCE_FIELD, self.settle, move || async move {
            if replies
                .send(AppEvent::TranslationStarted { request })
                .await
                .is_err()
            {
                return;
            }

            let outcome = lookup
                .translate(&word)
                .await
                .map_err(|e| e.user_message().to_string());

            let reply = TranslationReply {
                request,
                word,
                outcome,
            };
            if let Err(e) = replies.send(AppEvent::TranslationReply(reply)).await {
                tracing::debug!("Dropping translation reply: {}", e);
            }
        });
    }

    pub fn set_target(&mut self, text: impl Into<String>) {
        self.form.target = text.into();
    }

    pub fn set_gender(&mut self, gender: Option<Gender>) {
        self.form.gender = gender;
    }

    pub fn set_notes(&mut self, text: impl Into<String>) {
        self.form.notes = text.into();
    }

    /// Returns whether the request is still current
    pub fn translation_started(&mut self, request: u64) -> bool {
        if self.awaiting != Some(request) {
            return false;
        }

        self.form.is_translating = true;
        self.form.translate_error = None;
        true
    }

    pub fn apply_reply(&mut self, reply: TranslationReply) -> ReplyOutcome {
        if self.awaiting != Some(reply.request) {
            tracing::debug!(
                request = reply.request,
                word = %reply.word,
                "Discarding stale translation"
            );
            return ReplyOutcome::Stale;
        }

        self.awaiting = None;
        self.form.is_translating = false;

        match reply.outcome {
            Ok(result) => {
                if let Some(gloss) = result.gloss {
                    tracing::info!("Setting translation: {}", gloss);
                    self.form.target = gloss;
                }
                tracing::info!("Setting gender: {:?}", result.gender);
                self.form.gender = result.gender;
                ReplyOutcome::Applied
            }
            Err(message) => {
                self.form.translate_error = Some(message.clone());
                ReplyOutcome::Failed(message)
            }
        }
    }

    /// Calls exactly one store operation, then closes the form. On error the
    /// form is left as it was.
    pub fn submit(
        &mut self,
        store: &mut dyn EntryStore,
        list: Option<ListId>,
    ) -> Result<Submitted, SubmitError> {
        let fields = self.form.fields()?;

        let submitted = match self.form.editing {
            Some(entry_id) => Submitted::Updated(store.update_entry(entry_id, fields)?),
            None => {
                let list = list.ok_or(ValidationError::NoActiveList)?;
                Submitted::Added(store.add_entry(list, fields)?)
            }
        };

        self.close();
        Ok(submitted)
    }

    fn reset(&mut self) {
        self.debouncer.cancel(&SOURCE_FIELD);
        self.next_request += 1;
        self.awaiting = None;
        self.form = EntryForm::default();
    }
}
