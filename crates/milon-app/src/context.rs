use std::sync::Arc;
use std::time::Duration;

use kanal::AsyncSender;
use milon_config::Config;
use milon_config::translator::TranslatorConfig;
use milon_core::practice::PracticeSession;
use milon_core::speech::Speaker;
use milon_core::store::MemoryStore;
use milon_lang_hebrew::{HebrewWiktionary, hebrew_rules};
use milon_translator::{InferenceEngine, Lookup};
use milon_types::{AppEvent, Direction, ListId};

use crate::edit_flow::EntryEditFlow;
use crate::progress::ProgressLog;
use crate::speech::build_speaker;

/// Everything the event loop owns. Only the event loop task touches it.
pub struct VocabContext {
    pub store: MemoryStore,
    pub list_id: ListId,
    pub edit: EntryEditFlow,
    pub practice: Option<PracticeSession>,
    pub progress: Arc<ProgressLog>,
    pub speaker: Speaker,
    /// Direction the next session starts with
    pub direction: Direction,
    pub source_voice: String,
}

impl VocabContext {
    pub fn new(
        list_name: &str,
        edit: EntryEditFlow,
        speaker: Speaker,
        direction: Direction,
        source_voice: String,
    ) -> Self {
        let mut store = MemoryStore::new();
        let list_id = store.create_list(list_name);

        Self {
            store,
            list_id,
            edit,
            practice: None,
            progress: Arc::new(ProgressLog::new()),
            speaker,
            direction,
            source_voice,
        }
    }

    pub fn from_config(config: &Config, replies: AsyncSender<AppEvent>) -> anyhow::Result<Self> {
        let lookup = build_lookup(&config.translator)?;
        let edit = EntryEditFlow::new(
            lookup,
            replies,
            config.edit.debounce(),
            config.edit.min_input_chars,
        );

        Ok(Self::new(
            &config.list_name,
            edit,
            build_speaker(&config.speech),
            config.practice.default_direction,
            config.speech.source_voice.clone(),
        ))
    }
}

pub fn build_lookup(config: &TranslatorConfig) -> anyhow::Result<Option<Lookup>> {
    if !config.enabled {
        tracing::warn!("Translator disabled, words must be translated manually");
        return Ok(None);
    }

    let source = HebrewWiktionary::with_timeout(
        config.api_url.clone(),
        Duration::from_secs(config.timeout_seconds),
    )?;
    let engine = InferenceEngine::new(hebrew_rules(config.gender_scan_lines))?;
    let lookup = Lookup::new(Arc::new(source), Arc::new(engine));

    let provider = lookup.metadata();
    tracing::info!(
        "Translator ready: {} ({} -> {})",
        provider.name,
        provider.source_lang,
        provider.target_lang
    );

    Ok(Some(lookup))
}
