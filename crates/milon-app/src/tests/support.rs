//! Fakes shared by the app tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use kanal::AsyncReceiver;
use milon_core::error::{SpeechError, StoreError};
use milon_core::speech::SpeechBackend;
use milon_core::store::{EntryStore, MemoryStore};
use milon_lang_hebrew::hebrew_rules;
use milon_translator::{InferenceEngine, Lookup, MarkupSource, ProviderMetadata, TranslateError};
use milon_types::{AppEvent, Entry, EntryFields, EntryId, ListId};
use tokio::time::timeout;

pub const HUMMUS: &str = "{{ניתוח דקדוקי\n|מין=זכר\n}}\n* אנגלית: {{ת|אנגלית|hummus}}\n";
pub const BREAD: &str = "{{ניתוח דקדוקי\n|מין=זכר\n}}\n* אנגלית: bread\n";
pub const CITY: &str = "* אנגלית: city\n";

/// Dictionary with a fixed set of pages and an optional network delay
#[derive(Clone)]
pub struct FakeWiktionary {
    pages: HashMap<&'static str, &'static str>,
    delay: Duration,
    pub fetched: Arc<Mutex<Vec<String>>>,
}

impl FakeWiktionary {
    pub fn new(pages: &[(&'static str, &'static str)]) -> Self {
        Self {
            pages: pages.iter().copied().collect(),
            delay: Duration::ZERO,
            fetched: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.fetched.lock().unwrap().len()
    }

    pub fn lookup(&self) -> Lookup {
        let engine = InferenceEngine::new(hebrew_rules(10)).unwrap();
        Lookup::new(Arc::new(self.clone()), Arc::new(engine))
    }
}

#[async_trait::async_trait]
impl MarkupSource for FakeWiktionary {
    async fn fetch_markup(&self, word: &str) -> Result<String, TranslateError> {
        self.fetched.lock().unwrap().push(word.to_string());
        tokio::time::sleep(self.delay).await;

        self.pages
            .get(word)
            .map(|page| page.to_string())
            .ok_or_else(|| TranslateError::LookupMiss("The page you specified doesn't exist.".into()))
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "fake".to_string(),
            source_lang: "he".to_string(),
            target_lang: "en".to_string(),
        }
    }
}

/// Speech backend that remembers what it was asked to say
#[derive(Default)]
pub struct RecordingSpeech {
    pub spoken: Mutex<Vec<(String, String)>>,
}

impl SpeechBackend for RecordingSpeech {
    fn cancel(&self) {}

    fn speak(&self, text: &str, language_tag: &str) -> Result<(), SpeechError> {
        self.spoken
            .lock()
            .unwrap()
            .push((text.to_string(), language_tag.to_string()));
        Ok(())
    }
}

/// Memory store that counts calls
#[derive(Default)]
pub struct CountingStore {
    pub inner: MemoryStore,
    pub adds: usize,
    pub updates: usize,
}

impl EntryStore for CountingStore {
    fn add_entry(&mut self, list_id: ListId, fields: EntryFields) -> Result<Entry, StoreError> {
        self.adds += 1;
        self.inner.add_entry(list_id, fields)
    }

    fn update_entry(
        &mut self,
        entry_id: EntryId,
        fields: EntryFields,
    ) -> Result<Entry, StoreError> {
        self.updates += 1;
        self.inner.update_entry(entry_id, fields)
    }
}

/// Next event accepted by `pick`, skipping the rest
pub async fn next_matching<T>(
    rx: &AsyncReceiver<AppEvent>,
    mut pick: impl FnMut(AppEvent) -> Option<T>,
) -> Option<T> {
    loop {
        match timeout(Duration::from_secs(10), rx.recv()).await {
            Ok(Ok(event)) => {
                if let Some(found) = pick(event) {
                    return Some(found);
                }
            }
            Ok(Err(_)) | Err(_) => return None,
        }
    }
}
