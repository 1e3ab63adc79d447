use std::sync::Arc;

use crate::error::SpeechError;

/// Something that can read text aloud
pub trait SpeechBackend: Send + Sync {
    /// Stop whatever is currently playing, no-op when idle
    fn cancel(&self);

    fn speak(&self, text: &str, language_tag: &str) -> Result<(), SpeechError>;
}

/// Single voice at a time: every request cancels the previous one first.
/// Without a backend all requests are silently dropped.
#[derive(Clone, Default)]
pub struct Speaker {
    backend: Option<Arc<dyn SpeechBackend>>,
}

impl Speaker {
    pub fn new(backend: Option<Arc<dyn SpeechBackend>>) -> Self {
        Self { backend }
    }

    pub fn disabled() -> Self {
        Self { backend: None }
    }

    pub fn say(&self, text: &str, language_tag: &str) {
        let Some(backend) = &self.backend else {
            tracing::debug!("speech not available, skipping playback");
            return;
        };

        backend.cancel();

        tracing::debug!("Speaking {} in {}", text, language_tag);
        if let Err(e) = backend.speak(text, language_tag) {
            tracing::warn!("Speech playback failed: {}", e);
        }
    }

    pub fn stop(&self) {
        if let Some(backend) = &self.backend {
            backend.cancel();
        }
    }
}
