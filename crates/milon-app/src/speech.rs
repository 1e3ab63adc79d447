use std::sync::{Arc, Mutex};

use milon_config::speech::SpeechConfig;
use milon_core::error::SpeechError;
use milon_core::speech::{SpeechBackend, Speaker};
use tokio::process::{Child, Command};

/// Plays text through an external TTS program such as `espeak-ng`
pub struct ProcessSpeech {
    program: String,
    current: Mutex<Option<Child>>,
}

impl ProcessSpeech {
    pub fn new(program: String) -> Self {
        Self {
            program,
            current: Mutex::new(None),
        }
    }
}

impl SpeechBackend for ProcessSpeech {
    fn cancel(&self) {
        let mut current = self.current.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(mut child) = current.take() {
            if let Err(e) = child.start_kill() {
                tracing::debug!("Speech process already gone: {}", e);
            }
        }
    }

    fn speak(&self, text: &str, language_tag: &str) -> Result<(), SpeechError> {
        let child = Command::new(&self.program)
            .arg("-v")
            .arg(language_tag)
            .arg(text)
            .kill_on_drop(true)
            .spawn()?;

        *self.current.lock().unwrap_or_else(|p| p.into_inner()) = Some(child);
        Ok(())
    }
}

pub fn build_speaker(config: &SpeechConfig) -> Speaker {
    match (&config.command, config.enabled) {
        (Some(command), true) => {
            tracing::info!("Speech enabled via {}", command);
            Speaker::new(Some(Arc::new(ProcessSpeech::new(command.clone()))))
        }
        _ => {
            tracing::info!("Speech disabled");
            Speaker::disabled()
        }
    }
}
