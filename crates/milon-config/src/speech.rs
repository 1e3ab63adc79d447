use std::env;

use serde::{Deserialize, Serialize};

fn default_source_voice() -> String {
    "he-IL".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SpeechConfig {
    pub enabled: bool,
    /// External text-to-speech program, invoked as `<command> -v <voice> <text>`
    pub command: Option<String>,
    /// Language tag passed for the native-script word
    #[serde(default = "default_source_voice")]
    pub source_voice: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            command: None,
            source_voice: default_source_voice(),
        }
    }
}

impl SpeechConfig {
    pub fn new() -> Self {
        let command = env::var("MILON_SPEECH_COMMAND").ok().filter(|c| !c.is_empty());

        Self {
            enabled: command.is_some(),
            command,
            ..Self::default()
        }
    }
}
