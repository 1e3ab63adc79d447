use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_debounce_ms() -> u64 {
    800
}

fn default_min_input_chars() -> usize {
    2
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct EditConfig {
    /// Quiet period after the last keystroke before a lookup runs
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Shorter input never triggers a lookup
    #[serde(default = "default_min_input_chars")]
    pub min_input_chars: usize,
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_input_chars: default_min_input_chars(),
        }
    }
}

impl EditConfig {
    pub fn new() -> Self {
        let debounce_ms = env::var("MILON_DEBOUNCE_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_debounce_ms);

        let min_input_chars = env::var("MILON_MIN_INPUT_CHARS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_min_input_chars);

        Self {
            debounce_ms,
            min_input_chars,
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
