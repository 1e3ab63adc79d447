use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::edit::EditConfig;
use self::practice::PracticeConfig;
use self::speech::SpeechConfig;
use self::translator::TranslatorConfig;

pub mod edit;
pub mod practice;
pub mod speech;
pub mod translator;

fn default_list_name() -> String {
    "My words".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub edit: EditConfig,
    pub speech: SpeechConfig,
    pub practice: PracticeConfig,

    /// Name of the list new entries are added to
    #[serde(default = "default_list_name")]
    pub list_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translator: TranslatorConfig::default(),
            edit: EditConfig::default(),
            speech: SpeechConfig::default(),
            practice: PracticeConfig::default(),
            list_name: default_list_name(),
        }
    }
}

impl Config {
    /// Defaults overridden by environment variables
    pub fn new() -> Self {
        let list_name = env::var("MILON_LIST_NAME").unwrap_or_else(|_| default_list_name());

        Config {
            translator: TranslatorConfig::new(),
            edit: EditConfig::new(),
            speech: SpeechConfig::new(),
            practice: PracticeConfig::default(),

            list_name,
        }
    }

    /// Load a JSON config file, missing keys fall back to defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_json::from_reader(reader)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use milon_types::Direction;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "edit": { "debounce_ms": 250 }, "list_name": "Food" }"#)
                .unwrap();

        assert_eq!(config.edit.debounce_ms, 250);
        assert_eq!(config.edit.min_input_chars, 2);
        assert_eq!(config.list_name, "Food");
        assert_eq!(config.translator.gender_scan_lines, 10);
        assert_eq!(config.practice.default_direction, Direction::SourceToTarget);
        assert!(!config.speech.enabled);
    }

    #[test]
    fn test_default_round_trips_through_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(back.translator.api_url, config.translator.api_url);
        assert_eq!(back.edit.debounce_ms, 800);
    }
}
