use std::env;

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_api_url() -> String {
    "https://he.wiktionary.org/w/api.php".to_string()
}

fn default_gender_scan_lines() -> usize {
    10
}

fn default_timeout_seconds() -> u64 {
    10
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// MediaWiki API endpoint of the dictionary
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Only this many leading markup lines are searched for gender markers
    #[serde(default = "default_gender_scan_lines")]
    pub gender_scan_lines: usize,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            api_url: default_api_url(),
            gender_scan_lines: default_gender_scan_lines(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl TranslatorConfig {
    pub fn new() -> Self {
        let api_url = env::var("MILON_API_URL").unwrap_or_else(|_| default_api_url());

        Self {
            api_url,
            ..Self::default()
        }
    }
}
