use std::time::Duration;

pub const DEFAULT_WORD_API: &str = "https://api.wordnik.com/v4/words.json/randomWord";
pub const DEFAULT_DEFINITION_API: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Endpoints and client settings for the remote word pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceConfig {
    pub word_api_url: String,
    pub definition_api_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            word_api_url: DEFAULT_WORD_API.to_string(),
            definition_api_url: DEFAULT_DEFINITION_API.to_string(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}
