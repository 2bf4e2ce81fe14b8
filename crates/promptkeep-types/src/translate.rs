//! Translation request type.
//!
//! The store never translates anything itself; this is the payload handed to
//! whichever translation provider the adapter is wired with.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub from_lang: String,
    pub to_lang: String,
    /// Provider name, e.g. `google` or `deepl`.
    #[serde(rename = "api")]
    pub provider: String,
    /// Provider-specific settings (API keys, endpoints, model names).
    #[serde(rename = "api_config", default)]
    pub provider_config: Value,
}

/// Several texts sharing one language pair and provider.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslateBatchRequest {
    #[serde(default)]
    pub texts: Option<Vec<Value>>,
    #[serde(default = "default_from_lang")]
    pub from_lang: String,
    #[serde(default = "default_to_lang")]
    pub to_lang: String,
    #[serde(rename = "api", default)]
    pub provider: String,
    #[serde(rename = "api_config", default)]
    pub provider_config: Value,
}

fn default_from_lang() -> String {
    "auto".to_string()
}

fn default_to_lang() -> String {
    "en".to_string()
}

impl TranslateBatchRequest {
    /// One request per text, in order. Non-string texts use their JSON form.
    pub fn requests(&self) -> Vec<TranslateRequest> {
        self.texts
            .iter()
            .flatten()
            .map(|text| TranslateRequest {
                text: match text {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                },
                from_lang: self.from_lang.clone(),
                to_lang: self.to_lang.clone(),
                provider: self.provider.clone(),
                provider_config: self.provider_config.clone(),
            })
            .collect()
    }
}
