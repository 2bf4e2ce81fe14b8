//! Translation endpoints.

use axum::extract::State;

use promptkeep_types::error::{TranslateError, ValidationError};
use promptkeep_types::translate::{TranslateBatchRequest, TranslateRequest};

use crate::http::extractors::AppJson;
use crate::http::response::{success_with, ApiResult};
use crate::state::AppState;

/// POST /translate
pub async fn translate(
    State(state): State<AppState>,
    AppJson(body): AppJson<TranslateRequest>,
) -> ApiResult {
    let translator = state
        .translator
        .as_ref()
        .ok_or(TranslateError::NotConfigured)?;

    tracing::debug!(
        provider = translator.name(),
        requested = %body.provider,
        from = %body.from_lang,
        to = %body.to_lang,
        "translating"
    );
    let translated = translator.translate(&body).await?;
    success_with("translated_text", translated)
}

/// POST /translates. A text the provider fails on comes back as `""`.
pub async fn translates(
    State(state): State<AppState>,
    AppJson(body): AppJson<TranslateBatchRequest>,
) -> ApiResult {
    if body.texts.is_none() {
        return Err(ValidationError::MissingField("texts").into());
    }
    let translator = state
        .translator
        .as_ref()
        .ok_or(TranslateError::NotConfigured)?;

    let requests = body.requests();
    let mut translated = Vec::with_capacity(requests.len());
    for request in &requests {
        match translator.translate(request).await {
            Ok(text) => translated.push(text),
            Err(e) => {
                tracing::warn!(provider = translator.name(), error = %e, "batch item failed");
                translated.push(String::new());
            }
        }
    }
    success_with("translated_text", translated)
}
