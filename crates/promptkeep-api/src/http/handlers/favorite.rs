//! Favorites endpoints.

use axum::extract::State;

use crate::http::extractors::query::TypeQuery;
use crate::http::extractors::{required, required_id, AppJson, AppQuery};
use crate::http::handlers::history::{ItemRequest, PromptRequest, RenameRequest};
use crate::http::response::{field, success, ApiResult};
use crate::state::AppState;

/// GET /get_favorites?type=
pub async fn get_favorites(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<TypeQuery>,
) -> ApiResult {
    let prompt_type = required(&query.prompt_type, "type")?;
    field("favorites", state.favorites.list(prompt_type).await)
}

/// POST /push_favorite
pub async fn push_favorite(
    State(state): State<AppState>,
    AppJson(body): AppJson<PromptRequest>,
) -> ApiResult {
    let prompt_type = required(&body.prompt_type, "type")?;
    state.favorites.push(prompt_type, body.fields).await?;
    success()
}

/// POST /move_up_favorite
pub async fn move_up_favorite(
    State(state): State<AppState>,
    AppJson(body): AppJson<ItemRequest>,
) -> ApiResult {
    let prompt_type = required(&body.prompt_type, "type")?;
    let id = required_id(&body.id)?;
    state.favorites.move_up(prompt_type, &id).await?;
    success()
}

/// POST /move_down_favorite
pub async fn move_down_favorite(
    State(state): State<AppState>,
    AppJson(body): AppJson<ItemRequest>,
) -> ApiResult {
    let prompt_type = required(&body.prompt_type, "type")?;
    let id = required_id(&body.id)?;
    state.favorites.move_down(prompt_type, &id).await?;
    success()
}

/// POST /set_favorite_name
pub async fn set_favorite_name(
    State(state): State<AppState>,
    AppJson(body): AppJson<RenameRequest>,
) -> ApiResult {
    let prompt_type = required(&body.prompt_type, "type")?;
    let id = required_id(&body.id)?;
    let name = required(&body.name, "name")?;
    state.favorites.rename(prompt_type, &id, name).await?;
    success()
}

/// POST /unfavorite
pub async fn unfavorite(
    State(state): State<AppState>,
    AppJson(body): AppJson<ItemRequest>,
) -> ApiResult {
    let prompt_type = required(&body.prompt_type, "type")?;
    let id = required_id(&body.id)?;
    state.favorites.unfavorite(prompt_type, &id).await?;
    success()
}
