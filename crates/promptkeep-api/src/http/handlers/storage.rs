//! Document and list endpoints.

use axum::extract::State;
use serde::Deserialize;
use serde_json::{Map, Value};

use promptkeep_types::error::ValidationError;

use crate::http::extractors::query::{KeyQuery, KeysQuery, ListItemQuery};
use crate::http::extractors::{required, AppJson, AppQuery};
use crate::http::response::{field, success, success_with, ApiResult};
use crate::state::AppState;

/// Body for `set_data`.
#[derive(Debug, Deserialize)]
pub struct SetDataRequest {
    pub key: Option<String>,
    #[serde(default)]
    pub data: Value,
}

/// Body for list endpoints addressing a whole list.
#[derive(Debug, Deserialize)]
pub struct ListKeyRequest {
    pub key: Option<String>,
}

/// Body for `push_data_list`.
#[derive(Debug, Deserialize)]
pub struct PushListRequest {
    pub key: Option<String>,
    #[serde(default)]
    pub item: Value,
}

/// Body for `remove_data_list`.
#[derive(Debug, Deserialize)]
pub struct RemoveListRequest {
    pub key: Option<String>,
    pub index: Option<i64>,
}

/// GET /get_data?key=
pub async fn get_data(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<KeyQuery>,
) -> ApiResult {
    let key = required(&query.key, "key")?;
    let data = state.documents.get(key).await.into_value();
    field("data", data)
}

/// GET /get_datas?keys=a,b
pub async fn get_datas(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<KeysQuery>,
) -> ApiResult {
    let keys = query.split();
    let datas: Map<String, Value> = state
        .documents
        .get_many(&keys)
        .await
        .into_iter()
        .map(|(key, doc)| (key, doc.into_value().unwrap_or(Value::Null)))
        .collect();
    field("datas", datas)
}

/// POST /set_data
pub async fn set_data(
    State(state): State<AppState>,
    AppJson(body): AppJson<SetDataRequest>,
) -> ApiResult {
    let key = required(&body.key, "key")?;
    state.documents.set(key, &body.data).await?;
    success()
}

/// POST /set_datas with a `{key: value, ...}` object.
pub async fn set_datas(
    State(state): State<AppState>,
    AppJson(body): AppJson<Map<String, Value>>,
) -> ApiResult {
    let entries: Vec<(String, Value)> = body.into_iter().collect();
    state.documents.set_many(&entries).await?;
    success()
}

/// GET /get_data_list_item?key=&index=
pub async fn get_data_list_item(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListItemQuery>,
) -> ApiResult {
    let key = required(&query.key, "key")?;
    let item = match query.index.map(usize::try_from) {
        Some(Ok(index)) => state.lists.get_item(key, index).await,
        _ => None,
    };
    field("item", item)
}

/// POST /push_data_list
pub async fn push_data_list(
    State(state): State<AppState>,
    AppJson(body): AppJson<PushListRequest>,
) -> ApiResult {
    let key = required(&body.key, "key")?;
    state.lists.push(key, body.item).await?;
    success()
}

/// POST /pop_data_list
pub async fn pop_data_list(
    State(state): State<AppState>,
    AppJson(body): AppJson<ListKeyRequest>,
) -> ApiResult {
    let key = required(&body.key, "key")?;
    let item = state.lists.pop(key).await?;
    success_with("item", item)
}

/// POST /shift_data_list
pub async fn shift_data_list(
    State(state): State<AppState>,
    AppJson(body): AppJson<ListKeyRequest>,
) -> ApiResult {
    let key = required(&body.key, "key")?;
    let item = state.lists.shift(key).await?;
    success_with("item", item)
}

/// POST /remove_data_list. Negative and out-of-range indices are no-ops.
pub async fn remove_data_list(
    State(state): State<AppState>,
    AppJson(body): AppJson<RemoveListRequest>,
) -> ApiResult {
    let key = required(&body.key, "key")?;
    let Some(index) = body.index else {
        return Err(ValidationError::MissingField("index").into());
    };
    if let Ok(index) = usize::try_from(index) {
        state.lists.remove_at(key, index).await?;
    }
    success()
}

/// POST /clear_data_list
pub async fn clear_data_list(
    State(state): State<AppState>,
    AppJson(body): AppJson<ListKeyRequest>,
) -> ApiResult {
    let key = required(&body.key, "key")?;
    state.lists.clear(key).await?;
    success()
}
