//! History endpoints.

use axum::extract::State;
use serde::Deserialize;
use serde_json::Value;

use promptkeep_types::prompt::PromptFields;

use crate::http::extractors::query::TypeQuery;
use crate::http::extractors::{required, required_id, AppJson, AppQuery};
use crate::http::response::{field, success, success_flag, ApiResult};
use crate::state::AppState;

/// Body for endpoints that create or patch an item.
#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    #[serde(rename = "type")]
    pub prompt_type: Option<String>,
    pub id: Option<Value>,
    #[serde(flatten)]
    pub fields: PromptFields,
}

/// Body for endpoints that address one item by id.
#[derive(Debug, Deserialize)]
pub struct ItemRequest {
    #[serde(rename = "type")]
    pub prompt_type: Option<String>,
    pub id: Option<Value>,
}

/// Body for rename endpoints.
#[derive(Debug, Deserialize)]
pub struct RenameRequest {
    #[serde(rename = "type")]
    pub prompt_type: Option<String>,
    pub id: Option<Value>,
    pub name: Option<String>,
}

/// Body for endpoints that address a whole prompt type.
#[derive(Debug, Deserialize)]
pub struct TypeRequest {
    #[serde(rename = "type")]
    pub prompt_type: Option<String>,
}

/// GET /get_histories?type=
pub async fn get_histories(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<TypeQuery>,
) -> ApiResult {
    let prompt_type = required(&query.prompt_type, "type")?;
    field("histories", state.history.list(prompt_type).await)
}

/// GET /get_latest_history?type=
pub async fn get_latest_history(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<TypeQuery>,
) -> ApiResult {
    let prompt_type = required(&query.prompt_type, "type")?;
    field("history", state.history.latest(prompt_type).await)
}

/// POST /push_history
pub async fn push_history(
    State(state): State<AppState>,
    AppJson(body): AppJson<PromptRequest>,
) -> ApiResult {
    let prompt_type = required(&body.prompt_type, "type")?;
    state.history.push(prompt_type, body.fields).await?;
    success()
}

/// POST /set_history. Only the supplied fields change.
pub async fn set_history(
    State(state): State<AppState>,
    AppJson(body): AppJson<PromptRequest>,
) -> ApiResult {
    let prompt_type = required(&body.prompt_type, "type")?;
    let id = required_id(&body.id)?;
    state.history.update(prompt_type, &id, &body.fields).await?;
    success()
}

/// POST /set_history_name
pub async fn set_history_name(
    State(state): State<AppState>,
    AppJson(body): AppJson<RenameRequest>,
) -> ApiResult {
    let prompt_type = required(&body.prompt_type, "type")?;
    let id = required_id(&body.id)?;
    let name = required(&body.name, "name")?;
    state.history.rename(prompt_type, &id, name).await?;
    success()
}

/// POST /delete_history
pub async fn delete_history(
    State(state): State<AppState>,
    AppJson(body): AppJson<ItemRequest>,
) -> ApiResult {
    let prompt_type = required(&body.prompt_type, "type")?;
    let id = required_id(&body.id)?;
    state.history.delete(prompt_type, &id).await?;
    success()
}

/// POST /delete_histories
pub async fn delete_histories(
    State(state): State<AppState>,
    AppJson(body): AppJson<TypeRequest>,
) -> ApiResult {
    let prompt_type = required(&body.prompt_type, "type")?;
    state.history.clear(prompt_type).await?;
    success()
}

/// POST /dofavorite. `success` is false when the history entry is absent.
pub async fn do_favorite(
    State(state): State<AppState>,
    AppJson(body): AppJson<ItemRequest>,
) -> ApiResult {
    let prompt_type = required(&body.prompt_type, "type")?;
    let id = required_id(&body.id)?;
    let promoted = state.history.promote_to_favorite(prompt_type, &id).await?;
    success_flag(promoted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Json;
    use crate::state::test_support::{temp_state, temp_state_with};
    use promptkeep_types::config::GlobalConfig;
    use serde_json::{json, Value};

    fn type_query(prompt_type: &str) -> AppQuery<TypeQuery> {
        AppQuery(TypeQuery {
            prompt_type: Some(prompt_type.to_string()),
        })
    }

    fn push_body(prompt: &str) -> AppJson<PromptRequest> {
        AppJson(PromptRequest {
            prompt_type: Some("txt2img".to_string()),
            id: None,
            fields: PromptFields {
                name: Some("n".to_string()),
                prompt: Some(prompt.to_string()),
                ..Default::default()
            },
        })
    }

    fn item_body(id: &str) -> AppJson<ItemRequest> {
        AppJson(ItemRequest {
            prompt_type: Some("txt2img".to_string()),
            id: Some(json!(id)),
        })
    }

    async fn histories(state: &AppState) -> Vec<Value> {
        let Json(body) = get_histories(State(state.clone()), type_query("txt2img"))
            .await
            .unwrap();
        body["histories"].as_array().cloned().unwrap_or_default()
    }

    #[test]
    fn prompt_request_deserializes_flattened_fields() {
        let body: PromptRequest = serde_json::from_value(json!({
            "type": "txt2img",
            "name": "n",
            "tags": ["a"],
            "prompt": "p"
        }))
        .unwrap();
        assert_eq!(body.prompt_type.as_deref(), Some("txt2img"));
        assert_eq!(body.fields.tags, Some(vec![json!("a")]));
        assert_eq!(body.fields.prompt.as_deref(), Some("p"));
    }

    #[tokio::test]
    async fn push_then_latest_history() {
        let (_tmp, state) = temp_state();
        let Json(body) = push_history(State(state.clone()), push_body("p")).await.unwrap();
        assert_eq!(body, json!({"success": true}));

        let Json(body) = get_latest_history(State(state), type_query("txt2img"))
            .await
            .unwrap();
        let history = &body["history"];
        assert_eq!(history["prompt"], json!("p"));
        assert_eq!(history["name"], json!("n"));
        assert_eq!(history["tags"], json!([]));
        assert_eq!(history["is_favorite"], json!(false));
        assert!(history["id"].as_str().is_some_and(|id| !id.is_empty()));
        assert!(history["time"].is_i64());
    }

    #[tokio::test]
    async fn latest_of_empty_history_is_null() {
        let (_tmp, state) = temp_state();
        let Json(body) = get_latest_history(State(state), type_query("txt2img"))
            .await
            .unwrap();
        assert_eq!(body, json!({"history": null}));
    }

    #[tokio::test]
    async fn missing_type_is_reported_in_body() {
        let (_tmp, state) = temp_state();
        let err = get_histories(State(state), AppQuery(TypeQuery::default()))
            .await
            .unwrap_err();
        assert_eq!(err.body(), json!({"success": false, "message": "type is required"}));
    }

    #[tokio::test]
    async fn history_is_capped_by_config() {
        let (_tmp, state) = temp_state_with(GlobalConfig {
            history_capacity: 3,
            ..GlobalConfig::default()
        });
        for i in 0..5 {
            push_history(State(state.clone()), push_body(&i.to_string()))
                .await
                .unwrap();
        }
        let prompts: Vec<Value> = histories(&state)
            .await
            .iter()
            .map(|h| h["prompt"].clone())
            .collect();
        assert_eq!(prompts, vec![json!("2"), json!("3"), json!("4")]);
    }

    #[tokio::test]
    async fn set_history_patches_and_renames() {
        let (_tmp, state) = temp_state();
        push_history(State(state.clone()), push_body("p")).await.unwrap();
        let id = histories(&state).await[0]["id"].as_str().unwrap().to_string();

        set_history(
            State(state.clone()),
            AppJson(PromptRequest {
                prompt_type: Some("txt2img".to_string()),
                id: Some(json!(id)),
                fields: PromptFields {
                    tags: Some(vec![json!("t")]),
                    ..Default::default()
                },
            }),
        )
        .await
        .unwrap();
        set_history_name(
            State(state.clone()),
            AppJson(RenameRequest {
                prompt_type: Some("txt2img".to_string()),
                id: Some(json!(id)),
                name: Some("renamed".to_string()),
            }),
        )
        .await
        .unwrap();

        let entries = histories(&state).await;
        let entry = &entries[0];
        assert_eq!(entry["tags"], json!(["t"]));
        assert_eq!(entry["name"], json!("renamed"));
        assert_eq!(entry["prompt"], json!("p"));
    }

    #[tokio::test]
    async fn delete_and_clear_histories() {
        let (_tmp, state) = temp_state();
        push_history(State(state.clone()), push_body("a")).await.unwrap();
        push_history(State(state.clone()), push_body("b")).await.unwrap();
        let id = histories(&state).await[0]["id"].as_str().unwrap().to_string();

        delete_history(State(state.clone()), item_body(&id)).await.unwrap();
        assert_eq!(histories(&state).await.len(), 1);

        delete_histories(
            State(state.clone()),
            AppJson(TypeRequest {
                prompt_type: Some("txt2img".to_string()),
            }),
        )
        .await
        .unwrap();
        assert!(histories(&state).await.is_empty());
    }

    #[tokio::test]
    async fn dofavorite_marks_entry_and_is_idempotent() {
        let (_tmp, state) = temp_state();
        push_history(State(state.clone()), push_body("p")).await.unwrap();
        let id = histories(&state).await[0]["id"].as_str().unwrap().to_string();

        for _ in 0..2 {
            let Json(body) = do_favorite(State(state.clone()), item_body(&id)).await.unwrap();
            assert_eq!(body, json!({"success": true}));
        }

        assert_eq!(histories(&state).await[0]["is_favorite"], json!(true));
        assert_eq!(state.favorites.list("txt2img").await.len(), 1);
    }

    #[tokio::test]
    async fn dofavorite_unknown_id_fails() {
        let (_tmp, state) = temp_state();
        let Json(body) = do_favorite(State(state), item_body("missing")).await.unwrap();
        assert_eq!(body, json!({"success": false}));
    }

    #[tokio::test]
    async fn numeric_ids_address_stored_entries() {
        let (_tmp, state) = temp_state();
        state
            .documents
            .set("history.txt2img", &json!([{"id": 7, "time": 1, "prompt": "p"}]))
            .await
            .unwrap();

        let Json(body) = Json::<ItemRequest>::from_bytes(br#"{"type":"txt2img","id":7}"#).unwrap();
        let Json(result) = do_favorite(State(state.clone()), AppJson(body)).await.unwrap();
        assert_eq!(result, json!({"success": true}));
        assert_eq!(histories(&state).await[0]["is_favorite"], json!(true));

        let Json(body) = Json::<ItemRequest>::from_bytes(br#"{"type":"txt2img","id":7}"#).unwrap();
        delete_history(State(state.clone()), AppJson(body)).await.unwrap();
        assert!(histories(&state).await.is_empty());
    }

    #[tokio::test]
    async fn non_scalar_id_is_reported_in_body() {
        let (_tmp, state) = temp_state();
        let err = delete_history(
            State(state),
            AppJson(ItemRequest {
                prompt_type: Some("txt2img".to_string()),
                id: Some(json!({"nested": 1})),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.body()["success"], json!(false));
        assert!(err.message().contains("id"));
    }
}
