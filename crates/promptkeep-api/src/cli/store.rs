//! `get` / `set` subcommands over the document store.

use anyhow::{Context, Result};
use console::style;
use serde_json::Value;

use crate::state::AppState;

/// Parse a CLI value as JSON, falling back to a JSON string.
///
/// `pkeep set lang en` stores `"en"`; `pkeep set opts '{"a":1}'` stores the
/// object.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Print the document under `key`.
pub async fn get(state: &AppState, key: &str, json: bool) -> Result<()> {
    let value = state.documents.get(key).await.into_value();

    if json {
        let result = serde_json::json!({ "key": key, "data": value });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!();
    match value {
        Some(val) => println!(
            "  {} = {}",
            style(key).cyan().bold(),
            serde_json::to_string_pretty(&val)?,
        ),
        None => println!(
            "  {} Nothing stored under '{}'",
            style("i").blue().bold(),
            style(key).cyan(),
        ),
    }
    println!();
    Ok(())
}

/// Store `raw` under `key`.
pub async fn set(state: &AppState, key: &str, raw: &str, json: bool) -> Result<()> {
    let value = parse_value(raw);
    state
        .documents
        .set(key, &value)
        .await
        .with_context(|| format!("Failed to store '{key}'"))?;

    if json {
        let result = serde_json::json!({ "key": key, "data": value, "success": true });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!();
        println!("  {} Set '{}'", style("ok").green(), style(key).cyan());
        println!();
    }
    Ok(())
}
