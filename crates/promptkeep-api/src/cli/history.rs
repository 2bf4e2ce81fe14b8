//! History and favorites subcommands.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::Subcommand;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use promptkeep_types::prompt::PromptItem;

use crate::state::AppState;

/// History subcommands.
#[derive(Subcommand)]
pub enum HistoryCommand {
    /// List history entries, oldest first.
    #[command(alias = "ls")]
    List {
        /// Prompt type (e.g. txt2img).
        #[arg(value_name = "TYPE")]
        prompt_type: String,
    },

    /// Show the most recent entry.
    Latest {
        #[arg(value_name = "TYPE")]
        prompt_type: String,
    },

    /// Delete every entry for a prompt type.
    Clear {
        #[arg(value_name = "TYPE")]
        prompt_type: String,
    },
}

/// Favorites subcommands.
#[derive(Subcommand)]
pub enum FavoritesCommand {
    /// List favorites in their stored order.
    #[command(alias = "ls")]
    List {
        #[arg(value_name = "TYPE")]
        prompt_type: String,
    },
}

/// Handle a history subcommand.
pub async fn handle_history_command(
    cmd: HistoryCommand,
    state: &AppState,
    json: bool,
) -> Result<()> {
    match cmd {
        HistoryCommand::List { prompt_type } => list_history(state, &prompt_type, json).await,
        HistoryCommand::Latest { prompt_type } => latest_history(state, &prompt_type, json).await,
        HistoryCommand::Clear { prompt_type } => clear_history(state, &prompt_type, json).await,
    }
}

/// Handle a favorites subcommand.
pub async fn handle_favorites_command(
    cmd: FavoritesCommand,
    state: &AppState,
    json: bool,
) -> Result<()> {
    match cmd {
        FavoritesCommand::List { prompt_type } => list_favorites(state, &prompt_type, json).await,
    }
}

async fn list_history(state: &AppState, prompt_type: &str, json: bool) -> Result<()> {
    let entries = state.history.list(prompt_type).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        print_empty("history", prompt_type);
        return Ok(());
    }

    let rows: Vec<(&PromptItem, bool)> = entries.iter().map(|e| (&e.item, e.is_favorite)).collect();
    println!();
    println!("{}", item_table(&rows, true));
    println!();
    println!(
        "  {} of {} entries",
        style(entries.len()).bold(),
        state.history.capacity()
    );
    println!();
    Ok(())
}

async fn latest_history(state: &AppState, prompt_type: &str, json: bool) -> Result<()> {
    let latest = state.history.latest(prompt_type).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&latest)?);
        return Ok(());
    }

    let Some(entry) = latest else {
        print_empty("history", prompt_type);
        return Ok(());
    };

    println!();
    println!(
        "  {} {}{}",
        style(&entry.item.id).dim(),
        style(display_name(&entry.item)).cyan().bold(),
        if entry.is_favorite {
            format!(" {}", style("*").yellow())
        } else {
            String::new()
        }
    );
    println!("  {}", style(format_time(entry.item.time)).dim());
    println!();
    println!("  {}", entry.item.prompt);
    println!();
    Ok(())
}

async fn clear_history(state: &AppState, prompt_type: &str, json: bool) -> Result<()> {
    state
        .history
        .clear(prompt_type)
        .await
        .with_context(|| format!("Failed to clear history for '{prompt_type}'"))?;

    if json {
        let result = serde_json::json!({ "type": prompt_type, "success": true });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!();
        println!(
            "  {} Cleared history for '{}'",
            style("ok").green(),
            style(prompt_type).cyan()
        );
        println!();
    }
    Ok(())
}

async fn list_favorites(state: &AppState, prompt_type: &str, json: bool) -> Result<()> {
    let favorites = state.favorites.list(prompt_type).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&favorites)?);
        return Ok(());
    }

    if favorites.is_empty() {
        print_empty("favorites", prompt_type);
        return Ok(());
    }

    let rows: Vec<(&PromptItem, bool)> = favorites.iter().map(|item| (item, true)).collect();
    println!();
    println!("{}", item_table(&rows, false));
    println!();
    Ok(())
}

fn print_empty(what: &str, prompt_type: &str) {
    println!();
    println!(
        "  {} No {} for '{}'",
        style("i").blue().bold(),
        what,
        style(prompt_type).cyan()
    );
    println!();
}

fn item_table(rows: &[(&PromptItem, bool)], show_favorite: bool) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![
        Cell::new("#").fg(Color::White),
        Cell::new("Name").fg(Color::White),
        Cell::new("Prompt").fg(Color::White),
        Cell::new("Time").fg(Color::White),
    ];
    if show_favorite {
        header.push(Cell::new("Fav").fg(Color::White));
    }
    table.set_header(header);

    for (index, (item, is_favorite)) in rows.iter().enumerate() {
        let mut row = vec![
            Cell::new(index).fg(Color::DarkGrey),
            Cell::new(display_name(item)).fg(Color::Cyan),
            Cell::new(preview(&item.prompt, 60)),
            Cell::new(format_time(item.time)).fg(Color::DarkGrey),
        ];
        if show_favorite {
            row.push(if *is_favorite {
                Cell::new("*").fg(Color::Yellow)
            } else {
                Cell::new("")
            });
        }
        table.add_row(row);
    }
    table
}

fn display_name(item: &PromptItem) -> &str {
    if item.name.is_empty() {
        "(unnamed)"
    } else {
        &item.name
    }
}

/// Truncate `text` to at most `max` characters, marking the cut.
fn preview(text: &str, max: usize) -> String {
    let single_line = text.replace('\n', " ");
    if single_line.chars().count() > max {
        let cut: String = single_line.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    } else {
        single_line
    }
}

fn format_time(unix_secs: i64) -> String {
    DateTime::from_timestamp(unix_secs, 0)
        .map(|utc| utc.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| unix_secs.to_string())
}
