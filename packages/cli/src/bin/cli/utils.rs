// ABOUTME: Shared helpers for the command-line client
// ABOUTME: Table styling, text truncation and client state access

use anyhow::Context;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use sleep_cli::client_state::ClientState;
use sleep_core::client_state_file;

/// A table with the house style applied
pub fn new_table<I, T>(header: I) -> Table
where
    I: IntoIterator<Item = T>,
    T: Into<comfy_table::Cell>,
{
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", cut)
}

pub fn load_state() -> anyhow::Result<ClientState> {
    ClientState::load(&client_state_file()).context("Failed to load client state")
}

pub fn save_state(state: &ClientState) -> anyhow::Result<()> {
    state
        .save(&client_state_file())
        .context("Failed to save client state")
}
