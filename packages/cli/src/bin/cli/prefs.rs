use colored::*;
use sleep_cli::client_state::Theme;

use super::utils::{load_state, save_state};

/// Show preferences, or update the ones given
pub fn update_prefs(theme: Option<Theme>, language: Option<String>) -> anyhow::Result<()> {
    let mut state = load_state()?;

    let changed = theme.is_some() || language.is_some();
    if let Some(theme) = theme {
        state.theme = theme;
    }
    if let Some(language) = language {
        let language = language.trim().to_lowercase();
        if language.is_empty() {
            anyhow::bail!("Language code cannot be empty");
        }
        state.language = language;
    }

    if changed {
        save_state(&state)?;
        println!("{} Preferences saved", "✓".green().bold());
    }

    let theme_name = match state.theme {
        Theme::Light => "light",
        Theme::Dark => "dark",
    };
    println!("Theme:    {}", theme_name.cyan());
    println!("Language: {}", state.language.cyan());
    match &state.session {
        Some(user) => println!("Session:  {}", user.email.green()),
        None => println!("Session:  {}", "logged out".dimmed()),
    }

    Ok(())
}
