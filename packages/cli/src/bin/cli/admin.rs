// ABOUTME: Admin commands for the command-line client
// ABOUTME: Login, logout and the team application review queue

use clap::Subcommand;
use colored::*;
use inquire::{Password, PasswordDisplayMode, Text};
use sleep_core::{
    pending_count, sort_for_review, ApplicationStatus, ReviewDecision, TeamApplication, User,
};
use sleep_storage::{CatalogStore, RemoteStore, StorageError};

use super::utils::{load_state, new_table, save_state, truncate};

#[derive(Subcommand)]
pub enum AdminCommands {
    /// Log in to the admin back-office
    Login {
        #[arg(short, long)]
        email: Option<String>,
        /// Prompted for when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show team applications, pending first
    Applications,
    /// Approve or reject a team application
    Review {
        /// Application ID
        id: u32,
        /// approve or reject
        decision: ReviewDecision,
    },
}

pub async fn handle_admin_command(command: AdminCommands, api_url: &str) -> anyhow::Result<()> {
    match command {
        AdminCommands::Login { email, password } => login(api_url, email, password).await,
        AdminCommands::Logout => logout(),
        AdminCommands::Applications => list_applications(api_url).await,
        AdminCommands::Review { id, decision } => review(api_url, id, decision).await,
    }
}

async fn login(api_url: &str, email: Option<String>, password: Option<String>) -> anyhow::Result<()> {
    let email = match email {
        Some(e) => e,
        None => Text::new("Email:").prompt()?,
    };
    let password = match password {
        Some(p) => p,
        None => Password::new("Password:")
            .with_display_mode(PasswordDisplayMode::Masked)
            .without_confirmation()
            .prompt()?,
    };

    let store = RemoteStore::new(api_url)?;
    let user = match store.login(&email, &password).await {
        Ok(user) => user,
        Err(StorageError::InvalidCredentials) => {
            anyhow::bail!("Invalid credentials");
        }
        Err(e) => return Err(e.into()),
    };

    let mut state = load_state()?;
    println!(
        "{} Logged in as {}",
        "✓".green().bold(),
        user.email.bold()
    );
    state.session = Some(user);
    save_state(&state)?;

    Ok(())
}

fn logout() -> anyhow::Result<()> {
    let mut state = load_state()?;

    match state.logout() {
        Some(user) => {
            save_state(&state)?;
            println!("{} Logged out {}", "✓".green().bold(), user.email);
        }
        None => println!("{}", "Not logged in".yellow()),
    }

    Ok(())
}

/// Remote store carrying the stored session token
fn authorized_store(api_url: &str) -> anyhow::Result<(RemoteStore, User)> {
    let state = load_state()?;
    let Some(user) = state.session else {
        anyhow::bail!("Not logged in. Run 'projectsleep login' first");
    };

    let store = RemoteStore::new(api_url)?.with_token(user.token.clone());
    Ok((store, user))
}

fn session_hint(err: StorageError) -> anyhow::Error {
    match err {
        StorageError::Unauthorized => {
            anyhow::anyhow!("Session rejected by the server. Run 'projectsleep login' again")
        }
        other => other.into(),
    }
}

fn colored_status(status: ApplicationStatus) -> ColoredString {
    match status {
        ApplicationStatus::Pending => status.as_str().yellow().bold(),
        ApplicationStatus::Approved => status.as_str().green(),
        ApplicationStatus::Rejected => status.as_str().red(),
    }
}

fn print_applications(applications: &[TeamApplication]) {
    let mut table = new_table(vec![
        "ID", "Name", "Email", "Role", "Portfolio", "Status", "Submitted",
    ]);

    for app in applications {
        table.add_row(vec![
            app.id.to_string(),
            app.name.clone(),
            app.email.clone(),
            app.role.clone(),
            truncate(&app.github, 30),
            colored_status(app.status).to_string(),
            app.created_at.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }

    println!("{}", table);
}

async fn list_applications(api_url: &str) -> anyhow::Result<()> {
    let (store, _) = authorized_store(api_url)?;
    let mut applications = store.list_applications().await.map_err(session_hint)?;

    if applications.is_empty() {
        println!("{}", "No applications yet".yellow());
        return Ok(());
    }

    sort_for_review(&mut applications);

    println!("{}", "📝 Team Applications".blue().bold());
    println!();
    print_applications(&applications);
    println!(
        "Pending: {} of {}",
        pending_count(&applications).to_string().yellow().bold(),
        applications.len()
    );

    Ok(())
}

async fn review(api_url: &str, id: u32, decision: ReviewDecision) -> anyhow::Result<()> {
    let (store, user) = authorized_store(api_url)?;

    let application = match store.set_application_status(id, decision).await {
        Ok(app) => app,
        Err(StorageError::NotFound { .. }) => {
            anyhow::bail!("Application {} not found", id);
        }
        Err(e) => return Err(session_hint(e)),
    };

    println!(
        "{} Application {} from {} is now {} (by {})",
        "✓".green().bold(),
        application.id,
        application.name.bold(),
        colored_status(application.status),
        user.email
    );
    let message = application.message.trim();
    if !message.is_empty() {
        println!("{}", truncate(message, 120).dimmed());
    }

    Ok(())
}
