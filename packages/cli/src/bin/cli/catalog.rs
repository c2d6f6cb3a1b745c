// ABOUTME: Public catalog commands for the command-line client
// ABOUTME: ROM search, device, feature and team listings rendered as tables

use clap::Subcommand;
use colored::*;
use sleep_core::OsType;
use sleep_storage::{CatalogStore, RemoteStore, RomQuery};

use super::utils::{new_table, truncate};

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// Search the ROM catalog, newest uploads first
    Roms {
        /// Match against ROM title, device name or codename
        #[arg(short, long)]
        search: Option<String>,
        /// Only show these OS types (repeatable: SleepOS, AOSP, Port)
        #[arg(short = 't', long = "type")]
        types: Vec<OsType>,
    },
    /// List supported devices
    Devices,
    /// List landing page features
    Features,
    /// List the core team
    Team,
}

pub async fn handle_catalog_command(command: CatalogCommands, api_url: &str) -> anyhow::Result<()> {
    let store = RemoteStore::new(api_url)?;

    match command {
        CatalogCommands::Roms { search, types } => {
            let query = RomQuery::new()
                .search(search.unwrap_or_default())
                .with_types(types);
            list_roms(&store, &query).await
        }
        CatalogCommands::Devices => list_devices(&store).await,
        CatalogCommands::Features => list_features(&store).await,
        CatalogCommands::Team => list_team(&store).await,
    }
}

fn colored_os_type(os_type: OsType) -> ColoredString {
    match os_type {
        OsType::SleepOs => os_type.as_str().magenta().bold(),
        OsType::Aosp => os_type.as_str().green(),
        OsType::Port => os_type.as_str().yellow(),
    }
}

async fn list_roms(store: &RemoteStore, query: &RomQuery) -> anyhow::Result<()> {
    let roms = store.query_roms(query).await?;

    if roms.is_empty() {
        println!("{}", "No ROMs match your search".yellow());
        return Ok(());
    }

    println!("{}", "📦 ROM Downloads".blue().bold());
    println!();

    let mut table = new_table(vec![
        "ID", "Title", "Version", "Type", "Device", "Codename", "Size", "Uploaded", "Downloads",
    ]);

    for entry in &roms {
        let rom = &entry.rom;
        table.add_row(vec![
            rom.id.to_string(),
            truncate(&rom.title, 28),
            rom.version.clone(),
            colored_os_type(rom.os_type).to_string(),
            entry.device.name.clone(),
            entry.device.model.clone(),
            rom.file_size.clone(),
            rom.upload_date.format("%Y-%m-%d").to_string(),
            rom.download_count.to_string(),
        ]);
    }

    println!("{}", table);
    println!("Total: {} ROMs", roms.len().to_string().cyan());

    Ok(())
}

async fn list_devices(store: &RemoteStore) -> anyhow::Result<()> {
    let devices = store.list_devices().await?;

    println!("{}", "📱 Supported Devices".blue().bold());
    println!();

    let mut table = new_table(vec!["ID", "Name", "Codename", "Manufacturer"]);
    for device in &devices {
        table.add_row(vec![
            device.id.to_string(),
            device.name.clone(),
            device.model.clone(),
            device.manufacturer.clone(),
        ]);
    }

    println!("{}", table);
    println!("Total: {} devices", devices.len().to_string().cyan());

    Ok(())
}

async fn list_features(store: &RemoteStore) -> anyhow::Result<()> {
    let features = store.list_features().await?;

    println!("{}", "✨ Features".blue().bold());
    println!();

    let mut table = new_table(vec!["ID", "Title", "Description"]);
    for feature in &features {
        table.add_row(vec![
            feature.id.to_string(),
            feature.title.clone(),
            truncate(&feature.description, 60),
        ]);
    }

    println!("{}", table);

    Ok(())
}

async fn list_team(store: &RemoteStore) -> anyhow::Result<()> {
    let team = store.list_team().await?;

    println!("{}", "👥 Core Team".blue().bold());
    println!();

    let mut table = new_table(vec!["Name", "Role", "Country"]);
    for member in &team {
        table.add_row(vec![
            member.name.clone(),
            member.role.clone(),
            member.country_code.clone(),
        ]);
    }

    println!("{}", table);

    Ok(())
}
