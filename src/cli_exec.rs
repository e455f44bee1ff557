use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use subtrack::home::{ClientHome, HttpCoordinator};
use subtrack::view::FetchState;

use crate::{Commands, SettingsCommands, SubsCommands, SubscriptionArgs};

mod account;
mod catalog;
mod settings;
mod subscriptions;

pub(crate) async fn handle_command(data_dir: &Path, command: Commands) -> Result<()> {
    let open = || ClientHome::open(data_dir);

    match command {
        Commands::Init { force } => {
            ClientHome::init(data_dir, force)?;
            println!("Initialized subtrack data at {}", data_dir.display());
        }
        Commands::Login { url, token, email } => {
            account::handle_login_command(&open()?, url, token, email)?
        }
        Commands::Logout => account::handle_logout_command(&open()?)?,
        Commands::Register { name, surname } => {
            account::handle_register_command(&open()?, &name, &surname).await?
        }
        Commands::Profile { json } => account::handle_profile_command(&open()?, json).await?,
        Commands::Services {
            search,
            category,
            refresh,
            json,
        } => {
            let home = open()?;
            catalog::handle_services_command(&home, search.as_deref(), &category, refresh, json)
                .await?
        }
        Commands::Plans { service, json } => {
            catalog::handle_plans_command(&open()?, &service, json).await?
        }
        Commands::Subs { command } => {
            subscriptions::handle_subs_command(&open()?, command).await?
        }
        Commands::Summary { json } => {
            subscriptions::handle_summary_command(&open()?, json).await?
        }
        Commands::Settings { command } => settings::handle_settings_command(&open()?, command)?,
    }
    Ok(())
}

/// Writes the coordinator's collection states back so the next invocation sees them.
fn save_session(home: &ClientHome, sync: &HttpCoordinator) -> Result<()> {
    home.write_session(&sync.session())
        .context("persist session state")
}

/// Turns a settled load into the command's outcome.
fn settled(state: &FetchState) -> Result<()> {
    match state {
        FetchState::Failure(message) => Err(anyhow::anyhow!("{}", message)),
        _ => Ok(()),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).with_context(|| format!("serialize {} json", what))?
    );
    Ok(())
}

fn money(amount: f64) -> String {
    format!("{:.2}", amount)
}
