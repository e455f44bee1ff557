use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use subtrack::view::SortMode;

mod cli_exec;

#[derive(Parser)]
#[command(name = "subtrack")]
#[command(about = "Track shared subscriptions and what they cost you", long_about = None)]
struct Cli {
    /// Client data directory
    #[arg(long, global = true, default_value = subtrack::home::HOME_DIR)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the client data directory
    Init {
        /// Re-initialize if the directory already holds a config
        #[arg(long)]
        force: bool,
    },

    /// Point the client at a document store and sign in as an account
    Login {
        #[arg(long)]
        url: String,
        #[arg(long)]
        token: String,
        #[arg(long)]
        email: String,
    },

    /// Sign out and drop the mirrored subscriptions
    Logout,

    /// Create the account document (name and surname) for the signed-in account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        surname: String,
    },

    /// List catalog services
    Services {
        /// Case-insensitive substring of the service name
        #[arg(long)]
        search: Option<String>,
        /// Category to show, or "all"
        #[arg(long, default_value = "all")]
        category: String,
        /// Read the catalog from the remote even if it is mirrored
        #[arg(long)]
        refresh: bool,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// List a service's plans, cheapest first
    Plans {
        service: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the account's subscriptions
    Subs {
        #[command(subcommand)]
        command: SubsCommands,
    },

    /// Subscription count and monthly / annual spend
    Summary {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the account profile
    Profile {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change device settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
}

#[derive(Subcommand)]
enum SubsCommands {
    /// List subscriptions
    List {
        #[arg(long, value_enum, default_value_t = SortMode::PriceAscending)]
        sort: SortMode,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Subscribe to a service plan
    Add(SubscriptionArgs),

    /// Change the plan, price or person count of a subscription
    Edit(SubscriptionArgs),

    /// Remove a subscription
    Remove { service: String },
}

#[derive(clap::Args)]
struct SubscriptionArgs {
    service: String,
    #[arg(long)]
    plan: String,
    /// Plan price; a decimal comma is accepted
    #[arg(long)]
    price: String,
    /// People sharing the plan
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    persons: i64,
}

#[derive(Subcommand)]
enum SettingsCommands {
    /// Show device settings
    Show {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Change device settings
    Set {
        #[arg(long)]
        dark_mode: Option<bool>,
        #[arg(long)]
        language: Option<String>,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    subtrack::logging::init("warn");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("start tokio runtime")?;
    runtime.block_on(cli_exec::handle_command(&cli.data_dir, cli.command))
}
