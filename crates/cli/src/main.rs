//! Tillpoint CLI - Seeding and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Verify document store connectivity
//! tp-cli check
//!
//! # Create an owner account
//! tp-cli owner create -e owner@example.com -p 'a-strong-password'
//!
//! # Seed demo catalog data
//! tp-cli seed
//! ```
//!
//! # Commands
//!
//! - `check` - Ping the document store
//! - `owner create` - Create an owner account
//! - `seed` - Seed demo stores, products, and customers

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tp-cli")]
#[command(author, version, about = "Tillpoint CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify document store connectivity
    Check,
    /// Manage owner accounts
    Owner {
        #[command(subcommand)]
        action: OwnerAction,
    },
    /// Seed demo catalog data into the document store
    Seed,
}

#[derive(Subcommand)]
enum OwnerAction {
    /// Create a new owner account
    Create {
        /// Owner email address
        #[arg(short, long)]
        email: String,

        /// Owner password (min 8 characters)
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Check => commands::check::run().await?,
        Commands::Owner { action } => match action {
            OwnerAction::Create { email, password } => {
                commands::owner::create(&email, &password).await?;
            }
        },
        Commands::Seed => commands::seed::run().await?,
    }
    Ok(())
}
