//! Unique Items CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending database migrations
//! unique-items migrate run
//!
//! # Show which migrations have been applied
//! unique-items migrate status
//!
//! # Create an admin account
//! unique-items admin create -e admin@example.com
//!
//! # Seed the catalog with sample watches
//! unique-items seed products --count 12
//!
//! # Delete checkout drafts past their expiry
//! unique-items drafts prune
//! ```
//!
//! # Commands
//!
//! - `migrate` - Apply or inspect database migrations
//! - `admin create` - Create admin accounts
//! - `seed products` - Seed the catalog with sample data
//! - `drafts prune` - Remove expired checkout drafts

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "unique-items")]
#[command(author, version, about = "Unique Items CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
    /// Manage admin accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Seed the database with sample data
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
    /// Manage checkout drafts
    Drafts {
        #[command(subcommand)]
        action: DraftsAction,
    },
}

#[derive(Subcommand)]
enum MigrateAction {
    /// Apply pending migrations
    Run,
    /// Show applied and pending migrations
    Status,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin account
    Create {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin password (falls back to `ADMIN_PASSWORD` when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Insert sample published watches
    Products {
        /// Number of products to insert
        #[arg(long, default_value_t = 12)]
        count: u32,
    },
}

#[derive(Subcommand)]
enum DraftsAction {
    /// Delete checkout drafts whose expiry has lapsed
    Prune,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
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
        Commands::Migrate { action } => match action {
            MigrateAction::Run => commands::migrate::run().await?,
            MigrateAction::Status => commands::migrate::status().await?,
        },
        Commands::Admin { action } => match action {
            AdminAction::Create { email, password } => {
                commands::admin::create(&email, password.as_deref()).await?;
            }
        },
        Commands::Seed { target } => match target {
            SeedTarget::Products { count } => commands::seed::products(count).await?,
        },
        Commands::Drafts { action } => match action {
            DraftsAction::Prune => commands::drafts::prune().await?,
        },
    }
    Ok(())
}
