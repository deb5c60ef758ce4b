//! CLI administration tool for yacut.
//!
//! Creates and inspects short links and checks the database without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a link with a random short id
//! cargo run --bin admin -- link create https://example.com
//!
//! # Create a link with a custom short id (prompts for the URL)
//! cargo run --bin admin -- link create --custom-id docs
//!
//! # Show the original URL of a short id
//! cargo run --bin admin -- link show docs
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` (or `DB_*` components), `BASE_URL` and
//! the short id policy variables.

use yacut::application::services::LinkRegistry;
use yacut::config::{self, Config};
use yacut::infrastructure::persistence::PgLinkRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
use sqlx::PgPool;
use std::sync::Arc;

const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// CLI tool for managing yacut.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Create a short link
    Create {
        /// URL to shorten (prompted for when omitted)
        url: Option<String>,

        /// Custom short id (random when omitted)
        #[arg(short, long)]
        custom_id: Option<String>,

        /// Base URL used to print the short link
        #[arg(short, long, env = "BASE_URL", default_value = DEFAULT_BASE_URL)]
        base_url: String,
    },

    /// Show the original URL of a short id
    Show {
        /// Short id to look up
        short: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;

    let pool = PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &config, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches link commands.
async fn handle_link_action(action: LinkAction, config: &Config, pool: &PgPool) -> Result<()> {
    let repository = Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));
    let registry = LinkRegistry::new(repository, config.policy()?);

    match action {
        LinkAction::Create {
            url,
            custom_id,
            base_url,
        } => create_link(&registry, url, custom_id, &base_url).await?,
        LinkAction::Show { short } => show_link(&registry, &short).await?,
    }

    Ok(())
}

/// Creates a short link, prompting for the URL when it was not given.
async fn create_link(
    registry: &LinkRegistry,
    url: Option<String>,
    custom_id: Option<String>,
    base_url: &str,
) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    let url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("URL to shorten")
            .interact_text()?,
    };

    let custom_id = custom_id.filter(|id| !id.trim().is_empty());

    let link = registry
        .create_link(&url, custom_id.as_deref())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("{}", "✅ Link created successfully!".green().bold());
    println!();
    println!("  Original: {}", link.original.cyan());
    println!(
        "  Short:    {}",
        LinkRegistry::build_short_url(&link, base_url)
            .bright_yellow()
            .bold()
    );
    println!();

    Ok(())
}

/// Prints the original URL of a short id.
async fn show_link(registry: &LinkRegistry, short: &str) -> Result<()> {
    let link = registry
        .resolve_short(short)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    match link {
        Some(link) => {
            println!("  Short:    {}", link.short.cyan());
            println!("  Original: {}", link.original.bright_white());
            println!(
                "  Created:  {}",
                link.created_at
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .bright_black()
            );
        }
        None => println!("{}", format!("⚠️  Short id '{}' not found", short).yellow()),
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  Links:      {}",
                links_count.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}
