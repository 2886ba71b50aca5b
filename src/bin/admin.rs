//! CLI administration tool for shorturl.
//!
//! Read-only inspection of stored short links without going through HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Most recent links first
//! cargo run --bin admin -- links list --limit 20
//!
//! # One link in detail
//! cargo run --bin admin -- links show aB3dE
//!
//! # Link count and total hits
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_URL`, or `DB_HOST`/`DB_USER`/...): PostgreSQL connection
//! - `BASE_URL` (optional): prefix used when printing full short links

use shorturl::config::Config;
use shorturl::domain::entities::ShortLink;
use shorturl::domain::repositories::ShortLinkRepository;
use shorturl::infrastructure::persistence::PgShortLinkRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for inspecting shorturl.
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
    /// Inspect short links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum LinkAction {
    /// List links, newest first
    List {
        /// Maximum number of links to show
        #[arg(short, long, default_value_t = 20)]
        limit: i64,

        /// Number of links to skip
        #[arg(short, long, default_value_t = 0)]
        offset: i64,
    },

    /// Show a single link
    Show {
        /// 5-character short code
        code: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;
    let base_url = std::env::var("BASE_URL").unwrap_or_default();

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Links { action } => handle_link_action(action, &pool, &base_url).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_link_action(action: LinkAction, pool: &PgPool, base_url: &str) -> Result<()> {
    let repo = PgShortLinkRepository::new(Arc::new(pool.clone()));

    match action {
        LinkAction::List { limit, offset } => list_links(&repo, limit, offset).await?,
        LinkAction::Show { code } => show_link(&repo, &code, base_url).await?,
    }

    Ok(())
}

/// Lists stored links.
///
/// # Output Format
///
/// ```text
/// Short links
///
///   Code   Hits     Created            Original URL
///   -----------------------------------------------------------------
///   aB3dE  12       2024-01-15 10:30   https://example.com/very/long/path
/// ```
async fn list_links(repo: &PgShortLinkRepository, limit: i64, offset: i64) -> Result<()> {
    anyhow::ensure!(limit > 0, "--limit must be positive");
    anyhow::ensure!(offset >= 0, "--offset must not be negative");

    println!("{}", "Short links".bright_blue().bold());
    println!();

    let links = repo
        .list(limit, offset)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<6} {:<8} {:<18} {}",
        "Code".bright_white().bold(),
        "Hits".bright_white().bold(),
        "Created".bright_white().bold(),
        "Original URL".bright_white().bold()
    );
    println!("  {}", "-".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<6} {:<8} {:<18} {}",
            link.short_code.cyan(),
            link.hits.to_string().bright_green(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            truncate(&link.original_url, 60)
        );
    }

    println!();
    println!("  Shown: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

async fn show_link(repo: &PgShortLinkRepository, code: &str, base_url: &str) -> Result<()> {
    let link = repo
        .find_by_code(code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("No link with code '{}'", code))?;

    print_link(&link, base_url);
    Ok(())
}

fn print_link(link: &ShortLink, base_url: &str) {
    println!("{}", "Short link".bright_blue().bold());
    println!();
    println!("  Code:       {}", link.short_code.cyan());
    if !base_url.is_empty() {
        println!(
            "  Short URL:  {}/{}",
            base_url.trim_end_matches('/'),
            link.short_code
        );
    }
    println!("  Original:   {}", link.original_url);
    println!("  Hits:       {}", link.hits.to_string().bright_green().bold());
    println!(
        "  Created:    {}",
        link.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("  Creator IP: {}", link.creator_ip.bright_black());
    println!("  User agent: {}", link.creator_user_agent.bright_black());
    println!();
}

/// Displays link count and total hits.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    let repo = PgShortLinkRepository::new(Arc::new(pool.clone()));

    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let links_count = repo
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;
    let total_hits = repo
        .total_hits()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to sum hits: {}", e))?;

    println!(
        "  Links: {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Hits:  {}",
        total_hits.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
    }

    Ok(())
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", head)
}
