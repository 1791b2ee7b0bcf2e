//! CLI administration tool for refurl.
//!
//! Provides the administrative password-rotation path and database checks
//! without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Rotate a user's password (prompts when --password is omitted)
//! cargo run --bin admin -- user reset-password --email a@x.com
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `BCRYPT_COST` (optional): cost factor for the new hash (default: 12)

use refurl::domain::entities::User;
use refurl::domain::repositories::UserRepository;
use refurl::infrastructure::persistence::PgUserRepository;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing refurl.
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
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Rotate a user's password hash
    ResetPassword {
        /// Email of the account to rotate
        #[arg(short, long)]
        email: String,

        /// New password (prompted interactively if not provided)
        #[arg(short, long)]
        password: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
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

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => match action {
            UserAction::ResetPassword {
                email,
                password,
                yes,
            } => reset_password(pool, &email, password, yes).await?,
        },
        Commands::Db { action } => match action {
            DbAction::Check => db_check(pool).await?,
        },
    }

    Ok(())
}

/// Rotates the stored password hash for one account.
async fn reset_password(
    pool: PgPool,
    email: &str,
    password: Option<String>,
    yes: bool,
) -> Result<()> {
    let repository = PgUserRepository::new(Arc::new(pool));

    let user: User = repository
        .find_by_email(email)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?
        .with_context(|| format!("No user with email '{email}'"))?;

    println!("Account: {} ({})", user.email.cyan(), user.name);

    if !yes {
        let proceed = Confirm::new()
            .with_prompt("Rotate this user's password?")
            .default(false)
            .interact()?;
        if !proceed {
            println!("{}", "Aborted".yellow());
            return Ok(());
        }
    }

    let password = match password {
        Some(p) => p,
        None => Password::new()
            .with_prompt("New password")
            .with_confirmation("Repeat password", "Passwords do not match")
            .interact()?,
    };

    if password.len() < 6 {
        bail!("Password must be at least 6 characters");
    }

    let cost = std::env::var("BCRYPT_COST")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(12);
    let hash = bcrypt::hash(&password, cost).context("Failed to hash password")?;

    let updated = repository
        .update_password_hash(user.id, &hash)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    if updated {
        println!("{} password rotated for {}", "OK".green().bold(), user.email);
    } else {
        bail!("Update matched no rows; user may have been removed");
    }

    Ok(())
}

/// Verifies database connectivity and prints basic counts.
async fn db_check(pool: PgPool) -> Result<()> {
    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await?;
    let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(&pool)
        .await?;

    println!("{} database reachable", "OK".green().bold());
    println!("  users: {users}");
    println!("  links: {links}");

    Ok(())
}
