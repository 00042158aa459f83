//! CLI administration tool for static-host-rewriter.
//!
//! Runs the rewrite engine against the same configuration as the sidecar,
//! without going through HTTP. Useful for checking why a URL is or is not
//! rewritten and what the resolved domain set looks like.
//!
//! # Usage
//!
//! ```bash
//! # Rewrite a URL as an enqueued style
//! cargo run --bin admin -- rewrite https://example.com/style.css --context enqueued_style
//!
//! # List local hosts of tenant 2
//! cargo run --bin admin -- domains --tenant 2
//!
//! # Uploads base URL for tenant 2
//! cargo run --bin admin -- upload-url --tenant 2
//!
//! # Check backends
//! cargo run --bin admin -- cache check
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see `static_host_rewriter::config`.

use static_host_rewriter::application::services::{Decision, RewriteService};
use static_host_rewriter::config::{self, Config};
use static_host_rewriter::domain::entities::{RequestInfo, RewriteContext, Scheme};
use static_host_rewriter::server::{build_rewrite_service, connect_cache, connect_database};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;

/// CLI tool for inspecting static-host-rewriter.
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
    /// Rewrite a single URL and explain the decision
    Rewrite {
        /// Absolute or protocol-relative URL
        url: String,

        /// Emission point (e.g. enqueued_script, plugin_asset, third_party_static)
        #[arg(short, long, default_value = "enqueued_script")]
        context: RewriteContext,

        /// Tenant serving the page
        #[arg(short, long, default_value_t = 1)]
        tenant: i64,

        /// Scheme of the page request
        #[arg(short, long, default_value = "https")]
        scheme: Scheme,
    },

    /// List hosts considered local
    Domains {
        /// Only show hosts of this tenant
        #[arg(short, long)]
        tenant: Option<i64>,
    },

    /// Show the uploads base URL
    UploadUrl {
        #[arg(short, long, default_value_t = 1)]
        tenant: i64,
    },

    /// Cache operations
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Check cache connection
    Check,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info and directory row counts
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env().context("Invalid configuration")?;

    match cli.command {
        Commands::Rewrite {
            url,
            context,
            tenant,
            scheme,
        } => {
            let service = build_rewrite_service(&config).await?;
            handle_rewrite(&service, &url, context, RequestInfo::new(tenant, scheme)).await
        }
        Commands::Domains { tenant } => {
            let service = build_rewrite_service(&config).await?;
            handle_domains(&service, tenant).await
        }
        Commands::UploadUrl { tenant } => {
            let service = build_rewrite_service(&config).await?;
            handle_upload_url(&service, tenant)
        }
        Commands::Cache { action } => handle_cache_action(action, &config).await,
        Commands::Db { action } => handle_db_action(action, &config).await,
    }
}

/// Rewrites one URL and prints the outcome.
///
/// # Output Format
///
/// ```text
/// 🔁 Rewrite
///
///   Context:   enqueued_style
///   Input:     https://example.com/style.css
///   Output:    https://s.example.com/style.css
///   Decision:  REWRITTEN
/// ```
async fn handle_rewrite(
    service: &RewriteService,
    url: &str,
    context: RewriteContext,
    request: RequestInfo,
) -> Result<()> {
    println!("{}", "🔁 Rewrite".bright_blue().bold());
    println!();

    let decision = service.session(request).decide_for(url, context).await;

    println!("  Context:   {}", context.to_string().cyan());
    println!("  Input:     {}", url.bright_white());

    match decision {
        Decision::Rewritten(rewritten) => {
            println!("  Output:    {}", rewritten.bright_green().bold());
            println!("  Decision:  {}", "REWRITTEN".green());
        }
        Decision::Unchanged(reason) => {
            println!("  Output:    {}", url.bright_white());
            println!(
                "  Decision:  {} ({})",
                "UNCHANGED".yellow(),
                format!("{:?}", reason).bright_black()
            );
        }
    }
    println!();

    Ok(())
}

/// Lists the resolved domain set.
///
/// # Output Format
///
/// ```text
/// 🌐 Local Domains
///
///   Host                                     Tenant
///   ──────────────────────────────────────────────────
///   blog.example.com                         2
///   example.com                              1
/// ```
async fn handle_domains(service: &RewriteService, tenant: Option<i64>) -> Result<()> {
    println!("{}", "🌐 Local Domains".bright_blue().bold());
    println!();

    let domains = service
        .session(RequestInfo::default())
        .resolve_domains()
        .await;

    let rows: Vec<_> = domains
        .sorted()
        .into_iter()
        .filter(|row| tenant.is_none_or(|id| row.tenant_id == id))
        .collect();

    if rows.is_empty() {
        println!("{}", "  No domains found".yellow());
        println!();
        return Ok(());
    }

    println!(
        "  {:<40} {:<10}",
        "Host".bright_white().bold(),
        "Tenant".bright_white().bold()
    );
    println!("  {}", "─".repeat(50).bright_black());

    for row in &rows {
        println!(
            "  {:<40} {}",
            row.host.cyan(),
            row.tenant_id.to_string().bright_black()
        );
    }

    println!();
    println!("  Total: {}", rows.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

fn handle_upload_url(service: &RewriteService, tenant: i64) -> Result<()> {
    let session = service.session(RequestInfo::new(tenant, Scheme::Https));

    match session.upload_url() {
        Some(url) => println!("{}", url.bright_green()),
        None => println!(
            "{}",
            "⚠️  Static host not configured, uploads URL unchanged".yellow()
        ),
    }

    Ok(())
}

/// Handles cache diagnostic commands.
async fn handle_cache_action(action: CacheAction, config: &Config) -> Result<()> {
    match action {
        CacheAction::Check => {
            println!("{}", "🔍 Checking cache...".bright_blue());

            let cache = connect_cache(config).await;
            if !config.is_cache_enabled() {
                println!(
                    "{}",
                    "⚠️  Redis not configured, using in-process cache".yellow()
                );
            }

            if cache.health_check().await {
                println!(
                    "{}",
                    format!("✅ Cache OK ({})", cache.backend()).green().bold()
                );
            } else {
                anyhow::bail!("Cache health check failed ({})", cache.backend());
            }
        }
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, config: &Config) -> Result<()> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL or DB_* variables must be set")?;

    let pool = connect_database(database_url, config).await?;

    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(&pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(&pool)
                .await?;
            println!("  PostgreSQL: {}", version.bright_white());

            for table in [&config.tenants_table, &config.mapping_table] {
                let count: Result<i64, _> =
                    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
                        .fetch_one(&pool)
                        .await;

                match count {
                    Ok(count) => println!(
                        "  {:<24} {}",
                        table.cyan(),
                        count.to_string().bright_green().bold()
                    ),
                    Err(e) => println!("  {:<24} {}", table.cyan(), e.to_string().red()),
                }
            }
            println!();
        }
    }

    Ok(())
}
