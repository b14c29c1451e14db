use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use uuid::Uuid;

use medicalendar_api::auth::{jwt, secret};
use medicalendar_api::config::{Config, Severity};
use medicalendar_api::db::{self, PgRecordStore};
use medicalendar_api::{build_router, AppState};

#[derive(Debug, Parser)]
#[command(name = "medicalendar-api", version, about = "MediCalendar daily health records API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// Check the environment configuration and report problems.
    CheckEnv,
    /// Print freshly generated secrets suitable for JWT_SECRET.
    GenerateSecret {
        /// Secret size in bytes.
        #[arg(long, default_value_t = secret::DEFAULT_SECRET_BYTES)]
        length: usize,
    },
    /// Mint an access token for a user id.
    IssueToken {
        #[arg(long)]
        user: Uuid,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "medicalendar_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve().await,
        Command::CheckEnv => check_env(dotenv_loaded),
        Command::GenerateSecret { length } => generate_secret(length),
        Command::IssueToken { user } => {
            let config = Config::from_env()?;
            println!("{}", jwt::create_access_token(user, &config)?);
            Ok(())
        }
    }
}

async fn serve() -> anyhow::Result<()> {
    let config = Arc::new(Config::from_env()?);

    for finding in config.audit() {
        match finding.severity {
            Severity::Error => tracing::error!(key = finding.key, "{}", finding.message),
            Severity::Warning => tracing::warn!(key = finding.key, "{}", finding.message),
        }
    }

    let pool = db::pool::create_pool(&config)
        .await
        .context("Failed to create database pool")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations applied");

    let state = AppState::new(Arc::new(PgRecordStore::new(pool)), config.clone());
    let app = build_router(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn check_env(dotenv_loaded: bool) -> anyhow::Result<()> {
    println!("MediCalendar configuration check\n");

    if dotenv_loaded {
        println!("  ok    .env file loaded");
    } else {
        println!("  warn  no .env file found, using process environment only");
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            println!("  error {e:#}");
            anyhow::bail!("configuration is incomplete");
        }
    };

    let findings = config.audit();
    let errors = findings
        .iter()
        .filter(|f| f.severity == Severity::Error)
        .count();

    for finding in &findings {
        let label = match finding.severity {
            Severity::Error => "error",
            Severity::Warning => "warn ",
        };
        println!("  {label} {} {}", finding.key, finding.message);
    }
    println!(
        "\n{} error(s), {} warning(s)",
        errors,
        findings.len() - errors
    );

    if errors > 0 {
        anyhow::bail!("configuration has {errors} error(s)");
    }
    Ok(())
}

fn generate_secret(length: usize) -> anyhow::Result<()> {
    if length == 0 {
        anyhow::bail!("--length must be at least 1");
    }
    println!("Secrets from {length} random bytes:\n");
    println!("  hex (recommended for JWT_SECRET):");
    println!("    {}", secret::hex_secret(length));
    println!("\n  alphanumeric:");
    println!("    {}", secret::alphanumeric_secret(length));
    println!("\nPaste one into .env as JWT_SECRET and never commit it.");
    Ok(())
}
