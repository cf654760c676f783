//! Penca background worker.
//!
//! With no arguments, runs the interval scheduler until SIGINT. With
//! `run <job> [args]`, executes one job and prints its JSON report.
//!
//! Environment variables:
//! - `DATABASE_URL` (required): Postgres connection string
//! - `SPORTS_PROVIDER`: `mock` (default) or `api-football`
//! - `SPORTS_API_KEY`: API key, required for `api-football`
//! - `SPORTS_API_BASE_URL`: provider base URL override
//! - `SYNC_SEASON_ID`, `SYNC_COMPETITION_EXTERNAL_ID`, `SYNC_YEAR`:
//!   enable scheduled fixture sync (all three required)
//! - `INVITATION_RETENTION_DAYS`, `AUDIT_LOG_RETENTION_DAYS`,
//!   `TOKEN_RETENTION_DAYS`: retention defaults
//! - `RUST_LOG`: tracing filter (default `penca_worker=debug`)

use std::process::ExitCode;
use std::sync::Arc;

use sqlx::PgPool;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use penca_provider::cache::ResponseCache;
use penca_provider::{build_provider, ProviderConfig};
use penca_worker::config::WorkerConfig;
use penca_worker::runner::{self, JobName};
use penca_worker::scheduler::{self, SchedulerDeps};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "penca_worker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match WorkerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid worker configuration");
            return ExitCode::from(1);
        }
    };

    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::error!("DATABASE_URL must be set");
            return ExitCode::from(1);
        }
    };

    let pool = match penca_db::create_pool(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to database");
            return ExitCode::from(1);
        }
    };
    if let Err(e) = penca_db::health_check(&pool).await {
        tracing::error!(error = %e, "Database health check failed");
        return ExitCode::from(1);
    }
    if let Err(e) = penca_db::run_migrations(&pool).await {
        tracing::error!(error = %e, "Failed to run migrations");
        return ExitCode::from(1);
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None => run_scheduler(pool, config).await,
        Some("run") => run_one_shot(pool, config, &args[1..]).await,
        Some(other) => {
            eprintln!("Unknown command: {other}");
            eprintln!("Usage: penca-worker [run <job> [args]]");
            ExitCode::from(2)
        }
    }
}

async fn run_scheduler(pool: PgPool, config: WorkerConfig) -> ExitCode {
    let cache = Arc::new(ResponseCache::new());
    let provider = match build_provider(
        config.provider_kind,
        &ProviderConfig {
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            retry: Default::default(),
        },
        cache.clone(),
    ) {
        Ok(provider) => Arc::from(provider),
        Err(e) => {
            tracing::error!(error = %e, "Failed to build sports provider");
            return ExitCode::from(1);
        }
    };

    let cancel = CancellationToken::new();
    let scheduler = tokio::spawn(scheduler::run(
        SchedulerDeps {
            pool,
            provider,
            cache,
            config,
        },
        cancel.clone(),
    ));

    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Shutdown signal received");
    }
    cancel.cancel();
    let _ = scheduler.await;
    ExitCode::SUCCESS
}

async fn run_one_shot(pool: PgPool, config: WorkerConfig, args: &[String]) -> ExitCode {
    let name = match args.first().map(String::as_str) {
        Some(raw) => match JobName::parse(raw) {
            Some(name) => name,
            None => {
                eprintln!("Unknown job: {raw}");
                print_job_names();
                return ExitCode::from(2);
            }
        },
        None => {
            eprintln!("Usage: penca-worker run <job> [args]");
            print_job_names();
            return ExitCode::from(2);
        }
    };

    match runner::run_job(&pool, &config, name, &args[1..]).await {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(job = name.as_str(), error = %e, "Job failed");
            ExitCode::from(1)
        }
    }
}

fn print_job_names() {
    eprintln!("Valid jobs:");
    for job in JobName::ALL {
        eprintln!("  {}", job.as_str());
    }
}
