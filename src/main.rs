//! User Service Client CLI
//!
//! Runs single operations against the user service, or watches its liveness.

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use user_service_client::{
    spawn_cleanup_task, spawn_ping_task, Config, HttpPinger, LivenessOracle, LoginOutcome,
    UserId, UserService,
};

#[derive(Parser)]
#[command(name = "user_service_client", about = "Talk to the user service")]
struct Cli {
    /// Base URL of the user service (overrides USER_SERVICE_URL)
    #[arg(long)]
    url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log a user in and print the legacy login code
    Login { username: String, password: String },
    /// Log a user out
    Logout { user_id: UserId },
    /// Fetch a user
    Get { user_id: UserId },
    /// Change a user's avatar
    SetAvatar { user_id: UserId, avatar: u32 },
    /// Change a user's signature
    SetSignature { user_id: UserId, signature: String },
    /// Change a user's title
    SetTitle { user_id: UserId, title: u32 },
    /// Change a user's campaign flags
    SetCampaignFlags { user_id: UserId, flags: u32 },
    /// Keep probing liveness until Ctrl+C
    Watch,
}

/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Start background ping (first ping runs immediately) and cache cleanup tasks
/// 4. Run the requested command
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_service_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(url) = &cli.url {
        config.set_base_url(url);
    }
    info!(
        "Configuration loaded: base_url={}, cache_max_entries={}, cache_ttl={}s, ping_interval={}s",
        config.base_url, config.cache_max_entries, config.cache_ttl, config.ping_interval
    );

    let pinger: Arc<dyn LivenessOracle> =
        Arc::new(HttpPinger::from_config(&config).context("building liveness pinger")?);

    let service = UserService::from_config(&config, pinger.clone())
        .context("building user service client")?;

    let handles = vec![
        spawn_ping_task(pinger, config.ping_interval),
        spawn_cleanup_task(service.cache(), config.cleanup_interval),
    ];

    let outcome = run(&service, cli.command).await;

    for handle in &handles {
        handle.abort();
    }
    outcome
}

async fn run(service: &UserService, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { username, password } => {
            let outcome = LoginOutcome::from(service.login(&username, &password).await);
            print_json(&serde_json::json!({ "userId": outcome.legacy_code() }))
        }
        Command::Logout { user_id } => {
            service.logout(user_id).await?;
            print_json(&serde_json::json!({ "loggedOut": user_id }))
        }
        Command::Get { user_id } => print_json(&service.get_user_by_id(user_id).await?),
        Command::SetAvatar { user_id, avatar } => {
            let user = service.get_user_by_id(user_id).await?;
            print_json(&service.set_user_avatar(&user, avatar).await?)
        }
        Command::SetSignature { user_id, signature } => {
            let user = service.get_user_by_id(user_id).await?;
            print_json(&service.set_user_signature(&user, signature).await?)
        }
        Command::SetTitle { user_id, title } => {
            let user = service.get_user_by_id(user_id).await?;
            print_json(&service.set_user_title(&user, title).await?)
        }
        Command::SetCampaignFlags { user_id, flags } => {
            let user = service.get_user_by_id(user_id).await?;
            print_json(&service.set_user_campaign_flags(&user, flags).await?)
        }
        Command::Watch => {
            shutdown_signal().await;
            print_json(&service.cache_stats().await)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
    }
}
