// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `courier serve` command implementation.
//!
//! Wires the session store, model registry, access policy, OpenRouter
//! gateway, and Telegram channel together, then runs the dispatcher until
//! ctrl-c.

use std::sync::Arc;

use courier_config::CourierConfig;
use courier_core::error::CourierError;
use courier_core::{CompletionGateway, HealthStatus, RelayAdapter, SessionStore};
use courier_models::ModelRegistry;
use courier_openrouter::OpenRouterGateway;
use courier_relay::{AccessPolicy, Relay};
use courier_session::MemorySessionStore;
use courier_telegram::TelegramChannel;
use tracing::{error, info, warn};

/// Runs the `courier serve` command.
pub async fn run_serve(config: CourierConfig) -> Result<(), CourierError> {
    // Initialize tracing subscriber.
    init_tracing(&config.agent.log_level);

    info!("starting courier serve");

    let registry = ModelRegistry::from_config(&config.models)?;
    info!(
        models = registry.len(),
        default_model = config.openrouter.default_model.as_str(),
        "model registry loaded"
    );

    let policy = AccessPolicy::from_ids(&config.telegram.allowed_users);
    if policy.is_open() {
        warn!("telegram.allowed_users is empty; relay is open to every account");
    } else {
        info!(
            allowed = config.telegram.allowed_users.len(),
            "access allow-list active"
        );
    }

    let store: Arc<dyn SessionStore> =
        Arc::new(MemorySessionStore::new(config.openrouter.default_model.clone()));

    let gateway = OpenRouterGateway::new(&config.openrouter).map_err(|e| {
        error!(error = %e, "failed to initialize OpenRouter gateway");
        eprintln!(
            "error: OpenRouter API key required. Set via config (openrouter.api_key) or OPENROUTER_API_KEY env var."
        );
        e
    })?;

    // Non-fatal connectivity probe; the relay surfaces per-exchange errors.
    match gateway.health_check().await {
        Ok(HealthStatus::Healthy) => info!("OpenRouter reachable"),
        Ok(status) => warn!(?status, "OpenRouter health check not healthy"),
        Err(e) => warn!(error = %e, "OpenRouter health check failed"),
    }

    let gateway: Arc<dyn CompletionGateway> = Arc::new(gateway);
    let relay = Arc::new(Relay::new(
        store,
        gateway,
        registry,
        policy,
        &config.session,
    ));

    let channel = TelegramChannel::new(&config.telegram, relay).map_err(|e| {
        error!(error = %e, "failed to initialize Telegram channel");
        eprintln!(
            "error: Telegram bot token required. Set via config (telegram.bot_token) or TELEGRAM_BOT_TOKEN env var."
        );
        e
    })?;

    channel.run().await;

    info!("courier serve shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("courier={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
