// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `courier doctor` command implementation.
//!
//! Runs diagnostic checks against the Courier environment to identify
//! configuration and connectivity problems before starting the relay.

use std::io::IsTerminal;
use std::time::{Duration, Instant};

use courier_config::CourierConfig;
use courier_core::{CourierError, HealthStatus, RelayAdapter};
use courier_models::ModelRegistry;
use courier_openrouter::OpenRouterGateway;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CheckStatus {
    /// Check passed successfully.
    Pass,
    /// Check passed with a warning.
    Warn,
    /// Check failed.
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
struct CheckResult {
    name: String,
    status: CheckStatus,
    message: String,
    duration: Duration,
}

fn check(name: &str, status: CheckStatus, message: impl Into<String>, started: Instant) -> CheckResult {
    CheckResult {
        name: name.to_string(),
        status,
        message: message.into(),
        duration: started.elapsed(),
    }
}

/// Runs the `courier doctor` command.
///
/// With `--plain`, disables colored output. Returns an error (exit code 1)
/// when any check fails.
pub async fn run_doctor(config: &CourierConfig, plain: bool) -> Result<(), CourierError> {
    let use_color = !plain && std::io::stdout().is_terminal();

    let results = vec![
        check_registry(config),
        check_telegram_token(config),
        check_openrouter_key(config),
        check_gateway(config).await,
    ];

    println!();
    println!("  courier doctor");
    println!("  {}", "-".repeat(50));

    let mut fail_count = 0;
    let mut warn_count = 0;

    for result in &results {
        let duration_ms = result.duration.as_millis();
        let line = match result.status {
            CheckStatus::Pass => {
                if use_color {
                    use colored::Colorize;
                    format!(
                        "    {} {:<16} {} ({duration_ms}ms)",
                        "✓".green(),
                        result.name,
                        result.message
                    )
                } else {
                    format!(
                        "    [OK]   {:<16} {} ({duration_ms}ms)",
                        result.name, result.message
                    )
                }
            }
            CheckStatus::Warn => {
                warn_count += 1;
                if use_color {
                    use colored::Colorize;
                    format!(
                        "    {} {:<16} {} ({duration_ms}ms)",
                        "!".yellow(),
                        result.name,
                        result.message.yellow()
                    )
                } else {
                    format!(
                        "    [WARN] {:<16} {} ({duration_ms}ms)",
                        result.name, result.message
                    )
                }
            }
            CheckStatus::Fail => {
                fail_count += 1;
                if use_color {
                    use colored::Colorize;
                    format!(
                        "    {} {:<16} {} ({duration_ms}ms)",
                        "✗".red(),
                        result.name,
                        result.message.red()
                    )
                } else {
                    format!(
                        "    [FAIL] {:<16} {} ({duration_ms}ms)",
                        result.name, result.message
                    )
                }
            }
        };
        println!("{line}");
    }

    println!("  {}", "-".repeat(50));
    println!(
        "  {} checks, {} warnings, {} failures",
        results.len(),
        warn_count,
        fail_count
    );
    println!();

    if fail_count > 0 {
        Err(CourierError::Internal(format!(
            "{fail_count} doctor check(s) failed"
        )))
    } else {
        Ok(())
    }
}

/// Verifies the model registry builds from config.
fn check_registry(config: &CourierConfig) -> CheckResult {
    let started = Instant::now();
    match ModelRegistry::from_config(&config.models) {
        Ok(registry) => check(
            "models",
            CheckStatus::Pass,
            format!("{} selectable models", registry.len()),
            started,
        ),
        Err(e) => check("models", CheckStatus::Fail, e.to_string(), started),
    }
}

/// Verifies a Telegram bot token is available.
fn check_telegram_token(config: &CourierConfig) -> CheckResult {
    let started = Instant::now();
    let from_env = std::env::var("TELEGRAM_BOT_TOKEN").is_ok_and(|t| !t.is_empty());
    match (&config.telegram.bot_token, from_env) {
        (Some(token), _) if !token.is_empty() => {
            check("telegram", CheckStatus::Pass, "bot token configured", started)
        }
        (_, true) => check(
            "telegram",
            CheckStatus::Pass,
            "bot token from TELEGRAM_BOT_TOKEN",
            started,
        ),
        _ => check(
            "telegram",
            CheckStatus::Fail,
            "no bot token (set telegram.bot_token or TELEGRAM_BOT_TOKEN)",
            started,
        ),
    }
}

/// Verifies an OpenRouter API key is available.
fn check_openrouter_key(config: &CourierConfig) -> CheckResult {
    let started = Instant::now();
    let from_env = std::env::var("OPENROUTER_API_KEY").is_ok_and(|k| !k.is_empty());
    match (&config.openrouter.api_key, from_env) {
        (Some(key), _) if !key.is_empty() => {
            check("openrouter", CheckStatus::Pass, "API key configured", started)
        }
        (_, true) => check(
            "openrouter",
            CheckStatus::Pass,
            "API key from OPENROUTER_API_KEY",
            started,
        ),
        _ => check(
            "openrouter",
            CheckStatus::Fail,
            "no API key (set openrouter.api_key or OPENROUTER_API_KEY)",
            started,
        ),
    }
}

/// Probes OpenRouter connectivity. Skipped with a warning when no key is
/// available (the key check already failed in that case).
async fn check_gateway(config: &CourierConfig) -> CheckResult {
    let started = Instant::now();
    let gateway = match OpenRouterGateway::new(&config.openrouter) {
        Ok(gateway) => gateway,
        Err(_) => {
            return check(
                "connectivity",
                CheckStatus::Warn,
                "skipped (no API key)",
                started,
            );
        }
    };

    match gateway.health_check().await {
        Ok(HealthStatus::Healthy) => {
            check("connectivity", CheckStatus::Pass, "OpenRouter reachable", started)
        }
        Ok(HealthStatus::Degraded(detail)) | Ok(HealthStatus::Unhealthy(detail)) => {
            check("connectivity", CheckStatus::Fail, detail, started)
        }
        Err(e) => check("connectivity", CheckStatus::Fail, e.to_string(), started),
    }
}
