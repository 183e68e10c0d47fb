/*
 * Responsibility
 * - logging / panic hook setup
 * - Config -> process-level dependencies (identity client, order book) -> Router
 * - axum::serve()
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::repos::order_repo::OrderRepo;
use crate::services::identity::HttpTokenValidator;
use crate::state::AppState;
use crate::{api, middleware};

fn init_tracing() {
    // RUST_LOG wins when set, e.g.
    // RUST_LOG=info,orders_service=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // stderr can be hidden depending on how the process is launched
        tracing::error!(?info, "panic");

        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting orders service in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build process-level services once and inject them into the shared state.
pub fn build_state(config: &Config) -> Result<AppState> {
    // One pooled client for every request to the identity service.
    let client = HttpTokenValidator::client_builder()
        .build()
        .context("failed to build identity service HTTP client")?;

    let validator = HttpTokenValidator::new(
        client,
        &config.admin_service_url,
        config.identity_timeout,
    )
    .context("invalid ADMIN_SERVICE_URL")?;

    tracing::info!(
        endpoint = %validator.endpoint(),
        timeout_ms = config.identity_timeout.as_millis() as u64,
        "delegating authentication to identity service"
    );

    Ok(AppState::new(Arc::new(validator), OrderRepo::new()))
}

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes(&state))
        .with_state(state);

    middleware::http::apply(router)
}
