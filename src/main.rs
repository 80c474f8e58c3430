// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::time::Duration;

use axum::{extract::Request, ServiceExt};
use axum_server::{tls_rustls::RustlsConfig, Handle};
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;
use tracing_subscriber::{fmt, EnvFilter};

use classifieds_server::{
    api::router,
    auth::JwksManager,
    config::{LogFormat, ServerConfig, DEFAULT_LOG_FILTER},
    state::{AppState, AuthConfig},
    storage::{JsonStorage, StoragePaths},
};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

fn init_tracing(format: LogFormat) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;
    init_tracing(config.log_format).map_err(|e| e.to_string())?;

    let mut storage = JsonStorage::new(StoragePaths::new(&config.data_dir));
    storage.initialize()?;
    tracing::info!(data_dir = %config.data_dir.display(), "Storage initialized");

    let auth_config = match &config.jwks_url {
        Some(url) => {
            let jwks = JwksManager::new(url.as_str())?;
            tracing::info!(jwks_url = %jwks.jwks_url(), "JWT verification enabled");
            AuthConfig::verified(jwks, config.issuer.clone(), config.audience.clone())
        }
        None => {
            tracing::warn!("JWKS_URL not set, accepting unsigned tokens (development mode)");
            AuthConfig::default()
        }
    };

    let state = AppState::new(storage).with_auth_config(auth_config);
    let app = NormalizePathLayer::trim_trailing_slash().layer(router(state));
    let service = ServiceExt::<Request>::into_make_service(app);

    let handle = Handle::new();
    let shutdown_handle = handle.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown_handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
    });

    match &config.tls {
        Some(tls) => {
            rustls::crypto::ring::default_provider()
                .install_default()
                .map_err(|_| "Failed to install rustls crypto provider")?;
            let tls_config = RustlsConfig::from_pem_file(&tls.cert, &tls.key).await?;

            tracing::info!(addr = %config.bind_addr, "Classifieds server listening on https (docs at /docs)");
            axum_server::bind_rustls(config.bind_addr, tls_config)
                .handle(handle)
                .serve(service)
                .await?;
        }
        None => {
            tracing::info!(addr = %config.bind_addr, "Classifieds server listening on http (docs at /docs)");
            axum_server::bind(config.bind_addr)
                .handle(handle)
                .serve(service)
                .await?;
        }
    }

    tracing::info!("Server stopped");
    Ok(())
}
