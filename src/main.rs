use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, services::ServeDir, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use studio_booking_server::{config, db, handlers, AppState};

/// Maximum request body size (1 MB)
const MAX_BODY_SIZE: usize = 1024 * 1024;

#[derive(Parser)]
#[command(name = "studio-booking-server")]
#[command(about = "Booking intake API server for a photo studio site")]
struct Args {
    /// Enable debug mode to log all incoming booking submissions
    #[arg(short, long)]
    debug: bool,
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Best-effort env files; the original deployment shipped a studio.env
    dotenvy::from_filename("studio.env").ok();
    dotenvy::dotenv().ok();

    // Load config from config.toml in the same directory as the executable
    let cfg = config::load_config()?;

    // Environment variables override config file values
    let port: u16 = match std::env::var("STUDIO_PORT") {
        Ok(v) => v.parse().context("parse STUDIO_PORT")?,
        Err(_) => cfg.port,
    };
    let bind_addr = SocketAddr::from(([0, 0, 0, 0], port));

    // Fail fast: no database path, no server
    let db_path = config::require_db_path(&cfg)?;

    let session_secret = std::env::var("STUDIO_SESSION_SECRET")
        .ok()
        .or_else(|| cfg.session_secret.clone());

    let static_dir = std::env::var("STUDIO_STATIC_DIR").unwrap_or_else(|_| cfg.static_dir.clone());

    // Debug mode can be enabled via --debug flag, STUDIO_DEBUG env var, or config file
    let debug_mode = args.debug
        || std::env::var("STUDIO_DEBUG")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false)
        || cfg.debug;

    println!(
        "Starting studio-booking-server v{} on {}",
        env!("CARGO_PKG_VERSION"),
        bind_addr
    );
    println!("Database path: {}", db_path);
    println!("Static dir: {}", static_dir);
    if debug_mode {
        println!("[DEBUG] Debug mode enabled - will log all incoming bookings");
    }

    // Ensure DB directory exists
    if let Some(parent) = std::path::Path::new(&db_path).parent() {
        std::fs::create_dir_all(parent).ok();
    }

    // Initialize schema before the listener binds, so no request can
    // race table creation on a cold start.
    let _ = db::open_and_init(&db_path)?;
    tracing::info!(db_path = %db_path, "Database initialized");

    let state = Arc::new(AppState {
        db_path,
        session_secret,
        debug_mode,
    });

    // Build the router with all middleware
    let app = Router::new()
        // Health check endpoints
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::ready))
        // Booking API routes
        .route(
            "/api/bookings",
            post(handlers::create_booking).get(handlers::list_bookings),
        )
        // Everything else (including /) is served from the static dir
        .fallback_service(ServeDir::new(&static_dir))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE)),
        )
        .with_state(state);

    // TLS config: env vars override config file
    let cert_path = std::env::var("STUDIO_TLS_CERT")
        .ok()
        .or(cfg.tls_cert)
        .unwrap_or_default();
    let key_path = std::env::var("STUDIO_TLS_KEY")
        .ok()
        .or(cfg.tls_key)
        .unwrap_or_default();

    if !cert_path.is_empty() && !key_path.is_empty() {
        let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(cert_path, key_path)
            .await
            .context("load tls cert/key")?;

        let handle = axum_server::Handle::new();
        let shutdown_handle = handle.clone();

        tokio::spawn(async move {
            shutdown_signal().await;
            shutdown_handle.graceful_shutdown(Some(Duration::from_secs(30)));
        });

        axum_server::bind_rustls(bind_addr, tls_config)
            .handle(handle)
            .serve(app.into_make_service())
            .await
            .context("serve rustls")?;
    } else {
        let handle = axum_server::Handle::new();
        let shutdown_handle = handle.clone();

        tokio::spawn(async move {
            shutdown_signal().await;
            shutdown_handle.graceful_shutdown(Some(Duration::from_secs(30)));
        });

        axum_server::bind(bind_addr)
            .handle(handle)
            .serve(app.into_make_service())
            .await
            .context("serve http")?;
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}
