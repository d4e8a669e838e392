use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use siwes_api::auth::demo::DemoDirectory;
use siwes_api::auth::AuthBackend;
use siwes_api::config::ServerConfig;
use siwes_api::router::build_app_router;
use siwes_api::state::AppState;
use siwes_db::seed::{demo_dataset, load_seed_file};
use siwes_identity::events::DEFAULT_CAPACITY;
use siwes_identity::{auth_channel, IdentityProvider, ProviderConfig, ProviderError, RestIdentityProvider};
use siwes_session::{SessionListener, SessionStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "siwes_api=debug,siwes_session=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Portal data ---
    let dataset = match &config.seed_path {
        Some(path) => load_seed_file(path)
            .with_context(|| format!("Failed to load seed data from {}", path.display()))?,
        None => {
            tracing::info!("No SEED_PATH set, using built-in demo data");
            demo_dataset()
        }
    };
    let store = siwes_db::create_store(dataset);

    // --- Identity provider ---
    // The REST client reports rejected session tokens on the same channel
    // the sign-in handler publishes to.
    let provider = ProviderConfig::from_env().map(|provider_config| {
        tracing::info!(url = %provider_config.url, "Identity provider configured");
        let (events, receiver) = auth_channel(DEFAULT_CAPACITY);
        let client = RestIdentityProvider::new(provider_config).with_events(events.clone());
        (Arc::new(client) as Arc<dyn IdentityProvider>, events, receiver)
    });
    if provider.is_none() {
        tracing::warn!(error = %ProviderError::ConfigurationMissing, "Running in demo mode");
    }

    // --- Session store ---
    let session = SessionStore::open(&config.session_storage_path);
    let session = Arc::new(match &provider {
        Some((provider, _, _)) => session.with_provider(Arc::clone(provider)),
        None => session,
    });

    // --- Auth backend + session listener ---
    let (auth, listener_handle) = match provider {
        Some((provider, events, receiver)) => {
            let handle = tokio::spawn(SessionListener::run(
                Arc::clone(&session),
                Arc::clone(&provider),
                receiver,
            ));
            tracing::info!("Session listener started");
            (AuthBackend::Provider { provider, events }, Some(handle))
        }
        None => {
            let directory = DemoDirectory::new(&config.demo_password)
                .map_err(|e| anyhow::anyhow!("Failed to hash demo password: {e}"))?;
            (AuthBackend::Demo(directory), None)
        }
    };

    // --- App state ---
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
        session,
        auth: Arc::new(auth),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().context("Invalid HOST address")?,
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // --- Post-shutdown cleanup ---
    // The router (and with it the last event sender) is gone, so the
    // listener drains and exits.
    if let Some(handle) = listener_handle {
        let timeout = Duration::from_secs(config.shutdown_timeout_secs);
        if tokio::time::timeout(timeout, handle).await.is_err() {
            tracing::warn!("Session listener did not stop in time");
        }
    }

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
