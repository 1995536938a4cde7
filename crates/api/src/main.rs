use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use campo_advisor::{GeminiClient, Unconfigured};
use campo_core::advisory::{AlertAdvisor, FieldImageGenerator};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use campo_api::background::simulation;
use campo_api::config::{AdvisorConfig, ServerConfig, SimulationSettings};
use campo_api::dashboard::Dashboard;
use campo_api::router::build_app_router;
use campo_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campo_api=debug,campo_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    let settings = SimulationSettings::from_env();
    let advisor_config = AdvisorConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        tick_interval_secs = settings.tick_interval.as_secs(),
        "Loaded server configuration"
    );

    // --- Database ---
    // The dashboard runs without the database; only the admin tables need it.
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = campo_db::create_lazy_pool(&database_url).expect("Invalid DATABASE_URL");

    match campo_db::health_check(&pool).await {
        Ok(()) => {
            tracing::info!("Database health check passed");
            match campo_db::run_migrations(&pool).await {
                Ok(()) => tracing::info!("Database migrations applied"),
                Err(e) => tracing::error!(error = %e, "Failed to run database migrations"),
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Database unreachable, admin listings will be empty");
        }
    }

    // --- Generation service ---
    let (advisor, images): (Arc<dyn AlertAdvisor>, Arc<dyn FieldImageGenerator>) =
        match &advisor_config.api_key {
            Some(api_key) => {
                let client = Arc::new(GeminiClient::new(
                    advisor_config.base_url.clone(),
                    api_key.clone(),
                    advisor_config.text_model.clone(),
                    advisor_config.image_model.clone(),
                ));
                tracing::info!(model = %advisor_config.text_model, "Generation service configured");
                let advisor: Arc<dyn AlertAdvisor> = client.clone();
                let images: Arc<dyn FieldImageGenerator> = client;
                (advisor, images)
            }
            None => {
                tracing::warn!("GEMINI_API_KEY not set, advisories will use the fallback");
                let advisor: Arc<dyn AlertAdvisor> = Arc::new(Unconfigured);
                let images: Arc<dyn FieldImageGenerator> = Arc::new(Unconfigured);
                (advisor, images)
            }
        };

    // --- Dashboard ---
    let dashboard = Arc::new(Dashboard::seeded(&settings, advisor, images));
    tracing::info!(crops = dashboard.crop_ids().count(), "Dashboard seeded");

    let simulation_cancel = CancellationToken::new();
    let simulation_handles =
        simulation::spawn_all(&dashboard, settings.tick_interval, &simulation_cancel);

    // --- App state ---
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        dashboard: Arc::clone(&dashboard),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    simulation_cancel.cancel();
    let shutdown_timeout = Duration::from_secs(config.shutdown_timeout_secs);
    for handle in simulation_handles {
        if tokio::time::timeout(shutdown_timeout, handle).await.is_err() {
            tracing::warn!("Simulation task did not stop in time");
        }
    }
    tracing::info!("Simulation tasks stopped");

    pool.close().await;
    tracing::info!("Graceful shutdown complete");
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
