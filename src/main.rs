use std::time::Duration;

use mentor_engine::config::{Config, EngineConfig};
use mentor_engine::logging;
use mentor_engine::workers::WorkerManager;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();
    let engine_config = EngineConfig::from_env();

    let _log_guard = logging::init_tracing(&config.log_level);

    let session = match mentor_engine::create_session(engine_config) {
        Ok(session) => session,
        Err(err) => {
            tracing::error!(error = %err, "failed to build session");
            return;
        }
    };

    let recommendations = session
        .adaptation()
        .adaptive_recommendations(config.demo_user_id);
    if recommendations.is_empty() {
        tracing::warn!(user_id = config.demo_user_id, "no recommendations for demo user");
    }
    for (rank, rec) in recommendations.iter().enumerate() {
        tracing::info!(
            rank = rank + 1,
            program = %rec.program.name,
            personalized = rec.personalized_score,
            trending = rec.trending_score,
            total = rec.total_score,
            "recommendation"
        );
    }

    match serde_json::to_string(&session.analyzer().top_content(3)) {
        Ok(json) => tracing::info!(top_content = %json, "top content"),
        Err(err) => tracing::warn!(error = %err, "failed to encode top content"),
    }

    let worker_manager = match WorkerManager::new(session.engine(), session.analyzer()).await {
        Ok(manager) => {
            if let Err(e) = manager.start(&config).await {
                tracing::error!(error = %e, "failed to start workers");
            }
            Some(manager)
        }
        Err(e) => {
            tracing::warn!(error = %e, "worker manager not initialized");
            None
        }
    };

    if let Err(err) = session.notifications().start() {
        tracing::error!(error = %err, "failed to start notification loop");
    }

    if config.demo_duration_secs > 0 {
        tokio::select! {
            _ = shutdown_signal() => {},
            _ = tokio::time::sleep(Duration::from_secs(config.demo_duration_secs)) => {},
        }
    } else {
        shutdown_signal().await;
    }

    tracing::info!("shutting down");

    session.reset();
    if let Some(ref manager) = worker_manager {
        manager.stop().await;
    }

    let stats = session.notifications().stats();
    tracing::info!(
        attempts = stats.attempts,
        shown = stats.shown,
        dropped = stats.dropped,
        "Graceful shutdown complete"
    );
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm =
            signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
