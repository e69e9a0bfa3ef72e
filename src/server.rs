//! Router assembly and the server loop.

use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::app::{App, AppState};
use crate::config::Config;
use crate::routes;
use crate::types::errors::AppError;

/// How often expired sessions are swept from the database.
const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Builds the router with every page and API route behind the route gate.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/login", get(routes::login_page))
        .route("/dashboard", get(routes::dashboard))
        .route("/auth/callback", get(routes::auth_callback))
        .route("/auth/signout", post(routes::sign_out))
        .route(
            "/api/bookmarks",
            get(routes::list_bookmarks).post(routes::add_bookmark),
        )
        .route("/api/bookmarks/changes", get(routes::bookmark_changes))
        .route("/api/bookmarks/{id}", post(routes::update_bookmark))
        .route("/api/bookmarks/{id}/delete", post(routes::delete_bookmark))
        .layer(middleware::from_fn_with_state(state.clone(), routes::route_gate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Opens the database, binds the listener and serves until a shutdown signal.
pub async fn serve(config: Config) -> Result<(), AppError> {
    info!("Initializing state...");
    let state = App::new(&config)?.into_state();

    tokio::spawn(purge_sessions(state.clone()));

    let listener = TcpListener::bind(config.bind).await?;
    info!("Server running on {}", config.bind);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn purge_sessions(state: AppState) {
    let mut ticker = tokio::time::interval(SESSION_PURGE_INTERVAL);
    loop {
        ticker.tick().await;
        match state.auth.purge_expired_sessions() {
            Ok(0) => {}
            Ok(n) => info!(removed = n, "expired sessions purged"),
            Err(e) => warn!(error = %e, "session purge failed"),
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "failed to install terminate handler");
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
}
