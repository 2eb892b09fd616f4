//! triage-server - REST API over a [`triage_core::Store`].
//!
//! [`router`] builds the axum application; [`serve`] runs it on a bound
//! listener until the shutdown future resolves.

mod error;
mod routes;
mod state;

use std::future::Future;

use axum::Router;
use axum::routing::{delete, get, patch, post};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use error::ApiError;
pub use state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health))
        .route("/api/posts", get(routes::posts::list))
        .route("/api/posts/:id", get(routes::posts::get))
        .route("/api/posts/:id/status", patch(routes::posts::set_status))
        .route("/api/posts/:id/tags", post(routes::posts::add_tag))
        .route("/api/posts/:id/tags/:tag", delete(routes::posts::remove_tag))
        .route("/api/tags", get(routes::tags::list))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serve the API on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(%addr, "triage server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
