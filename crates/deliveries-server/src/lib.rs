pub mod error;
pub mod routes;
pub mod state;

use axum::routing::get;
use axum::Router;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(sheet: PathBuf) -> Router {
    let app_state = state::AppState::new(sheet);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Reload events (SSE)
        .route("/api/events", get(routes::events::sse_events))
        // The grid
        .route(
            "/api/rows",
            get(routes::rows::list_rows)
                .put(routes::rows::submit_rows)
                .post(routes::rows::append_row),
        )
        .layer(cors)
        .with_state(app_state)
}

/// Start the deliveries web API server.
pub async fn serve(sheet: PathBuf, port: u16, open_browser: bool) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    serve_on(sheet, listener, open_browser).await
}

/// Start the server on a pre-bound listener, so the caller can read the
/// actual port first (useful when `port = 0` and the OS picks a free one).
pub async fn serve_on(
    sheet: PathBuf,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let app = build_router(sheet);

    tracing::info!("deliveries server listening on http://localhost:{actual_port}");

    if open_browser {
        let url = format!("http://localhost:{actual_port}/api/rows");
        let _ = open::that(&url);
    }

    axum::serve(listener, app).await?;
    Ok(())
}
