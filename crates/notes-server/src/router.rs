use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler::{self, AppState};

/// Build the axum router with all note endpoints.
pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handler::welcome))
        .route("/UploadForm.html", get(handler::upload_form))
        .route("/notes", get(handler::list_notes))
        .route(
            "/notes/:name",
            get(handler::read_note)
                .put(handler::update_note)
                .delete(handler::delete_note),
        )
        .route("/write", post(handler::write_note))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
