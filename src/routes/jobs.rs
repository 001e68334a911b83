use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, patch},
};

/// Jobs Router Module
///
/// The record surface of the tracker: list, create, and partial update.
///
/// Access Control Strategy:
/// This router is wrapped by the `access_gate` middleware in `create_router`,
/// so every handler here (reads included) only runs once the request has
/// passed the gate, or unconditionally when the instance is an open demo.
/// The read-only refusal for mutations lives inside the handlers, because it
/// applies even when the gate itself is open.
pub fn jobs_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // GET /jobs?page=...&limit=...&search=...&sortBy=...&order=...
        // Paginated, searchable, sortable listing. Returns the page envelope
        // {data, total, page, totalPages}.
        // POST /jobs
        // Submits a new application record; defaults are applied server-side.
        .route("/jobs", get(handlers::list_jobs).post(handlers::create_job))
        // PATCH /jobs/{id}
        // Partial update: exactly the supplied fields change.
        .route("/jobs/{id}", patch(handlers::update_job))
}
