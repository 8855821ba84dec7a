use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, Json};
use notes_store::{Note, NoteId, NoteStore, StoreResult};

use crate::error::{ServerError, ServerResult};
use crate::form::WriteForm;

const UPLOAD_FORM: &str = include_str!("../assets/UploadForm.html");

/// Shared router state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn NoteStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    /// Run a store operation on the blocking pool.
    async fn run<T, F>(&self, op: F) -> ServerResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn NoteStore) -> StoreResult<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(store.as_ref()))
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?
            .map_err(ServerError::from)
    }
}

/// Landing page.
pub async fn welcome() -> &'static str {
    "Welcome to the Note App! Go to /UploadForm.html to upload a note."
}

/// HTML form posting to `/write`.
pub async fn upload_form() -> Html<&'static str> {
    Html(UPLOAD_FORM)
}

pub async fn list_notes(State(state): State<AppState>) -> ServerResult<Json<Vec<Note>>> {
    let notes = state.run(|store| store.list()).await?;
    Ok(Json(notes))
}

pub async fn read_note(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ServerResult<String> {
    let id = NoteId::parse(&name)?;
    let note = state.run(move |store| store.read(&id)).await?;
    Ok(note.content)
}

pub async fn update_note(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: String,
) -> ServerResult<&'static str> {
    let id = NoteId::parse(&name)?;
    state.run(move |store| store.update(&id, &body)).await?;
    Ok("Note updated")
}

pub async fn delete_note(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ServerResult<&'static str> {
    let id = NoteId::parse(&name)?;
    state.run(move |store| store.delete(&id)).await?;
    Ok("Note deleted")
}

/// Create a note from the upload form.
pub async fn write_note(
    State(state): State<AppState>,
    form: WriteForm,
) -> ServerResult<(StatusCode, &'static str)> {
    let (name, text) = form.require()?;
    let id = NoteId::parse(&name)?;
    state.run(move |store| store.create(&id, &text)).await?;
    Ok((StatusCode::CREATED, "Note created"))
}
