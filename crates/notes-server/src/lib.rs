//! HTTP gateway for the note store.
//!
//! Translates requests into [`NoteStore`](notes_store::NoteStore) calls and
//! store errors into status codes. Holds no state of its own beyond the
//! shared store handle.

pub mod config;
pub mod error;
pub mod form;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::AppState;
pub use server::NoteServer;
