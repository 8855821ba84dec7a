use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use notes_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("note name and content are required")]
    MissingFields,

    #[error("malformed form body: {0}")]
    BadForm(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Store(
                StoreError::AlreadyExists { .. }
                | StoreError::InvalidIdentifier { .. }
                | StoreError::InvalidContent { .. },
            )
            | Self::MissingFields
            | Self::BadForm(_) => StatusCode::BAD_REQUEST,
            Self::Store(StoreError::RootMissing(_) | StoreError::Io(_))
            | Self::Io(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Plain-text body sent to the client. Internal details stay in the log.
    fn message(&self) -> String {
        match self {
            Self::Store(StoreError::NotFound { .. }) => "Note not found".into(),
            Self::Store(StoreError::AlreadyExists { .. }) => "Note already exists".into(),
            Self::Store(StoreError::InvalidContent { .. }) => "Invalid note content".into(),
            Self::Store(StoreError::InvalidIdentifier { reason, .. }) => {
                format!("Invalid note name: {reason}")
            }
            Self::MissingFields => "Note name and content are required".into(),
            Self::BadForm(reason) => format!("Malformed form: {reason}"),
            _ => "Internal server error".into(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }
        (status, self.message()).into_response()
    }
}
