//! Extractor for the `/write` upload form.
//!
//! Browsers submit the upload form either as `multipart/form-data` or as
//! `application/x-www-form-urlencoded`; both are accepted.

use async_trait::async_trait;
use axum::extract::{Form, FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use serde::Deserialize;

use crate::error::ServerError;

/// Fields of the note upload form. Either may be absent.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct WriteForm {
    pub note_name: Option<String>,
    pub note: Option<String>,
}

impl WriteForm {
    /// Both fields, or `MissingFields` if either is absent or empty.
    pub fn require(self) -> Result<(String, String), ServerError> {
        match (self.note_name, self.note) {
            (Some(name), Some(text)) if !name.is_empty() && !text.is_empty() => Ok((name, text)),
            _ => Err(ServerError::MissingFields),
        }
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, ServerError> {
        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ServerError::BadForm(e.body_text()))?
        {
            let slot = match field.name() {
                Some("note_name") => &mut form.note_name,
                Some("note") => &mut form.note,
                _ => continue,
            };
            let value = field
                .text()
                .await
                .map_err(|e| ServerError::BadForm(e.body_text()))?;
            *slot = Some(value);
        }
        Ok(form)
    }
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"))
}

#[async_trait]
impl<S> FromRequest<S> for WriteForm
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_multipart(&req) {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ServerError::BadForm(e.body_text()))?;
            Self::from_multipart(multipart).await
        } else {
            let Form(form) = Form::<WriteForm>::from_request(req, state)
                .await
                .map_err(|e| ServerError::BadForm(e.body_text()))?;
            Ok(form)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_both_fields() {
        let full = WriteForm {
            note_name: Some("n".into()),
            note: Some("t".into()),
        };
        assert_eq!(full.require().unwrap(), ("n".to_string(), "t".to_string()));

        let missing = WriteForm {
            note_name: Some("n".into()),
            note: None,
        };
        assert!(matches!(missing.require(), Err(ServerError::MissingFields)));

        let empty = WriteForm {
            note_name: Some(String::new()),
            note: Some("t".into()),
        };
        assert!(matches!(empty.require(), Err(ServerError::MissingFields)));
    }
}
