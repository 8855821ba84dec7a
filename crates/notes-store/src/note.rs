use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};
use crate::id::NoteId;

/// A stored note: identifier plus verbatim text content.
///
/// Serializes as `{"name": ..., "text": ...}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(rename = "name")]
    pub id: NoteId,
    #[serde(rename = "text")]
    pub content: String,
}

impl Note {
    pub fn new(id: NoteId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
        }
    }
}

/// Reject empty or whitespace-only content.
///
/// Applied on both `create` and `update`.
pub fn validate_content(content: &str) -> StoreResult<()> {
    if content.trim().is_empty() {
        return Err(StoreError::InvalidContent {
            reason: if content.is_empty() {
                "content must not be empty".into()
            } else {
                "content must not be whitespace-only".into()
            },
        });
    }
    Ok(())
}
