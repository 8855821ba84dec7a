//! Note identifier validation.
//!
//! A valid identifier is used verbatim as a file name directly under the
//! store root:
//! - Must be non-empty and at most [`MAX_LEN`] bytes
//! - Must not contain `/`, `\`, NUL or other control characters
//! - Must not contain `..`
//! - Must not start with `.` (hidden files and the store's temporaries)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Longest identifier accepted, matching the usual single path component limit.
pub const MAX_LEN: usize = 255;

/// Characters that would let an identifier name something other than a
/// direct child of the root.
const SEPARATORS: &[char] = &['/', '\\'];

/// Validated note identifier.
///
/// The only way to obtain a `NoteId` is through [`NoteId::parse`] (or the
/// `FromStr` / `TryFrom` impls that call it), so holding one proves the
/// identifier is safe to join onto the store root.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NoteId(String);

impl NoteId {
    /// Validate `name` and wrap it.
    ///
    /// # Examples
    ///
    /// ```
    /// use notes_store::NoteId;
    ///
    /// assert!(NoteId::parse("shopping-list").is_ok());
    /// assert!(NoteId::parse("").is_err());
    /// assert!(NoteId::parse("../etc/passwd").is_err());
    /// ```
    pub fn parse(name: &str) -> StoreResult<Self> {
        let reject = |reason: String| StoreError::InvalidIdentifier {
            name: name.to_string(),
            reason,
        };

        if name.is_empty() {
            return Err(reject("note name must not be empty".into()));
        }

        if name.len() > MAX_LEN {
            return Err(reject(format!("longer than {MAX_LEN} bytes")));
        }

        if let Some(ch) = name.chars().find(|c| SEPARATORS.contains(c)) {
            return Err(reject(format!("contains path separator {ch:?}")));
        }

        if let Some(ch) = name.chars().find(|c| c.is_control()) {
            return Err(reject(format!("contains control character {ch:?}")));
        }

        if name.contains("..") {
            return Err(reject("must not contain '..'".into()));
        }

        if name.starts_with('.') {
            return Err(reject("must not start with '.'".into()));
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The on-disk file name for this note.
    pub fn file_name(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NoteId({:?})", self.0)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NoteId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for NoteId {
    type Err = StoreError;

    fn from_str(s: &str) -> StoreResult<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for NoteId {
    type Error = StoreError;

    fn try_from(value: &str) -> StoreResult<Self> {
        Self::parse(value)
    }
}

impl TryFrom<String> for NoteId {
    type Error = StoreError;

    fn try_from(value: String) -> StoreResult<Self> {
        Self::parse(&value)
    }
}

impl From<NoteId> for String {
    fn from(id: NoteId) -> Self {
        id.0
    }
}
