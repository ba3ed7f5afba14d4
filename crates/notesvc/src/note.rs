//! Core note types for notesvc.
//!
//! This module defines the note record, the request and response bodies that
//! carry it over the wire, and the position-based note identifier.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{Error, Result};

/// Name reported by the `/info` endpoint.
pub const SERVICE_NAME: &str = "Notes";

/// A short text note.
///
/// Notes carry no identifier of their own; a note is addressed by its
/// position in the store at the time of the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct Note {
    /// The note title.
    pub title: String,
    /// The note body.
    pub content: String,
}

impl Note {
    /// Create a new note.
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Body of a create or update request.
///
/// Fields missing from the payload decode as empty strings, so an update
/// always replaces both fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct NoteRequest {
    /// The note title.
    pub title: String,
    /// The note body.
    pub content: String,
}

impl NoteRequest {
    /// Decode a request body.
    ///
    /// The payload is read as JSON whatever content type the client declared.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNoteBody`] if the bytes are not a JSON object
    /// with string `title`/`content` fields.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(Error::InvalidNoteBody)
    }
}

impl From<NoteRequest> for Note {
    fn from(req: NoteRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
        }
    }
}

/// Response body listing every note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NoteList {
    /// The notes in storage order; the position of each is its id.
    pub notes: Vec<Note>,
}

/// Response body of the `/info` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Info {
    /// Service name.
    pub service: String,
    /// Service status.
    pub status: String,
}

impl Default for Info {
    fn default() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
            status: "ok".to_string(),
        }
    }
}

/// A note id as supplied by a client.
///
/// The id is the note's zero-based position in the store. Parsing only
/// checks the shape; range checks happen in the store, where they cannot
/// race with other mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteId(pub i64);

impl NoteId {
    /// Parse a raw path segment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingNoteId`] for an empty segment and
    /// [`Error::InvalidNoteId`] for anything that is not a base-10 integer,
    /// including surrounding whitespace.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(Error::MissingNoteId);
        }
        raw.parse::<i64>().map(Self).map_err(|_| Error::InvalidNoteId)
    }

    /// Resolve the id against a collection of `len` notes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNoteId`] if the id is outside `[0, len)`.
    pub fn index(self, len: usize) -> Result<usize> {
        usize::try_from(self.0)
            .ok()
            .filter(|&index| index < len)
            .ok_or(Error::InvalidNoteId)
    }
}

impl From<usize> for NoteId {
    fn from(index: usize) -> Self {
        Self(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

impl std::fmt::Display for NoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_new() {
        let note = Note::new("Groceries", "milk, eggs");
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.content, "milk, eggs");
    }

    #[test]
    fn test_note_serialization_shape() {
        let json = serde_json::to_value(Note::new("A", "1")).unwrap();
        assert_eq!(json, serde_json::json!({"title": "A", "content": "1"}));
    }

    #[test]
    fn test_note_list_serialization_shape() {
        let list = NoteList {
            notes: vec![Note::new("A", "1")],
        };
        let json = serde_json::to_value(list).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"notes": [{"title": "A", "content": "1"}]})
        );
    }

    #[test]
    fn test_empty_note_list_serializes_as_array() {
        let json = serde_json::to_string(&NoteList::default()).unwrap();
        assert_eq!(json, r#"{"notes":[]}"#);
    }

    #[test]
    fn test_info_default() {
        let info = Info::default();
        assert_eq!(info.service, "Notes");
        assert_eq!(info.status, "ok");
    }

    #[test]
    fn test_request_missing_fields_default_to_empty() {
        let req = NoteRequest::from_slice(br#"{"title": "only title"}"#).unwrap();
        assert_eq!(req.title, "only title");
        assert_eq!(req.content, "");

        let req = NoteRequest::from_slice(b"{}").unwrap();
        assert_eq!(req, NoteRequest::default());
    }

    #[test]
    fn test_request_ignores_unknown_fields() {
        let req = NoteRequest::from_slice(br#"{"title":"t","content":"c","tags":[1]}"#).unwrap();
        assert_eq!(Note::from(req), Note::new("t", "c"));
    }

    #[test]
    fn test_request_rejects_malformed_json() {
        let err = NoteRequest::from_slice(b"{\"title\": ").unwrap_err();
        assert!(matches!(err, Error::InvalidNoteBody(_)));

        let err = NoteRequest::from_slice(b"").unwrap_err();
        assert!(matches!(err, Error::InvalidNoteBody(_)));

        let err = NoteRequest::from_slice(br#"{"title": 5}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidNoteBody(_)));
    }

    #[test]
    fn test_note_id_parse() {
        assert_eq!(NoteId::parse("0").unwrap(), NoteId(0));
        assert_eq!(NoteId::parse("42").unwrap(), NoteId(42));
        assert_eq!(NoteId::parse("+3").unwrap(), NoteId(3));
        assert_eq!(NoteId::parse("-1").unwrap(), NoteId(-1));
    }

    #[test]
    fn test_note_id_parse_missing() {
        assert!(matches!(NoteId::parse(""), Err(Error::MissingNoteId)));
        assert!(matches!(NoteId::parse("  "), Err(Error::InvalidNoteId)));
    }

    #[test]
    fn test_note_id_parse_invalid() {
        for raw in ["abc", "1.5", "0x10", "1e3", "99999999999999999999", " 0", "0 "] {
            assert!(
                matches!(NoteId::parse(raw), Err(Error::InvalidNoteId)),
                "expected {raw:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_note_id_index_bounds() {
        assert_eq!(NoteId(0).index(3).unwrap(), 0);
        assert_eq!(NoteId(2).index(3).unwrap(), 2);
        assert!(matches!(NoteId(3).index(3), Err(Error::InvalidNoteId)));
        assert!(matches!(NoteId(-1).index(3), Err(Error::InvalidNoteId)));
        assert!(matches!(NoteId(0).index(0), Err(Error::InvalidNoteId)));
    }

    #[test]
    fn test_note_id_display() {
        assert_eq!(NoteId(7).to_string(), "7");
        assert_eq!(NoteId::from(4usize), NoteId(4));
    }
}
