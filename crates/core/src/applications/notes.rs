//! Timestamped notes attached to an application.

use std::fmt;

use serde::de::{self, value::SeqAccessDeserializer, Deserializer, SeqAccess, Visitor};
use log::warn;
use serde::{Deserialize, Serialize, Serializer};

use crate::errors::Result;

/// A single note. `date` is an RFC 3339 timestamp kept as sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Note {
    pub text: String,
    pub date: String,
}

/// Notes on an application, newest first.
///
/// The backend stores the sequence as one JSON text column, so on the wire it
/// is a string holding a JSON array. Reads also accept a bare array, `null`
/// and the empty string. Text that is not a JSON list, such as a plain
/// sentence written by another client, is read as one undated note.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Notes(Vec<Note>);

impl Notes {
    pub fn new(notes: Vec<Note>) -> Self {
        Notes(notes)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn latest(&self) -> Option<&Note> {
        self.0.first()
    }

    /// Adds a note in front. Blank text is ignored and `false` is returned.
    pub fn prepend(&mut self, text: &str, date: String) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.0.insert(
            0,
            Note {
                text: text.to_string(),
                date,
            },
        );
        true
    }

    /// Encodes the notes as the JSON text the backend stores.
    pub fn to_blob(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.0)?)
    }

    /// Decodes the stored JSON text. Blank text is an empty sequence.
    pub fn from_blob(blob: &str) -> Result<Self> {
        if blob.trim().is_empty() {
            return Ok(Notes::default());
        }
        Ok(Notes(serde_json::from_str(blob)?))
    }

    /// Like `from_blob`, but keeps unreadable text as a single undated note.
    pub fn from_blob_lossy(blob: &str) -> Self {
        Notes::from_blob(blob).unwrap_or_else(|err| {
            warn!("[Notes] Stored notes are not a JSON list ({}); keeping the raw text", err);
            Notes(vec![Note {
                text: blob.trim().to_string(),
                date: String::new(),
            }])
        })
    }
}

impl IntoIterator for Notes {
    type Item = Note;
    type IntoIter = std::vec::IntoIter<Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Serialize for Notes {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let blob = self.to_blob().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&blob)
    }
}

struct NotesVisitor;

impl<'de> Visitor<'de> for NotesVisitor {
    type Value = Notes;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON-encoded list of notes, a list of notes, or null")
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Notes, E> {
        Ok(Notes::default())
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Notes, E> {
        Ok(Notes::default())
    }

    fn visit_some<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> std::result::Result<Notes, D::Error> {
        deserializer.deserialize_any(NotesVisitor)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Notes, E> {
        Ok(Notes::from_blob_lossy(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> std::result::Result<Notes, A::Error> {
        Vec::<Note>::deserialize(SeqAccessDeserializer::new(seq)).map(Notes)
    }
}

impl<'de> Deserialize<'de> for Notes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(NotesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Notes {
        Notes::new(vec![
            Note {
                text: "a".into(),
                date: "2024-05-02T09:00:00.000Z".into(),
            },
            Note {
                text: "b".into(),
                date: "2024-05-01T09:00:00.000Z".into(),
            },
        ])
    }

    #[test]
    fn test_blob_round_trip_keeps_order() {
        let notes = sample();
        let blob = notes.to_blob().unwrap();
        assert_eq!(Notes::from_blob(&blob).unwrap(), notes);
    }

    #[test]
    fn test_wire_form_is_a_string() {
        let value = serde_json::to_value(sample()).unwrap();
        assert!(value.is_string());
        let back: Notes = serde_json::from_value(value).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_reads_array_null_and_blank() {
        let from_array: Notes =
            serde_json::from_value(json!([{ "text": "x", "date": "d" }])).unwrap();
        assert_eq!(from_array.len(), 1);
        assert!(serde_json::from_value::<Notes>(json!(null)).unwrap().is_empty());
        assert!(serde_json::from_value::<Notes>(json!("")).unwrap().is_empty());
    }

    #[test]
    fn test_prepend_puts_newest_first_and_skips_blank() {
        let mut notes = sample();
        assert!(notes.prepend("  called client  ", "2024-05-03T00:00:00.000Z".into()));
        assert!(!notes.prepend("   ", "ignored".into()));
        assert_eq!(notes.len(), 3);
        assert_eq!(notes.latest().unwrap().text, "called client");
    }

    #[test]
    fn test_corrupt_blob_is_an_error() {
        assert!(Notes::from_blob("not json").is_err());
    }

    #[test]
    fn test_plain_text_column_reads_as_one_undated_note() {
        let notes: Notes = serde_json::from_value(json!(" call back Tuesday ")).unwrap();
        assert_eq!(notes.len(), 1);
        let note = notes.latest().unwrap();
        assert_eq!(note.text, "call back Tuesday");
        assert_eq!(note.date, "");

        let written = serde_json::to_value(&notes).unwrap();
        let reread: Notes = serde_json::from_value(written).unwrap();
        assert_eq!(reread, notes);
    }
}
