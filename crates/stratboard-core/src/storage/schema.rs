//! The exported `.map` JSON schema.

use super::ImportError;
use crate::elements::Element;
use crate::sequence::SEQUENCE_COUNT;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Version written by [`SequenceFile::new`].
pub const CURRENT_VERSION: &str = "2.0";

/// Single-collection format, loaded into slot 0.
pub const LEGACY_VERSION: &str = "1.0";

/// File extension of exported maps.
pub const MAP_EXTENSION: &str = "map";

/// One slot in a sequence file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotRecord {
    #[serde(default)]
    pub elements: Vec<Element>,
    /// Always written as `null`; thumbnails are not exported.
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// A versioned export of every sequence slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceFile {
    pub version: String,
    /// RFC 3339 export time.
    pub timestamp: String,
    pub sequences: Vec<SlotRecord>,
}

/// Any supported version, before normalization.
#[derive(Deserialize)]
struct RawSequenceFile {
    version: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
    sequences: Option<Vec<SlotRecord>>,
    elements: Option<Vec<Element>>,
}

impl SequenceFile {
    /// Build a current-version file from slot contents, stripping thumbnails.
    pub fn new<'a>(slots: impl IntoIterator<Item = &'a [Element]>) -> Self {
        let sequences = slots
            .into_iter()
            .map(|elements| SlotRecord {
                elements: elements.to_vec(),
                thumbnail: None,
            })
            .collect();
        Self {
            version: CURRENT_VERSION.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            sequences,
        }
    }

    /// Parse any supported version into exactly [`SEQUENCE_COUNT`] slots.
    ///
    /// Extra slots are dropped and missing ones are empty. A legacy file
    /// fills slot 0.
    pub fn from_json(json: &str) -> Result<Self, ImportError> {
        let raw: RawSequenceFile = serde_json::from_str(json)?;
        let version = raw.version.ok_or(ImportError::MissingField("version"))?;

        let mut sequences = match version.as_str() {
            CURRENT_VERSION => raw.sequences.ok_or(ImportError::MissingField("sequences"))?,
            LEGACY_VERSION => {
                let elements = raw.elements.ok_or(ImportError::MissingField("elements"))?;
                vec![SlotRecord {
                    elements,
                    thumbnail: None,
                }]
            }
            _ => return Err(ImportError::UnsupportedVersion(version)),
        };

        sequences.truncate(SEQUENCE_COUNT);
        sequences.resize_with(SEQUENCE_COUNT, SlotRecord::default);
        for (index, slot) in sequences.iter_mut().enumerate() {
            let mut ids = HashSet::new();
            if let Some(dup) = slot.elements.iter().find(|e| !ids.insert(e.id())) {
                return Err(ImportError::DuplicateId {
                    slot: index,
                    id: dup.id().to_string(),
                });
            }
            slot.thumbnail = None;
        }

        Ok(Self {
            version: CURRENT_VERSION.to_string(),
            timestamp: raw.timestamp.unwrap_or_default(),
            sequences,
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// File name for a map export: lowercase, non-alphanumerics replaced by `-`.
pub fn map_file_name(map_name: &str) -> String {
    let stem: String = map_name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_lowercase() || c.is_ascii_digit() { c } else { '-' })
        .collect();
    let stem = if stem.is_empty() { "map".to_string() } else { stem };
    format!("{stem}.{MAP_EXTENSION}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::Line;
    use serde_json::json;

    fn line(id: &str) -> Element {
        Element::Line(Line::new(id, vec![0.0, 0.0, 1.0, 1.0]))
    }

    #[test]
    fn test_new_writes_current_version() {
        let slots = [vec![line("a")], vec![]];
        let file = SequenceFile::new(slots.iter().map(Vec::as_slice));
        assert_eq!(file.version, "2.0");
        assert_eq!(file.sequences.len(), 2);
        assert!(chrono::DateTime::parse_from_rfc3339(&file.timestamp).is_ok());

        let value: serde_json::Value = serde_json::from_str(&file.to_json().unwrap()).unwrap();
        assert!(value["sequences"][0]["thumbnail"].is_null());
        assert_eq!(value["sequences"][0]["elements"][0]["type"], "line");
    }

    #[test]
    fn test_legacy_file_fills_slot_zero() {
        let json = json!({
            "version": "1.0",
            "timestamp": "2024-05-01T10:00:00Z",
            "elements": [{"id": "line-1", "type": "line", "points": [0, 0, 5, 5]}]
        })
        .to_string();
        let file = SequenceFile::from_json(&json).unwrap();
        assert_eq!(file.sequences.len(), SEQUENCE_COUNT);
        assert_eq!(file.sequences[0].elements.len(), 1);
        assert!(file.sequences[1..].iter().all(|s| s.elements.is_empty()));
    }

    #[test]
    fn test_oversized_and_short_files_are_normalized() {
        let many: Vec<_> = (0..12)
            .map(|i| {
                json!({
                    "elements": [{"id": format!("l{i}"), "type": "line", "points": []}],
                    "thumbnail": null
                })
            })
            .collect();
        let json = json!({"version": "2.0", "sequences": many}).to_string();
        let file = SequenceFile::from_json(&json).unwrap();
        assert_eq!(file.sequences.len(), SEQUENCE_COUNT);
        assert_eq!(file.sequences[9].elements[0].id(), "l9");

        let few = json!({"version": "2.0", "timestamp": "t", "sequences": [{"elements": []}]});
        let file = SequenceFile::from_json(&few.to_string()).unwrap();
        assert_eq!(file.sequences.len(), SEQUENCE_COUNT);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(SequenceFile::from_json("not json"), Err(ImportError::Json(_))));
        assert!(matches!(
            SequenceFile::from_json(r#"{"version": "3.0", "sequences": []}"#),
            Err(ImportError::UnsupportedVersion(v)) if v == "3.0"
        ));
        assert!(matches!(
            SequenceFile::from_json(r#"{"version": "2.0"}"#),
            Err(ImportError::MissingField("sequences"))
        ));
        assert!(matches!(
            SequenceFile::from_json(r#"{"sequences": []}"#),
            Err(ImportError::MissingField("version"))
        ));
    }

    #[test]
    fn test_rejects_duplicate_ids_in_a_slot() {
        let line = json!({"id": "a", "type": "line", "points": [0, 0, 1, 1]});
        let json = json!({
            "version": "2.0",
            "sequences": [{"elements": []}, {"elements": [line.clone(), line]}]
        });
        assert!(matches!(
            SequenceFile::from_json(&json.to_string()),
            Err(ImportError::DuplicateId { slot: 1, id }) if id == "a"
        ));

        // the same id in different slots is fine
        let line = json!({"id": "a", "type": "line", "points": [0, 0, 1, 1]});
        let json = json!({
            "version": "2.0",
            "sequences": [{"elements": [line.clone()]}, {"elements": [line]}]
        });
        assert!(SequenceFile::from_json(&json.to_string()).is_ok());
    }

    #[test]
    fn test_map_file_name() {
        assert_eq!(map_file_name("Ascent B Retake"), "ascent-b-retake.map");
        assert_eq!(map_file_name(""), "map.map");
    }
}
