//! The fixed set of sequence slots.

use crate::elements::Element;
use crate::storage::{ImportError, SequenceFile};
use log::info;

/// Number of sequence slots.
pub const SEQUENCE_COUNT: usize = 10;

/// One step of a strategy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sequence {
    pub elements: Vec<Element>,
    /// Small preview as a data URL.
    pub thumbnail: Option<String>,
}

impl Sequence {
    /// A slot that was never saved into.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Owns every slot and the active index.
///
/// Elements are always copied in and out; no slot shares data with the
/// live document. Out-of-range indices are ignored.
#[derive(Debug, Clone)]
pub struct SequenceManager {
    slots: [Sequence; SEQUENCE_COUNT],
    active_index: usize,
}

impl Default for SequenceManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceManager {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| Sequence::default()),
            active_index: 0,
        }
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub(crate) fn set_active_index(&mut self, index: usize) {
        if index < SEQUENCE_COUNT {
            self.active_index = index;
        }
    }

    pub fn get(&self, index: usize) -> Option<&Sequence> {
        self.slots.get(index)
    }

    pub fn slots(&self) -> &[Sequence] {
        &self.slots
    }

    /// Copy `elements` into the active slot, keeping its thumbnail.
    pub fn save_current_to_sequence(&mut self, elements: &[Element]) {
        self.save_to(self.active_index, elements);
    }

    /// Copy `elements` into slot `index`, keeping its thumbnail.
    pub fn save_to(&mut self, index: usize, elements: &[Element]) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.elements = elements.to_vec();
        }
    }

    pub fn update_thumbnail(&mut self, index: usize, thumbnail: Option<String>) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.thumbnail = thumbnail;
        }
    }

    /// Empty one slot's elements. The live document is not touched.
    pub fn clear_sequence(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.elements.clear();
        }
    }

    /// Reset every slot and return to slot 0.
    pub fn clear_all(&mut self) {
        for slot in &mut self.slots {
            *slot = Sequence::default();
        }
        self.active_index = 0;
    }

    /// Snapshot of every slot for export. Thumbnails are stripped.
    pub fn export_snapshot(&self) -> SequenceFile {
        let file = SequenceFile::new(self.slots.iter().map(|s| s.elements.as_slice()));
        info!("Exported {} sequences", file.sequences.len());
        file
    }

    /// Parse and adopt an exported map.
    ///
    /// Parsing finishes before any slot changes, so an error leaves every
    /// slot untouched. The active index is kept.
    pub fn import_snapshot(&mut self, json: &str) -> Result<(), ImportError> {
        let file = SequenceFile::from_json(json)?;
        self.import_file(file);
        Ok(())
    }

    /// Adopt an already-validated file.
    pub fn import_file(&mut self, file: SequenceFile) {
        let mut records = file.sequences.into_iter();
        for slot in &mut self.slots {
            *slot = Sequence {
                elements: records.next().map(|r| r.elements).unwrap_or_default(),
                thumbnail: None,
            };
        }
        info!(
            "Imported map with {} non-empty sequences",
            self.slots.iter().filter(|s| !s.is_empty()).count()
        );
    }
}
