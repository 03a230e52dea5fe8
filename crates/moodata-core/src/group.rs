//! Indicator groups

use crate::entry::IndicatorEntry;
use uuid::Uuid;

/// A named section of a view holding ordered entries
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndicatorGroup {
    /// Opaque identifier
    pub id: Uuid,
    /// Group name, unique within a view
    pub name: String,
    /// Entries in display order
    pub entries: Vec<IndicatorEntry>,
}

impl IndicatorGroup {
    /// Create a group
    pub fn new(name: impl Into<String>, entries: Vec<IndicatorEntry>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            entries,
        }
    }

    /// First entry with the given name
    pub fn entry(&self, name: &str) -> Option<&IndicatorEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// First entry with the given name, mutably
    pub fn entry_mut(&mut self, name: &str) -> Option<&mut IndicatorEntry> {
        self.entries.iter_mut().find(|e| e.name == name)
    }

    /// Entries that carry data (dividers skipped)
    pub fn data_entries(&self) -> impl Iterator<Item = &IndicatorEntry> {
        self.entries.iter().filter(|e| !e.is_divider())
    }
}
