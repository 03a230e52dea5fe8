//! Indicator entries
//!
//! One row of a worksheet group: a named value with a unit and a note.
//!
//! ## Example
//!
//! ```rust
//! use moodata_core::IndicatorEntry;
//!
//! let entry = IndicatorEntry::new("1. 用地红线面积", "㎡").with_value("12000");
//! assert_eq!(entry.value, "12000");
//! assert!(!entry.is_divider());
//! ```

use uuid::Uuid;

/// Name reserved for visual divider rows
pub const DIVIDER: &str = "__divider__";

/// A single indicator row
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndicatorEntry {
    /// Opaque identifier for UI focus tracking, never used as identity
    pub id: Uuid,
    /// Indicator name, unique within its group
    pub name: String,
    /// Current value as entered or computed
    pub value: String,
    /// Unit label (㎡, %, 户, ...)
    pub unit: String,
    /// Free-text note
    pub note: String,
}

impl IndicatorEntry {
    /// Create an empty indicator with a unit
    pub fn new(name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            value: String::new(),
            unit: unit.into(),
            note: String::new(),
        }
    }

    /// Create a section label row (no unit, no value)
    pub fn label(name: impl Into<String>) -> Self {
        Self::new(name, "")
    }

    /// Create a divider row
    pub fn divider() -> Self {
        Self::new(DIVIDER, "")
    }

    /// Set the value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Set the note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Whether this row is a divider sentinel
    pub fn is_divider(&self) -> bool {
        self.name == DIVIDER
    }

    /// Whether this row is a pure section label (nothing to edit or show)
    pub fn is_label(&self) -> bool {
        !self.is_divider() && self.value.is_empty() && self.unit.is_empty() && self.note.is_empty()
    }
}
