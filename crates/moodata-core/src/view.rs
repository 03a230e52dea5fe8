//! Indicator view - one worksheet tab

use crate::entry::IndicatorEntry;
use crate::error::{Error, Result};
use crate::group::IndicatorGroup;
use crate::key::{apply_flat_map, flatten_groups, to_flat_map, FlatValues, IndicatorValue};
use crate::number::normalize_input;
use crate::template::default_groups;
use ahash::AHashSet;
use uuid::Uuid;

/// A named worksheet holding its own groups and entries
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndicatorView {
    /// Opaque identifier
    pub id: Uuid,
    name: String,
    groups: Vec<IndicatorGroup>,
}

impl IndicatorView {
    /// Create a view from the default template
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            groups: default_groups(),
        }
    }

    /// Create a view from explicit groups.
    ///
    /// Group names must be unique, and so must indicator names inside a
    /// group. Dividers and pure section labels may repeat.
    pub fn with_groups(name: impl Into<String>, groups: Vec<IndicatorGroup>) -> Result<Self> {
        validate_groups(&groups)?;
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            groups,
        })
    }

    /// Check group and indicator name uniqueness, as `with_groups` does.
    ///
    /// Views restored from storage bypass the constructor and should be
    /// checked with this.
    pub fn validate(&self) -> Result<()> {
        validate_groups(&self.groups)
    }

    /// View name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the view name (validation happens in the book)
    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Groups in display order
    pub fn groups(&self) -> &[IndicatorGroup] {
        &self.groups
    }

    /// Groups in display order, mutably
    pub fn groups_mut(&mut self) -> &mut [IndicatorGroup] {
        &mut self.groups
    }

    /// Get a group by name
    pub fn group(&self, name: &str) -> Option<&IndicatorGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Get an entry by group and indicator name
    pub fn entry(&self, group: &str, name: &str) -> Option<&IndicatorEntry> {
        self.group(group)?
            .entries
            .iter()
            .find(|e| !e.is_divider() && e.name == name)
    }

    /// Get an entry mutably
    pub fn entry_mut(&mut self, group: &str, name: &str) -> Option<&mut IndicatorEntry> {
        self.groups
            .iter_mut()
            .find(|g| g.name == group)?
            .entries
            .iter_mut()
            .find(|e| !e.is_divider() && e.name == name)
    }

    /// Unit and note of an indicator
    pub fn metadata(&self, group: &str, name: &str) -> Option<(&str, &str)> {
        self.entry(group, name)
            .map(|e| (e.unit.as_str(), e.note.as_str()))
    }

    /// Current value of an indicator
    pub fn value(&self, group: &str, name: &str) -> Option<&str> {
        self.entry(group, name).map(|e| e.value.as_str())
    }

    /// Store a value as-is
    pub fn set_value(&mut self, group: &str, name: &str, value: impl Into<String>) -> Result<()> {
        let entry = self.entry_mut(group, name).ok_or_else(|| not_found(group, name))?;
        entry.value = value.into();
        Ok(())
    }

    /// Store a value typed by the user.
    ///
    /// `,` is accepted as the decimal separator. Non-numeric text is rejected
    /// and the previous value stays in place.
    pub fn edit_value(&mut self, group: &str, name: &str, raw: &str) -> Result<()> {
        let value = normalize_input(raw)
            .into_value()
            .ok_or_else(|| Error::InvalidNumber(raw.to_string()))?;
        self.set_value(group, name, value)
    }

    /// Set the note of an indicator
    pub fn set_note(&mut self, group: &str, name: &str, note: impl Into<String>) -> Result<()> {
        let entry = self.entry_mut(group, name).ok_or_else(|| not_found(group, name))?;
        entry.note = note.into();
        Ok(())
    }

    /// Flattened value rows, in display order, dividers skipped
    pub fn values(&self) -> Vec<IndicatorValue> {
        flatten_groups(&self.groups, &self.name)
    }

    /// Flat projection of this view
    pub fn flat_map(&self) -> FlatValues {
        to_flat_map(self.values())
    }

    /// Write values of this view back from a flat projection
    pub fn apply_flat_map(&mut self, values: &FlatValues) -> usize {
        let name = self.name.clone();
        apply_flat_map(&mut self.groups, values, &name)
    }
}

fn not_found(group: &str, name: &str) -> Error {
    Error::IndicatorNotFound {
        group: group.into(),
        name: name.into(),
    }
}

fn validate_groups(groups: &[IndicatorGroup]) -> Result<()> {
    let mut group_names = AHashSet::new();
    for group in groups {
        if !group_names.insert(group.name.as_str()) {
            return Err(Error::DuplicateGroup(group.name.clone()));
        }

        let mut names = AHashSet::new();
        for entry in group.entries.iter().filter(|e| !e.is_divider() && !e.is_label()) {
            if !names.insert(entry.name.as_str()) {
                return Err(Error::DuplicateIndicator {
                    group: group.name.clone(),
                    name: entry.name.clone(),
                });
            }
        }
    }
    Ok(())
}
