//! Indicator keys and the flat value projection
//!
//! The formula engine works on a flat map from `(view, group, name)` to the
//! textual value rather than on the nested group/entry structure. This module
//! converts between the two.

use crate::group::IndicatorGroup;
use ahash::AHashMap;
use std::fmt;

/// Flat projection of a worksheet: key to textual value
pub type FlatValues = AHashMap<IndicatorKey, String>;

/// Unique identity of a value within one project's worksheets
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndicatorKey {
    pub view: String,
    pub group: String,
    pub name: String,
}

impl IndicatorKey {
    /// Create a new key
    pub fn new(
        view: impl Into<String>,
        group: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            view: view.into(),
            group: group.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for IndicatorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.view, self.group, self.name)
    }
}

/// One flattened value row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorValue {
    pub view: String,
    pub group: String,
    pub name: String,
    pub value: String,
}

impl IndicatorValue {
    /// The key identifying this value
    pub fn key(&self) -> IndicatorKey {
        IndicatorKey::new(&self.view, &self.group, &self.name)
    }
}

/// Build the flat projection.
///
/// Later rows with the same key overwrite earlier ones.
pub fn to_flat_map<I>(values: I) -> FlatValues
where
    I: IntoIterator<Item = IndicatorValue>,
{
    let mut map = FlatValues::default();
    for v in values {
        let key = IndicatorKey {
            view: v.view,
            group: v.group,
            name: v.name,
        };
        map.insert(key, v.value);
    }
    map
}

/// Flatten groups of one view into value rows, in display order.
///
/// Divider rows are not part of the projection.
pub fn flatten_groups(groups: &[IndicatorGroup], view: &str) -> Vec<IndicatorValue> {
    groups
        .iter()
        .flat_map(|group| {
            group.data_entries().map(move |entry| IndicatorValue {
                view: view.to_string(),
                group: group.name.clone(),
                name: entry.name.clone(),
                value: entry.value.clone(),
            })
        })
        .collect()
}

/// Write values from a flat projection back into groups of `view`.
///
/// Only values change; entries without a matching key keep their value and
/// no entries are added or removed. Returns the number of entries whose value
/// changed.
pub fn apply_flat_map(groups: &mut [IndicatorGroup], values: &FlatValues, view: &str) -> usize {
    let mut changed = 0;
    let mut key = IndicatorKey::new(view, "", "");

    for group in groups.iter_mut() {
        key.group.clone_from(&group.name);
        for entry in group.entries.iter_mut().filter(|e| !e.is_divider()) {
            key.name.clone_from(&entry.name);
            if let Some(value) = values.get(&key) {
                if entry.value != *value {
                    entry.value.clone_from(value);
                    changed += 1;
                }
            }
        }
    }

    changed
}
