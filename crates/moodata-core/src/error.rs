//! Error types for moodata-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in moodata-core
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// View index out of bounds
    #[error("View index {0} out of bounds (count: {1})")]
    ViewOutOfBounds(usize, usize),

    /// View not found by name
    #[error("View not found: {0}")]
    ViewNotFound(String),

    /// Invalid view name
    #[error("Invalid view name: {0}")]
    InvalidViewName(String),

    /// Duplicate view name
    #[error("View name already exists: {0}")]
    DuplicateViewName(String),

    /// The only remaining view cannot be removed
    #[error("Cannot remove the last view of a project")]
    LastView,

    /// Two groups with the same name in one view
    #[error("Duplicate group in view: {0}")]
    DuplicateGroup(String),

    /// Two indicators with the same name in one group
    #[error("Duplicate indicator '{name}' in group '{group}'")]
    DuplicateIndicator { group: String, name: String },

    /// No indicator with this group/name in the view
    #[error("Indicator not found: {group} / {name}")]
    IndicatorNotFound { group: String, name: String },

    /// Indicator is derived by a formula and cannot be edited
    #[error("Indicator is read-only: {group} / {name}")]
    ReadOnlyIndicator { group: String, name: String },

    /// Entered text is not a number
    #[error("Not a number: '{0}'")]
    InvalidNumber(String),
}
