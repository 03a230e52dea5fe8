//! Formula error types

use crate::formula::FieldRef;
use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors raised while building a formula catalog.
///
/// Evaluation itself never fails: missing inputs clear the output field and
/// unknown keys are ignored.
#[derive(Debug, Error, PartialEq)]
pub enum FormulaError {
    /// Formulas depend on each other in a cycle
    #[error("Circular reference detected involving {0}")]
    CircularReference(FieldRef),

    /// Two formulas write the same indicator
    #[error("Indicator {0} is the output of more than one formula")]
    DuplicateOutput(FieldRef),

    /// A formula without inputs
    #[error("Formula for {0} has no inputs")]
    NoInputs(FieldRef),
}
