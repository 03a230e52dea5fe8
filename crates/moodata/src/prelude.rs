//! Prelude module - common imports for moodata users
//!
//! ```rust
//! use moodata::prelude::*;
//! ```

pub use crate::{
    // Extension traits
    BookCalculationExt,
    CalculationStats,
    // Formulas
    Catalog,
    // CSV
    CsvReader,
    CsvWriter,
    // Error types
    Error,
    FormulaError,
    // Main types
    IndicatorBook,
    IndicatorEntry,
    IndicatorGroup,
    IndicatorView,
    JsonFileRepository,
    Result,
    ViewCalculationExt,
    // Persistence
    WorksheetRepository,
};
