//! # moodata
//!
//! Design indicator worksheets for real-estate planning.
//!
//! A project holds one or more views of the same indicator template. Users
//! type raw figures into a view, and a fixed catalog of formulas derives the
//! totals, ratios and per-unit figures from them.
//!
//! ## Features
//!
//! - Default indicator template with six groups
//! - Formula catalog validated for cycles and duplicate outputs
//! - Single-pass recalculation of a view
//! - CSV export and import that never creates indicators
//! - View comparison with numeric deltas
//! - JSON persistence of whole projects
//!
//! ## Example
//!
//! ```rust
//! use moodata::prelude::*;
//! use moodata::template::groups;
//!
//! let catalog = Catalog::with_defaults().unwrap();
//! let mut book = IndicatorBook::new();
//! book.add_view("方案A").unwrap();
//!
//! let view = book.view_mut("方案A").unwrap();
//! view.edit_and_recalculate(&catalog, groups::PLANNING, "1. 用地红线面积", "10000").unwrap();
//! view.edit_and_recalculate(&catalog, groups::PLANNING, "3. 容积率", "2,5").unwrap();
//!
//! assert_eq!(view.value(groups::PLANNING, "2. 计容建筑面积"), Some("25000.00"));
//!
//! let csv = CsvWriter::to_string(view).unwrap();
//! assert!(csv.starts_with("分组,指标,数值,单位,备注\n"));
//! ```

pub mod calculation;
pub mod prelude;
pub mod repository;

pub use calculation::{BookCalculationExt, CalculationStats, ViewCalculationExt};
pub use repository::{
    load_or_default, JsonFileRepository, MemoryRepository, RepositoryError, RepositoryResult,
    WorksheetRepository,
};

// Re-export core types
pub use moodata_core::{
    apply_flat_map, compare_views, default_groups, flatten_groups, format_delta, format_number,
    format_percent, normalize_input, parse_number, template, to_flat_map, Error, FlatValues,
    GroupDiff, IndicatorBook, IndicatorDiff, IndicatorEntry, IndicatorGroup, IndicatorKey,
    IndicatorValue, IndicatorView, NormalizedInput, Result, DIVIDER,
};

// Re-export formula types
pub use moodata_formula::{
    default_formulas, evaluate, Catalog, EvaluationReport, FieldRef, Formula, FormulaError,
    FormulaResult, Operator, PostProcess, Reducer,
};

// Re-export CSV types
pub use moodata_csv::{
    reconcile, CsvError, CsvReadOptions, CsvReader, CsvResult, CsvWriteOptions, CsvWriter,
    ImportedRow, LineTerminator, ReconcileReport, HEADER,
};
