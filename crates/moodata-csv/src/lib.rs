//! # moodata-csv
//!
//! CSV import and export for MooData design indicator views.
//!
//! The format is a five-column table (`分组,指标,数值,单位,备注`) with no
//! quoting. Importing never creates indicators: rows are reconciled onto the
//! entries a view already has.

mod error;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator, HEADER};
pub use reader::{reconcile, CsvReader, ImportedRow, ReconcileReport};
pub use writer::CsvWriter;
