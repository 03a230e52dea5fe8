//! View recalculation
//!
//! Ties the flat projection, the formula catalog and the write-back together:
//! project a view, evaluate the catalog on it, and copy the results into the
//! view's entries.
//!
//! # Example
//!
//! ```rust
//! use moodata::prelude::*;
//! use moodata::template::groups;
//!
//! let catalog = Catalog::with_defaults().unwrap();
//! let mut view = IndicatorView::new("方案A");
//!
//! view.edit_and_recalculate(&catalog, groups::AREA, " 地上建筑面积", "80000").unwrap();
//! view.edit_and_recalculate(&catalog, groups::AREA, " 地下建筑面积", "20000").unwrap();
//!
//! assert_eq!(view.value(groups::AREA, "1. 总建筑面积"), Some("100000.00"));
//! ```

use crate::{
    reconcile, Catalog, CsvReadOptions, CsvReader, CsvResult, Error, IndicatorBook,
    IndicatorView, ImportedRow, ReconcileReport, Result,
};
use std::path::Path;

/// Statistics from a recalculation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CalculationStats {
    /// Number of formulas evaluated
    pub formula_count: usize,
    /// Outputs that received a value
    pub written: usize,
    /// Outputs cleared for missing inputs or a non-finite result
    pub cleared: usize,
    /// Formulas whose output is not part of the view
    pub skipped: usize,
    /// Entries whose stored value actually changed
    pub changed: usize,
}

impl CalculationStats {
    fn merge(&mut self, other: CalculationStats) {
        self.formula_count += other.formula_count;
        self.written += other.written;
        self.cleared += other.cleared;
        self.skipped += other.skipped;
        self.changed += other.changed;
    }
}

/// Extension trait for IndicatorView to add calculation methods
pub trait ViewCalculationExt {
    /// Recompute all derived indicators
    fn recalculate(&mut self, catalog: &Catalog) -> CalculationStats;

    /// Apply a user edit, then recompute.
    ///
    /// Derived indicators cannot be edited. Non-numeric input is rejected and
    /// leaves the view unchanged.
    fn edit_and_recalculate(
        &mut self,
        catalog: &Catalog,
        group: &str,
        name: &str,
        raw: &str,
    ) -> Result<CalculationStats>;

    /// Reconcile imported rows, then recompute
    fn import_rows(&mut self, catalog: &Catalog, rows: &[ImportedRow]) -> ReconcileReport;

    /// Read a CSV file and import it.
    ///
    /// A file that cannot be read leaves the view unchanged.
    fn import_csv_file<P: AsRef<Path>>(
        &mut self,
        catalog: &Catalog,
        path: P,
    ) -> CsvResult<ReconcileReport>;
}

impl ViewCalculationExt for IndicatorView {
    fn recalculate(&mut self, catalog: &Catalog) -> CalculationStats {
        let mut values = self.flat_map();
        let report = catalog.evaluate(&mut values, self.name());
        let changed = self.apply_flat_map(&values);

        log::debug!("recalculated '{}': {} values changed", self.name(), changed);
        CalculationStats {
            formula_count: catalog.len(),
            written: report.written,
            cleared: report.cleared,
            skipped: report.skipped,
            changed,
        }
    }

    fn edit_and_recalculate(
        &mut self,
        catalog: &Catalog,
        group: &str,
        name: &str,
        raw: &str,
    ) -> Result<CalculationStats> {
        if catalog.is_read_only(group, name) {
            return Err(Error::ReadOnlyIndicator {
                group: group.into(),
                name: name.into(),
            });
        }
        self.edit_value(group, name, raw)?;
        Ok(self.recalculate(catalog))
    }

    fn import_rows(&mut self, catalog: &Catalog, rows: &[ImportedRow]) -> ReconcileReport {
        let report = reconcile(self, rows);
        self.recalculate(catalog);
        report
    }

    fn import_csv_file<P: AsRef<Path>>(
        &mut self,
        catalog: &Catalog,
        path: P,
    ) -> CsvResult<ReconcileReport> {
        let rows = CsvReader::read_file(path, &CsvReadOptions::default())?;
        Ok(self.import_rows(catalog, &rows))
    }
}

/// Extension trait for IndicatorBook to recompute every view
pub trait BookCalculationExt {
    /// Recompute all derived indicators of all views
    fn recalculate_all(&mut self, catalog: &Catalog) -> CalculationStats;
}

impl BookCalculationExt for IndicatorBook {
    fn recalculate_all(&mut self, catalog: &Catalog) -> CalculationStats {
        let mut stats = CalculationStats::default();
        for view in self.views_mut() {
            stats.merge(view.recalculate(catalog));
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::groups;

    fn catalog() -> Catalog {
        Catalog::with_defaults().unwrap()
    }

    #[test]
    fn test_recalculate_blank_view() {
        let mut view = IndicatorView::new("v");
        let stats = view.recalculate(&catalog());
        assert_eq!(stats.formula_count, 15);
        assert_eq!(stats.skipped, 0);
        // sums over blank inputs give zero, ratios stay blank
        assert_eq!(view.value(groups::AREA, "1. 总建筑面积"), Some("0.00"));
        assert_eq!(view.value(groups::EFFICIENCY, "1. 开发效率"), Some(""));
    }

    #[test]
    fn test_read_only_edit_rejected() {
        let mut view = IndicatorView::new("v");
        let err = view
            .edit_and_recalculate(&catalog(), groups::AREA, "1. 总建筑面积", "5")
            .unwrap_err();
        assert!(matches!(err, Error::ReadOnlyIndicator { .. }));
    }

    #[test]
    fn test_invalid_edit_keeps_value() {
        let mut view = IndicatorView::new("v");
        let catalog = catalog();
        view.edit_and_recalculate(&catalog, groups::PLANNING, "3. 容积率", "2")
            .unwrap();
        let err = view.edit_and_recalculate(&catalog, groups::PLANNING, "3. 容积率", "two");
        assert_eq!(err, Err(Error::InvalidNumber("two".into())));
        assert_eq!(view.value(groups::PLANNING, "3. 容积率"), Some("2"));
    }

    #[test]
    fn test_recalculate_is_idempotent() {
        let catalog = catalog();
        let mut view = IndicatorView::new("v");
        view.set_value(groups::PARKING, " 地上车位数量", "10").unwrap();
        view.recalculate(&catalog);
        let stats = view.recalculate(&catalog);
        assert_eq!(stats.changed, 0);
    }

    #[test]
    fn test_book_recalculates_every_view() {
        let mut book = IndicatorBook::new();
        book.add_view("A").unwrap();
        book.add_view("B").unwrap();
        let stats = book.recalculate_all(&catalog());
        assert_eq!(stats.formula_count, 30);
        assert_eq!(
            book.view("B").unwrap().value(groups::AMENITY, "1. 配套建筑面积"),
            Some("0.00")
        );
    }
}
