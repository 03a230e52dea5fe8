//! CSV reader and reconciliation
//!
//! Lines are split on every delimiter; quotes have no special meaning. Rows
//! with fewer than three fields are skipped.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::CsvReadOptions;
use moodata_core::IndicatorView;

/// One parsed data row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedRow {
    pub group: String,
    pub name: String,
    pub value: String,
    /// Fifth column; empty when absent
    pub note: String,
}

/// Outcome of applying imported rows to a view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Entries whose value was taken from the import
    pub updated: usize,
    /// Entries whose note was replaced
    pub notes_updated: usize,
    /// Imported rows that matched no entry
    pub dropped: usize,
}

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read rows from a CSV file
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Vec<ImportedRow>> {
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read rows from CSV text with default options
    pub fn read_str(text: &str) -> CsvResult<Vec<ImportedRow>> {
        Self::read(text.as_bytes(), &CsvReadOptions::default())
    }

    /// Read rows from a reader
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Vec<ImportedRow>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quoting(false)
            .flexible(true)
            .has_headers(false)
            .from_reader(reader);

        let mut header_pending = options.has_header;
        let mut rows = Vec::new();

        for result in csv_reader.records() {
            let record = result?;

            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }
            if header_pending {
                header_pending = false;
                continue;
            }
            if record.len() < 3 {
                log::debug!(
                    "skipping CSV line {}: {} fields",
                    record.position().map_or(0, |p| p.line()),
                    record.len()
                );
                continue;
            }

            rows.push(ImportedRow {
                group: record[0].to_string(),
                name: record[1].to_string(),
                value: record[2].to_string(),
                note: record.get(4).unwrap_or_default().to_string(),
            });
        }

        Ok(rows)
    }
}

/// Apply imported rows to the entries of a view.
///
/// - A row matching an existing `(group, name)` replaces its value.
/// - The note is replaced only when the imported note is non-empty.
/// - Rows matching nothing are dropped; no entries are created.
/// - Divider rows are never touched.
/// - When several rows name the same indicator, the first one wins.
pub fn reconcile(view: &mut IndicatorView, rows: &[ImportedRow]) -> ReconcileReport {
    let mut by_group: HashMap<&str, HashMap<&str, usize>> = HashMap::new();
    for (i, row) in rows.iter().enumerate() {
        by_group
            .entry(row.group.as_str())
            .or_default()
            .entry(row.name.as_str())
            .or_insert(i);
    }

    let mut used = vec![false; rows.len()];
    let mut report = ReconcileReport::default();

    for group in view.groups_mut() {
        let Some(names) = by_group.get(group.name.as_str()) else {
            continue;
        };
        for entry in group.entries.iter_mut().filter(|e| !e.is_divider()) {
            let Some(&i) = names.get(entry.name.as_str()) else {
                continue;
            };
            let row = &rows[i];
            used[i] = true;

            entry.value.clone_from(&row.value);
            report.updated += 1;
            if !row.note.is_empty() {
                entry.note.clone_from(&row.note);
                report.notes_updated += 1;
            }
        }
    }

    report.dropped = used.iter().filter(|u| !**u).count();
    log::debug!(
        "reconciled import into '{}': {} updated, {} notes, {} dropped",
        view.name(),
        report.updated,
        report.notes_updated,
        report.dropped
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodata_core::template::groups;
    use pretty_assertions::assert_eq;

    fn row(group: &str, name: &str, value: &str, note: &str) -> ImportedRow {
        ImportedRow {
            group: group.into(),
            name: name.into(),
            value: value.into(),
            note: note.into(),
        }
    }

    #[test]
    fn test_read_skips_header_blank_and_short_lines() {
        let text = "\n  \n分组,指标,数值,单位,备注\r\ng,a,1,㎡,n1\n\ng,b\ng,c,3\n";
        let rows = CsvReader::read_str(text).unwrap();
        assert_eq!(rows, vec![row("g", "a", "1", "n1"), row("g", "c", "3", "")]);
    }

    #[test]
    fn test_quotes_are_literal() {
        let rows = CsvReader::read_str("h\ng,\"a,b\",1\n").unwrap();
        assert_eq!(rows, vec![row("g", "\"a", "b\"", "")]);
    }

    #[test]
    fn test_header_only() {
        assert!(CsvReader::read_str("分组,指标,数值,单位,备注").unwrap().is_empty());
        assert!(CsvReader::read_str("").unwrap().is_empty());
    }

    #[test]
    fn test_reconcile_updates_matching_rows() {
        let mut view = IndicatorView::new("v");
        view.set_note(groups::PLANNING, "3. 容积率", "old").unwrap();
        view.set_note(groups::PLANNING, "4. 建筑密度", "keep").unwrap();

        let rows = vec![
            row(groups::PLANNING, "3. 容积率", "2.5", "new"),
            row(groups::PLANNING, "4. 建筑密度", "30", ""),
            row(groups::PLANNING, "9. 不存在", "1", "x"),
            row("七、其他", "3. 容积率", "7", ""),
        ];
        let report = reconcile(&mut view, &rows);

        assert_eq!(
            report,
            ReconcileReport {
                updated: 2,
                notes_updated: 1,
                dropped: 2
            }
        );
        let e = view.entry(groups::PLANNING, "3. 容积率").unwrap();
        assert_eq!((e.value.as_str(), e.note.as_str()), ("2.5", "new"));
        let e = view.entry(groups::PLANNING, "4. 建筑密度").unwrap();
        assert_eq!((e.value.as_str(), e.note.as_str()), ("30", "keep"));
        assert!(view.entry(groups::PLANNING, "9. 不存在").is_none());
    }

    #[test]
    fn test_reconcile_first_row_wins() {
        let mut view = IndicatorView::new("v");
        let rows = vec![
            row(groups::PLANNING, "3. 容积率", "1", ""),
            row(groups::PLANNING, "3. 容积率", "2", ""),
        ];
        let report = reconcile(&mut view, &rows);
        assert_eq!(view.value(groups::PLANNING, "3. 容积率"), Some("1"));
        assert_eq!(report.dropped, 1);
    }

    #[test]
    fn test_reconcile_never_targets_dividers() {
        let mut view = IndicatorView::new("v");
        let before = view.clone();
        let report = reconcile(&mut view, &[row(groups::AREA, moodata_core::DIVIDER, "9", "x")]);
        assert_eq!(report.updated, 0);
        assert_eq!(view, before);
    }
}
