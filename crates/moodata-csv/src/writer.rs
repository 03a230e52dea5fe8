//! CSV writer
//!
//! Fields are written as they are, without quoting. A comma inside a name,
//! value, unit or note shifts the following columns of that row.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::{CsvWriteOptions, LineTerminator, HEADER};
use moodata_core::{IndicatorValue, IndicatorView, DIVIDER};

/// CSV file writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write a view to a CSV file
    pub fn write_file<P: AsRef<Path>>(
        view: &IndicatorView,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write(view, file, options)
    }

    /// Write a view to a writer
    pub fn write<W: Write>(
        view: &IndicatorView,
        writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        Self::write_values(&view.values(), |g, n| view.metadata(g, n), writer, options)
    }

    /// Render a view as CSV text with default options
    pub fn to_string(view: &IndicatorView) -> CsvResult<String> {
        let mut buf = Vec::new();
        Self::write(view, &mut buf, &CsvWriteOptions::default())?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Write value rows in the given order.
    ///
    /// `metadata` supplies unit and note for a `(group, name)`; unknown
    /// indicators get empty unit and note. Divider rows are skipped.
    pub fn write_values<'a, W, F>(
        values: &[IndicatorValue],
        metadata: F,
        writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<()>
    where
        W: Write,
        F: Fn(&str, &str) -> Option<(&'a str, &'a str)>,
    {
        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
        };

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote_style(csv::QuoteStyle::Never)
            .terminator(terminator)
            .flexible(true)
            .from_writer(writer);

        if options.write_header {
            csv_writer.write_record(HEADER)?;
        }

        let mut rows = 0usize;
        for v in values.iter().filter(|v| v.name != DIVIDER) {
            let (unit, note) = metadata(&v.group, &v.name).unwrap_or(("", ""));
            csv_writer.write_record([
                v.group.as_str(),
                v.name.as_str(),
                v.value.as_str(),
                unit,
                note,
            ])?;
            rows += 1;
        }

        csv_writer.flush()?;
        log::debug!("exported {} indicator rows", rows);
        Ok(())
    }
}
