//! CSV options

/// Header row of exported worksheets
pub const HEADER: [&str; 5] = ["分组", "指标", "数值", "单位", "备注"];

/// Options for reading CSV files
#[derive(Debug, Clone)]
pub struct CsvReadOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Whether the first non-blank line is a header
    pub has_header: bool,
}

impl Default for CsvReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
        }
    }
}

/// Options for writing CSV files
#[derive(Debug, Clone)]
pub struct CsvWriteOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Write header row
    pub write_header: bool,
    /// Line terminator
    pub line_terminator: LineTerminator,
}

impl Default for CsvWriteOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            write_header: true,
            line_terminator: LineTerminator::LF,
        }
    }
}

/// Line terminator type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTerminator {
    /// Unix-style (LF)
    LF,
    /// Windows-style (CRLF)
    CRLF,
}
