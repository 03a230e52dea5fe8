//! # moodata-core
//!
//! Core data structures for the MooData design indicator worksheet.
//!
//! This crate provides the fundamental types used throughout moodata:
//! - [`IndicatorEntry`], [`IndicatorGroup`] - Rows and sections of a worksheet
//! - [`IndicatorView`], [`IndicatorBook`] - One worksheet tab, and all tabs of a project
//! - [`IndicatorKey`] and [`FlatValues`] - The flat projection the formula engine works on
//! - [`parse_number`] - The single numeric accessor for textual values
//!
//! ## Example
//!
//! ```rust
//! use moodata_core::{IndicatorBook, template::groups};
//!
//! let mut book = IndicatorBook::new();
//! book.add_view("方案A").unwrap();
//!
//! let view = book.view_mut("方案A").unwrap();
//! view.edit_value(groups::PLANNING, "1. 用地红线面积", "12000").unwrap();
//!
//! let flat = view.flat_map();
//! assert_eq!(flat.len(), view.values().len());
//! ```

pub mod book;
pub mod compare;
pub mod entry;
pub mod error;
pub mod group;
pub mod key;
pub mod number;
pub mod template;
pub mod view;

// Re-exports for convenience
pub use book::IndicatorBook;
pub use compare::{compare_views, GroupDiff, IndicatorDiff};
pub use entry::{IndicatorEntry, DIVIDER};
pub use error::{Error, Result};
pub use group::IndicatorGroup;
pub use key::{apply_flat_map, flatten_groups, to_flat_map, FlatValues, IndicatorKey, IndicatorValue};
pub use number::{format_delta, format_number, format_percent, normalize_input, parse_number, NormalizedInput};
pub use template::default_groups;
pub use view::IndicatorView;
