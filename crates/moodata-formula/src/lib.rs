//! # moodata-formula
//!
//! Formula catalog and evaluator for MooData design indicators.
//!
//! This crate provides:
//! - The formula model (output, inputs, operator, formatting)
//! - The built-in catalog of worksheet formulas
//! - Dependency tracking and cycle detection for catalogs
//! - Single-pass evaluation over a flat value projection
//!
//! ## Example
//!
//! ```rust
//! use moodata_core::IndicatorView;
//! use moodata_core::template::groups;
//! use moodata_formula::Catalog;
//!
//! let catalog = Catalog::with_defaults().unwrap();
//! let mut view = IndicatorView::new("方案A");
//! view.set_value(groups::PLANNING, "1. 用地红线面积", "10000").unwrap();
//! view.set_value(groups::PLANNING, "3. 容积率", "2.5").unwrap();
//!
//! let mut values = view.flat_map();
//! catalog.evaluate(&mut values, view.name());
//! view.apply_flat_map(&values);
//!
//! assert_eq!(view.value(groups::PLANNING, "2. 计容建筑面积"), Some("25000.00"));
//! ```

pub mod catalog;
pub mod dependency;
pub mod error;
pub mod evaluator;
pub mod formula;

pub use catalog::{default_formulas, Catalog};
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{evaluate, EvaluationReport};
pub use formula::{FieldRef, Formula, Operator, PostProcess, Reducer};
