//! Formula model
//!
//! A formula names one output indicator, an ordered list of input indicators
//! and an operator. Keys are view-agnostic [`FieldRef`]s that get bound to the
//! view being evaluated.

use moodata_core::IndicatorKey;
use std::fmt;

/// Custom reducer over the ordered numeric inputs
pub type Reducer = fn(&[f64]) -> f64;

/// Number-to-text formatting applied to a result
pub type PostProcess = fn(f64) -> String;

/// A `(group, name)` pair, independent of any view
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldRef {
    pub group: String,
    pub name: String,
}

impl FieldRef {
    /// Create a new field reference
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }

    /// Bind to a view
    pub fn bind(&self, view: &str) -> IndicatorKey {
        IndicatorKey::new(view, &self.group, &self.name)
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.group, self.name.trim_start())
    }
}

/// How the inputs are combined
#[derive(Clone, Copy)]
pub enum Operator {
    /// Total of all inputs; blank or non-numeric inputs count as zero
    Sum,
    /// First input minus each following input
    Subtract,
    /// Product of all inputs
    Multiply,
    /// First input divided by each following input
    Divide,
    /// Caller-supplied reducer
    Custom(Reducer),
}

impl Operator {
    /// Whether blank inputs count as zero instead of blocking the result
    pub fn tolerates_missing(&self) -> bool {
        matches!(self, Operator::Sum)
    }

    /// Combine the inputs
    pub fn apply(&self, values: &[f64]) -> f64 {
        match self {
            Operator::Sum => values.iter().sum(),
            Operator::Multiply => values.iter().product(),
            Operator::Subtract => fold_first(values, |acc, v| acc - v),
            Operator::Divide => fold_first(values, |acc, v| acc / v),
            Operator::Custom(f) => f(values),
        }
    }

    /// Short symbol for listings
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Sum => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Custom(_) => "f",
        }
    }
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Sum => f.write_str("Sum"),
            Operator::Subtract => f.write_str("Subtract"),
            Operator::Multiply => f.write_str("Multiply"),
            Operator::Divide => f.write_str("Divide"),
            Operator::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

fn fold_first(values: &[f64], f: impl Fn(f64, f64) -> f64) -> f64 {
    match values.split_first() {
        Some((first, rest)) => rest.iter().fold(*first, |acc, v| f(acc, *v)),
        None => 0.0,
    }
}

/// A single declarative formula
#[derive(Debug, Clone)]
pub struct Formula {
    pub output: FieldRef,
    pub inputs: Vec<FieldRef>,
    pub operator: Operator,
    /// Formatting of the result; two decimals when absent
    pub post_process: Option<PostProcess>,
}

impl Formula {
    /// Create a formula with default formatting
    pub fn new(output: FieldRef, inputs: Vec<FieldRef>, operator: Operator) -> Self {
        Self {
            output,
            inputs,
            operator,
            post_process: None,
        }
    }

    /// Use a custom result formatting
    pub fn with_post_process(mut self, post_process: PostProcess) -> Self {
        self.post_process = Some(post_process);
        self
    }

    /// Format a result
    pub fn format(&self, value: f64) -> String {
        match self.post_process {
            Some(f) => f(value),
            None => moodata_core::format_number(value),
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = format!(" {} ", self.operator.symbol());
        let inputs: Vec<_> = self.inputs.iter().map(|i| i.name.trim_start()).collect();
        write!(f, "{} = {}", self.output, inputs.join(&sep))
    }
}
