//! Formula evaluator
//!
//! Applies formulas to the flat projection of one view, in list order, in a
//! single pass. Outputs written by a formula are visible to every formula
//! after it.

use crate::formula::Formula;
use moodata_core::{parse_number, FlatValues};

/// What happened during one evaluation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluationReport {
    /// Outputs that received a computed value
    pub written: usize,
    /// Outputs cleared because an input was missing or the result was not finite
    pub cleared: usize,
    /// Formulas whose output does not exist in the view
    pub skipped: usize,
}

/// Result of one formula before it is written back
enum Outcome {
    Value(String),
    Cleared,
}

/// Evaluate `formulas` in order against the values of `view`.
///
/// - Sum treats blank or non-numeric inputs as `0`.
/// - Every other operator needs all inputs to be numbers; otherwise the
///   output is cleared to `""`.
/// - A non-finite result (division by zero) also clears the output.
/// - An output that is not present in `values` is never created.
pub fn evaluate(values: &mut FlatValues, view: &str, formulas: &[Formula]) -> EvaluationReport {
    let mut report = EvaluationReport::default();

    for formula in formulas {
        let output = formula.output.bind(view);
        let outcome = evaluate_formula(values, view, formula);

        let Some(slot) = values.get_mut(&output) else {
            log::trace!("skipping {}: output not in view", output);
            report.skipped += 1;
            continue;
        };

        match outcome {
            Outcome::Value(text) => {
                log::trace!("{} = {}", output, text);
                *slot = text;
                report.written += 1;
            }
            Outcome::Cleared => {
                log::trace!("{} cleared", output);
                slot.clear();
                report.cleared += 1;
            }
        }
    }

    log::debug!(
        "evaluated {} formulas on '{}': {} written, {} cleared, {} skipped",
        formulas.len(),
        view,
        report.written,
        report.cleared,
        report.skipped
    );
    report
}

fn evaluate_formula(values: &FlatValues, view: &str, formula: &Formula) -> Outcome {
    let lookup = |input: &crate::formula::FieldRef| {
        values
            .get(&input.bind(view))
            .and_then(|v| parse_number(v))
    };

    let numbers: Vec<f64> = if formula.operator.tolerates_missing() {
        formula
            .inputs
            .iter()
            .map(|i| lookup(i).unwrap_or(0.0))
            .collect()
    } else {
        match formula.inputs.iter().map(lookup).collect::<Option<Vec<f64>>>() {
            Some(numbers) => numbers,
            None => return Outcome::Cleared,
        }
    };

    let result = formula.operator.apply(&numbers);
    if !result.is_finite() {
        return Outcome::Cleared;
    }

    Outcome::Value(formula.format(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{FieldRef, Operator};
    use moodata_core::IndicatorKey;
    use pretty_assertions::assert_eq;

    const VIEW: &str = "方案A";

    fn values(entries: &[(&str, &str)]) -> FlatValues {
        entries
            .iter()
            .map(|(name, value)| (IndicatorKey::new(VIEW, "g", *name), value.to_string()))
            .collect()
    }

    fn get<'a>(values: &'a FlatValues, name: &str) -> &'a str {
        &values[&IndicatorKey::new(VIEW, "g", name)]
    }

    fn formula(output: &str, inputs: &[&str], op: Operator) -> Formula {
        Formula::new(
            FieldRef::new("g", output),
            inputs.iter().map(|i| FieldRef::new("g", *i)).collect(),
            op,
        )
    }

    fn spread(values: &[f64]) -> f64 {
        values.iter().cloned().fold(f64::MIN, f64::max) - values.iter().cloned().fold(f64::MAX, f64::min)
    }

    #[test]
    fn test_sum_treats_blank_as_zero() {
        let mut v = values(&[("a", ""), ("b", "5"), ("out", "old")]);
        let report = evaluate(&mut v, VIEW, &[formula("out", &["a", "b"], Operator::Sum)]);
        assert_eq!(get(&v, "out"), "5.00");
        assert_eq!(report.written, 1);
    }

    #[test]
    fn test_sum_ignores_missing_and_garbage() {
        let mut v = values(&[("a", "x1"), ("out", "")]);
        evaluate(&mut v, VIEW, &[formula("out", &["a", "nope"], Operator::Sum)]);
        assert_eq!(get(&v, "out"), "0.00");
    }

    #[test]
    fn test_divide_with_missing_input_clears() {
        let mut v = values(&[("a", "10"), ("b", ""), ("out", "99")]);
        let report = evaluate(&mut v, VIEW, &[formula("out", &["a", "b"], Operator::Divide)]);
        assert_eq!(get(&v, "out"), "");
        assert_eq!(report.cleared, 1);
    }

    #[test]
    fn test_divide() {
        let mut v = values(&[("a", "100"), ("b", "4"), ("out", "")]);
        evaluate(&mut v, VIEW, &[formula("out", &["a", "b"], Operator::Divide)]);
        assert_eq!(get(&v, "out"), "25.00");
    }

    #[test]
    fn test_divide_by_zero_clears() {
        let mut v = values(&[("a", "10"), ("b", "0"), ("out", "1")]);
        evaluate(&mut v, VIEW, &[formula("out", &["a", "b"], Operator::Divide)]);
        assert_eq!(get(&v, "out"), "");
    }

    #[test]
    fn test_subtract_and_multiply() {
        let mut v = values(&[("a", "10"), ("b", "3"), ("c", "2"), ("d", ""), ("e", "")]);
        evaluate(
            &mut v,
            VIEW,
            &[
                formula("d", &["a", "b", "c"], Operator::Subtract),
                formula("e", &["a", "b", "c"], Operator::Multiply),
            ],
        );
        assert_eq!(get(&v, "d"), "5.00");
        assert_eq!(get(&v, "e"), "60.00");
    }

    #[test]
    fn test_custom_requires_all_inputs() {
        let mut v = values(&[("a", "10"), ("b", "3"), ("out", "")]);
        evaluate(&mut v, VIEW, &[formula("out", &["a", "b"], Operator::Custom(spread))]);
        assert_eq!(get(&v, "out"), "7.00");

        v.insert(IndicatorKey::new(VIEW, "g", "b"), "n/a".into());
        evaluate(&mut v, VIEW, &[formula("out", &["a", "b"], Operator::Custom(spread))]);
        assert_eq!(get(&v, "out"), "");
    }

    #[test]
    fn test_post_process() {
        let mut v = values(&[("a", "1"), ("b", "4"), ("out", "")]);
        let f = formula("out", &["a", "b"], Operator::Divide)
            .with_post_process(moodata_core::format_percent);
        evaluate(&mut v, VIEW, &[f]);
        assert_eq!(get(&v, "out"), "25.00");
    }

    #[test]
    fn test_later_formula_sees_earlier_output() {
        let mut v = values(&[("a", "2"), ("b", "3"), ("mid", ""), ("out", "")]);
        evaluate(
            &mut v,
            VIEW,
            &[
                formula("mid", &["a", "b"], Operator::Sum),
                formula("out", &["mid", "a"], Operator::Multiply),
            ],
        );
        assert_eq!(get(&v, "mid"), "5.00");
        assert_eq!(get(&v, "out"), "10.00");
    }

    #[test]
    fn test_missing_output_is_not_created() {
        let mut v = values(&[("a", "2")]);
        let report = evaluate(&mut v, VIEW, &[formula("out", &["a"], Operator::Sum)]);
        assert_eq!(report.skipped, 1);
        assert_eq!(v.len(), 1);
    }

    #[test]
    fn test_other_views_untouched() {
        let mut v = values(&[("a", "2"), ("out", "")]);
        v.insert(IndicatorKey::new("方案B", "g", "out"), "keep".into());
        evaluate(&mut v, VIEW, &[formula("out", &["a"], Operator::Sum)]);
        assert_eq!(v[&IndicatorKey::new("方案B", "g", "out")], "keep");
    }

    #[test]
    fn test_divider_rows_are_never_targeted() {
        use moodata_core::template::groups::AREA;
        use moodata_core::{IndicatorView, DIVIDER};

        let mut view = IndicatorView::new(VIEW);
        view.set_value(AREA, " 地上建筑面积", "80").unwrap();
        let before = view.clone();
        let mut v = view.flat_map();
        let len = v.len();

        let to_divider = Formula::new(
            FieldRef::new(AREA, DIVIDER),
            vec![FieldRef::new(AREA, " 地上建筑面积")],
            Operator::Sum,
        );
        let report = evaluate(&mut v, VIEW, &[to_divider]);
        assert_eq!(report.skipped, 1);
        assert_eq!(v.len(), len);
        assert!(!v.contains_key(&IndicatorKey::new(VIEW, AREA, DIVIDER)));

        view.apply_flat_map(&v);
        assert_eq!(view, before);
    }

    #[test]
    fn test_divider_inputs_have_no_value() {
        use moodata_core::template::groups::AREA;
        use moodata_core::{IndicatorView, DIVIDER};

        let mut view = IndicatorView::new(VIEW);
        view.set_value(AREA, " 地上建筑面积", "80").unwrap();
        let mut v = view.flat_map();

        let inputs = vec![FieldRef::new(AREA, " 地上建筑面积"), FieldRef::new(AREA, DIVIDER)];
        let formulas = [
            Formula::new(FieldRef::new(AREA, " 地下建筑面积"), inputs.clone(), Operator::Sum),
            Formula::new(FieldRef::new(AREA, " 不计容建筑面积"), inputs, Operator::Divide),
        ];
        evaluate(&mut v, VIEW, &formulas);

        assert_eq!(v[&IndicatorKey::new(VIEW, AREA, " 地下建筑面积")], "80.00");
        assert_eq!(v[&IndicatorKey::new(VIEW, AREA, " 不计容建筑面积")], "");
    }
}
