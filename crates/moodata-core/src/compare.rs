//! Side-by-side comparison of two views
//!
//! For every indicator of the compared view, the difference to the base view
//! is computed when both hold a number. Indicators only present in the
//! compared view, or with non-numeric values, carry their plain value.

use crate::number::{format_delta, parse_number};
use crate::view::IndicatorView;

/// Difference of one indicator between two views
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorDiff {
    pub name: String,
    pub unit: String,
    /// Value in the compared view
    pub value: String,
    /// `compared - base`, if both are numbers
    pub delta: Option<f64>,
}

impl IndicatorDiff {
    /// Text shown for this row: the delta, the plain value, or `-`
    pub fn display(&self) -> String {
        match self.delta {
            Some(d) => format_delta(d),
            None if self.value.is_empty() => "-".to_string(),
            None => self.value.clone(),
        }
    }

    /// Whether the compared value is lower than the base value
    pub fn is_decrease(&self) -> bool {
        matches!(self.delta, Some(d) if d < 0.0)
    }
}

/// Differences of one group
#[derive(Debug, Clone, PartialEq)]
pub struct GroupDiff {
    pub group: String,
    pub indicators: Vec<IndicatorDiff>,
}

/// Compare `other` against `base`, following the group layout of `other`.
pub fn compare_views(base: &IndicatorView, other: &IndicatorView) -> Vec<GroupDiff> {
    other
        .groups()
        .iter()
        .map(|group| {
            let base_group = base.group(&group.name);
            let indicators = group
                .data_entries()
                .filter(|e| !e.name.trim().is_empty())
                .map(|entry| {
                    let delta = base_group
                        .and_then(|g| g.entry(&entry.name))
                        .and_then(|b| Some(parse_number(&entry.value)? - parse_number(&b.value)?));
                    IndicatorDiff {
                        name: entry.name.clone(),
                        unit: entry.unit.clone(),
                        value: entry.value.clone(),
                        delta,
                    }
                })
                .collect();
            GroupDiff {
                group: group.name.clone(),
                indicators,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::groups;

    #[test]
    fn test_compare() {
        let mut a = IndicatorView::new("A");
        let mut b = IndicatorView::new("B");
        a.set_value(groups::PLANNING, "1. 用地红线面积", "1000").unwrap();
        b.set_value(groups::PLANNING, "1. 用地红线面积", "800").unwrap();
        b.set_value(groups::PLANNING, "3. 容积率", "2.5").unwrap();

        let diff = compare_views(&a, &b);
        assert_eq!(diff.len(), 6);

        let planning = &diff[0].indicators;
        assert_eq!(planning[0].delta, Some(-200.0));
        assert_eq!(planning[0].display(), "-200");
        assert!(planning[0].is_decrease());

        // base has no number for 容积率
        assert_eq!(planning[2].delta, None);
        assert_eq!(planning[2].display(), "2.5");

        assert_eq!(planning[1].display(), "-");
    }

    #[test]
    fn test_decimal_deltas_are_rounded() {
        let mut a = IndicatorView::new("A");
        let mut b = IndicatorView::new("B");
        a.set_value(groups::PLANNING, "3. 容积率", "2.5").unwrap();
        b.set_value(groups::PLANNING, "3. 容积率", "2.4").unwrap();
        a.set_value(groups::PLANNING, "4. 建筑密度", "30.1").unwrap();
        b.set_value(groups::PLANNING, "4. 建筑密度", "30.3").unwrap();

        let diff = compare_views(&a, &b);
        let planning = &diff[0].indicators;
        assert_eq!(planning[2].display(), "-0.1");
        assert!(planning[2].is_decrease());
        assert_eq!(planning[3].display(), "0.2");
    }

    #[test]
    fn test_dividers_excluded() {
        let a = IndicatorView::new("A");
        let diff = compare_views(&a, &a);
        assert!(diff
            .iter()
            .flat_map(|g| g.indicators.iter())
            .all(|i| i.name != crate::DIVIDER));
    }
}
