//! Recalculation of the built-in formula catalog on the default template

use moodata::prelude::*;
use moodata::template::groups::*;
use pretty_assertions::assert_eq;

fn filled_view(catalog: &Catalog) -> IndicatorView {
    let mut view = IndicatorView::new("方案A");
    let inputs = [
        (PLANNING, "1. 用地红线面积", "10000"),
        (PLANNING, "3. 容积率", "2.5"),
        (AREA, " 地上建筑面积", "80000"),
        (AREA, " 地下建筑面积", "20000"),
        (AREA, " 住宅建筑面积", "60000"),
        (RESIDENTIAL, " 高层", "40000"),
        (RESIDENTIAL, " 洋房", "20000"),
        (EFFICIENCY, " 高层户数", "300"),
        (EFFICIENCY, " 洋房户数", "100"),
        (EFFICIENCY, "5. 小户型面积", "12000"),
        (PARKING, " 地上车位数量", "50"),
        (PARKING, " 地下车位数量", "450"),
        (PARKING, " 普通车位", "400"),
        (PARKING, " 无障碍车位", "10"),
        (PARKING, " 子母车位", "20"),
        (AMENITY, " 开发商产权配套面积", "1000"),
        (AMENITY, " 政府产权配套面积", "500"),
    ];
    for (group, name, value) in inputs {
        view.edit_and_recalculate(catalog, group, name, value).unwrap();
    }
    view
}

#[test]
fn test_full_default_chain() {
    let catalog = Catalog::with_defaults().unwrap();
    let view = filled_view(&catalog);

    let expected = [
        (PLANNING, "2. 计容建筑面积", "25000.00"),
        (AREA, "1. 总建筑面积", "100000.00"),
        (RESIDENTIAL, "2. 住宅计容面积", "60000.00"),
        (RESIDENTIAL, "3. 住宅不计容面积（地上）", "0.00"),
        (RESIDENTIAL, "4. 住宅不计容面积（地下）", "0.00"),
        (EFFICIENCY, "1. 开发效率", "25.00"),
        (EFFICIENCY, "2. 住宅可售比", "60.00"),
        (EFFICIENCY, "3. 总户数", "400.00"),
        (EFFICIENCY, "4. 户均建筑面积", "150.00"),
        (EFFICIENCY, "6. 小户型面积比", "20.00"),
        (PARKING, "1. 机动车位数量（报批）", "500.00"),
        (PARKING, "2. 可销售车位数（按自然数统计）", "430.00"),
        (PARKING, "4. 户均车位数", "1.25"),
        (PARKING, "5. 地下室单车位指标", "44.44"),
        (AMENITY, "1. 配套建筑面积", "1500.00"),
    ];
    for (group, name, value) in expected {
        assert_eq!(view.value(group, name), Some(value), "{} / {}", group, name);
    }
}

#[test]
fn test_clearing_an_input_clears_dependents() {
    let catalog = Catalog::with_defaults().unwrap();
    let mut view = filled_view(&catalog);

    view.edit_and_recalculate(&catalog, PLANNING, "3. 容积率", "").unwrap();

    assert_eq!(view.value(PLANNING, "2. 计容建筑面积"), Some(""));
    assert_eq!(view.value(EFFICIENCY, "1. 开发效率"), Some(""));
    // unrelated outputs keep their values
    assert_eq!(view.value(EFFICIENCY, "2. 住宅可售比"), Some("60.00"));
}

#[test]
fn test_division_by_zero_clears_output() {
    let catalog = Catalog::with_defaults().unwrap();
    let mut view = filled_view(&catalog);

    view.edit_and_recalculate(&catalog, PARKING, " 地下车位数量", "0").unwrap();

    assert_eq!(view.value(PARKING, "5. 地下室单车位指标"), Some(""));
    assert_eq!(view.value(PARKING, "1. 机动车位数量（报批）"), Some("50.00"));
}

#[test]
fn test_derived_indicators_are_read_only() {
    let catalog = Catalog::with_defaults().unwrap();
    let mut view = filled_view(&catalog);
    let before = view.clone();

    let err = view
        .edit_and_recalculate(&catalog, AREA, "1. 总建筑面积", "1")
        .unwrap_err();
    assert_eq!(
        err,
        Error::ReadOnlyIndicator {
            group: AREA.into(),
            name: "1. 总建筑面积".into()
        }
    );
    assert_eq!(view, before);
}

#[test]
fn test_comparison_shows_deltas() {
    let catalog = Catalog::with_defaults().unwrap();
    let base = filled_view(&catalog);
    let mut other = base.clone();
    other
        .edit_and_recalculate(&catalog, PLANNING, "3. 容积率", "2.4")
        .unwrap();

    let diff = moodata::compare_views(&base, &other);
    let planning = diff.iter().find(|g| g.group == PLANNING).unwrap();
    let far = planning
        .indicators
        .iter()
        .find(|i| i.name == "2. 计容建筑面积")
        .unwrap();
    assert_eq!(far.display(), "-1000");
    assert!(far.is_decrease());
}
