//! Default worksheet template
//!
//! Every new view starts from these six groups. Formula inputs and outputs in
//! the default catalog refer to the names below verbatim, including the
//! leading space of sub-items.

use crate::entry::IndicatorEntry;
use crate::group::IndicatorGroup;

/// Group names of the default template, in display order
pub mod groups {
    pub const PLANNING: &str = "一、规划指标";
    pub const AREA: &str = "二、建设面积指标";
    pub const RESIDENTIAL: &str = "三、住宅面积指标";
    pub const EFFICIENCY: &str = "四、开发效率指标";
    pub const PARKING: &str = "五、停车指标";
    pub const AMENITY: &str = "六、配套指标";
}

fn item(name: &str, unit: &str) -> IndicatorEntry {
    IndicatorEntry::new(name, unit)
}

fn noted(name: &str, unit: &str, note: &str) -> IndicatorEntry {
    IndicatorEntry::new(name, unit).with_note(note)
}

fn label(name: &str) -> IndicatorEntry {
    IndicatorEntry::label(name)
}

fn divider() -> IndicatorEntry {
    IndicatorEntry::divider()
}

/// Fresh groups for a new view, all values blank
pub fn default_groups() -> Vec<IndicatorGroup> {
    vec![
        IndicatorGroup::new(
            groups::PLANNING,
            vec![
                item("1. 用地红线面积", "㎡"),
                item("2. 计容建筑面积", "㎡"),
                item("3. 容积率", "/"),
                item("4. 建筑密度", "%"),
            ],
        ),
        IndicatorGroup::new(
            groups::AREA,
            vec![
                item("1. 总建筑面积", "㎡"),
                divider(),
                label("其中:"),
                item(" 地上建筑面积", "㎡"),
                item(" 地下建筑面积", "㎡"),
                divider(),
                label("其中:"),
                item(" 计容建筑面积", "㎡"),
                item(" 不计容建筑面积", "㎡"),
                divider(),
                label("其中:"),
                noted(" 住宅建筑面积", "㎡", "地上+地下建筑面积，可售"),
                item(" 配套及其他", "㎡"),
            ],
        ),
        IndicatorGroup::new(
            groups::RESIDENTIAL,
            vec![
                item("1. 住宅套内建筑面积", "㎡"),
                divider(),
                item("2. 住宅计容面积", "㎡"),
                label("其中:"),
                item(" 高层", "㎡"),
                item(" 洋房", "㎡"),
                item(" 低层住宅（别墅）", "㎡"),
                item(" 低层住宅（平层）", "㎡"),
                item(" 保障房", "㎡"),
                divider(),
                item("3. 住宅不计容面积（地上）", "㎡"),
                label("其中:"),
                noted(
                    " 政策奖励面积",
                    "㎡",
                    "屋顶不超过标准层面积1/8的出屋面楼梯间及设备机房，分摊",
                ),
                item(" 其他", "㎡"),
                divider(),
                item("4. 住宅不计容面积（地下）", "㎡"),
                label("其中:"),
                item(" 住宅共有部位", "㎡"),
                item(" 住宅独用面积", "㎡"),
            ],
        ),
        IndicatorGroup::new(
            groups::EFFICIENCY,
            vec![
                noted("1. 开发效率", "%", "计容面积/总建筑面积"),
                noted("2. 住宅可售比", "%", "住宅建筑面积/总建筑面积"),
                divider(),
                item("3. 总户数", "户"),
                label("其中："),
                item(" 高层户数", "户"),
                item(" 洋房户数", "户"),
                item(" 低层住宅（别墅）户数", "户"),
                item(" 低层住宅（平层）户数", "户"),
                item(" 保障房户数", "户"),
                divider(),
                noted("4. 户均建筑面积", "㎡/户", "住宅建筑面积/总户数"),
                item("5. 小户型面积", "㎡"),
                noted("6. 小户型面积比", "%", "小户型面积/ 住宅建筑面积"),
            ],
        ),
        IndicatorGroup::new(
            groups::PARKING,
            vec![
                noted("1. 机动车位数量（报批）", "辆", "按规范折算后"),
                label("其中："),
                item(" 地上车位数量", "辆"),
                item(" 地下车位数量", "辆"),
                divider(),
                item("2. 可销售车位数（按自然数统计）", "辆"),
                label("其中："),
                item(" 普通车位", "辆"),
                item(" 无障碍车位", "辆"),
                item(" 子母车位", "辆"),
                divider(),
                item("3. 不可销售车位数（按自然数统计）", "辆"),
                divider(),
                noted("4. 户均车位数", "辆/户", "机动车位数量/总户数"),
                noted("5. 地下室单车位指标", "㎡/辆", "地下建筑面积/地下车位数量"),
            ],
        ),
        IndicatorGroup::new(
            groups::AMENITY,
            vec![
                noted("1. 配套建筑面积", "㎡", "含计容和不计容配套面积"),
                divider(),
                label("其中：（按产权区分）"),
                noted(
                    " 开发商产权配套面积",
                    "㎡",
                    "物业用房、业委会、门卫、地库出入口",
                ),
                noted(
                    " 政府产权配套面积",
                    "㎡",
                    "配电房、变电站、门卫、垃圾房、架空层出入口、居委会、养老服务点、生活垃圾站、浴室锅炉房、变电站、及其他",
                ),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_groups_in_order() {
        let names: Vec<_> = default_groups().into_iter().map(|g| g.name).collect();
        assert_eq!(
            names,
            vec![
                groups::PLANNING,
                groups::AREA,
                groups::RESIDENTIAL,
                groups::EFFICIENCY,
                groups::PARKING,
                groups::AMENITY
            ]
        );
    }

    #[test]
    fn test_values_start_blank() {
        assert!(default_groups()
            .iter()
            .flat_map(|g| g.entries.iter())
            .all(|e| e.value.is_empty()));
    }
}
