//! Formula catalog
//!
//! The catalog holds the fixed list of formulas deriving read-only indicators
//! of a worksheet. On construction it checks the formulas for cycles and
//! duplicate outputs, and orders them so that every formula comes after the
//! formulas producing its inputs. A single pass over the ordered list then
//! sees up-to-date inputs everywhere.

use crate::dependency::DependencyGraph;
use crate::error::{FormulaError, FormulaResult};
use crate::evaluator::{evaluate, EvaluationReport};
use crate::formula::{FieldRef, Formula, Operator};
use ahash::{AHashMap, AHashSet};
use moodata_core::template::groups::{AMENITY, AREA, EFFICIENCY, PARKING, PLANNING, RESIDENTIAL};
use moodata_core::{format_percent, FlatValues};

/// An ordered, validated set of formulas
#[derive(Debug, Clone)]
pub struct Catalog {
    formulas: Vec<Formula>,
    read_only: AHashSet<FieldRef>,
}

impl Catalog {
    /// Validate and order a formula list.
    ///
    /// Declaration order is kept wherever dependencies allow it.
    pub fn new(formulas: Vec<Formula>) -> FormulaResult<Self> {
        let mut outputs: AHashMap<FieldRef, usize> = AHashMap::new();
        for (i, formula) in formulas.iter().enumerate() {
            if formula.inputs.is_empty() {
                return Err(FormulaError::NoInputs(formula.output.clone()));
            }
            if outputs.insert(formula.output.clone(), i).is_some() {
                return Err(FormulaError::DuplicateOutput(formula.output.clone()));
            }
        }

        let mut graph = DependencyGraph::new();
        for formula in &formulas {
            for input in &formula.inputs {
                graph.add_dependency(input.clone(), formula.output.clone());
            }
        }

        if let Some(formula) = formulas
            .iter()
            .find(|f| graph.has_circular_reference(&f.output))
        {
            return Err(FormulaError::CircularReference(formula.output.clone()));
        }

        let order = evaluation_order(&formulas, &outputs, &graph);
        let mut slots: Vec<Option<Formula>> = formulas.into_iter().map(Some).collect();
        let formulas: Vec<Formula> = order.into_iter().filter_map(|i| slots[i].take()).collect();

        let read_only = formulas.iter().map(|f| f.output.clone()).collect();
        log::debug!("formula catalog ready with {} formulas", formulas.len());

        Ok(Self {
            formulas,
            read_only,
        })
    }

    /// The built-in catalog of the design indicator worksheet
    pub fn with_defaults() -> FormulaResult<Self> {
        Self::new(default_formulas())
    }

    /// Formulas in evaluation order
    pub fn formulas(&self) -> &[Formula] {
        &self.formulas
    }

    /// Number of formulas
    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }

    /// Fields computed by a formula and therefore not editable
    pub fn read_only_fields(&self) -> &AHashSet<FieldRef> {
        &self.read_only
    }

    /// Whether `(group, name)` is computed by a formula
    pub fn is_read_only(&self, group: &str, name: &str) -> bool {
        self.read_only.contains(&FieldRef::new(group, name))
    }

    /// Evaluate all formulas against one view of a flat projection
    pub fn evaluate(&self, values: &mut FlatValues, view: &str) -> EvaluationReport {
        evaluate(values, view, &self.formulas)
    }
}

/// Stable topological order of formula indices.
///
/// Among the formulas whose inputs are ready, the one declared first goes
/// next. Must only be called on an acyclic graph.
fn evaluation_order(
    formulas: &[Formula],
    outputs: &AHashMap<FieldRef, usize>,
    graph: &DependencyGraph,
) -> Vec<usize> {
    let mut pending: Vec<usize> = formulas
        .iter()
        .map(|f| {
            let precedents: AHashSet<usize> = graph
                .get_precedents(&f.output)
                .filter_map(|p| outputs.get(p).copied())
                .collect();
            precedents.len()
        })
        .collect();

    let mut done = vec![false; formulas.len()];
    let mut order = Vec::with_capacity(formulas.len());

    while let Some(next) = (0..formulas.len()).find(|&i| !done[i] && pending[i] == 0) {
        done[next] = true;
        order.push(next);

        let dependents: AHashSet<usize> = graph
            .get_dependents(&formulas[next].output)
            .filter_map(|d| outputs.get(d).copied())
            .collect();
        for d in dependents {
            pending[d] = pending[d].saturating_sub(1);
        }
    }

    order
}

fn field(group: &str, name: &str) -> FieldRef {
    FieldRef::new(group, name)
}

/// Formulas of the design indicator worksheet, view-agnostic.
pub fn default_formulas() -> Vec<Formula> {
    vec![
        // 计容建筑面积 = 用地红线面积 × 容积率
        Formula::new(
            field(PLANNING, "2. 计容建筑面积"),
            vec![field(PLANNING, "1. 用地红线面积"), field(PLANNING, "3. 容积率")],
            Operator::Multiply,
        ),
        // 总建筑面积 = 地上 + 地下
        Formula::new(
            field(AREA, "1. 总建筑面积"),
            vec![field(AREA, " 地上建筑面积"), field(AREA, " 地下建筑面积")],
            Operator::Sum,
        ),
        Formula::new(
            field(RESIDENTIAL, "2. 住宅计容面积"),
            vec![
                field(RESIDENTIAL, " 高层"),
                field(RESIDENTIAL, " 洋房"),
                field(RESIDENTIAL, " 低层住宅（别墅）"),
                field(RESIDENTIAL, " 低层住宅（平层）"),
                field(RESIDENTIAL, " 保障房"),
            ],
            Operator::Sum,
        ),
        Formula::new(
            field(RESIDENTIAL, "3. 住宅不计容面积（地上）"),
            vec![field(RESIDENTIAL, " 政策奖励面积"), field(RESIDENTIAL, " 其他")],
            Operator::Sum,
        ),
        Formula::new(
            field(RESIDENTIAL, "4. 住宅不计容面积（地下）"),
            vec![
                field(RESIDENTIAL, " 住宅共有部位"),
                field(RESIDENTIAL, " 住宅独用面积"),
            ],
            Operator::Sum,
        ),
        Formula::new(
            field(EFFICIENCY, "3. 总户数"),
            vec![
                field(EFFICIENCY, " 高层户数"),
                field(EFFICIENCY, " 洋房户数"),
                field(EFFICIENCY, " 低层住宅（别墅）户数"),
                field(EFFICIENCY, " 低层住宅（平层）户数"),
                field(EFFICIENCY, " 保障房户数"),
            ],
            Operator::Sum,
        ),
        // 开发效率 = 计容建筑面积 / 总建筑面积 × 100
        Formula::new(
            field(EFFICIENCY, "1. 开发效率"),
            vec![field(PLANNING, "2. 计容建筑面积"), field(AREA, "1. 总建筑面积")],
            Operator::Divide,
        )
        .with_post_process(format_percent),
        Formula::new(
            field(EFFICIENCY, "2. 住宅可售比"),
            vec![field(AREA, " 住宅建筑面积"), field(AREA, "1. 总建筑面积")],
            Operator::Divide,
        )
        .with_post_process(format_percent),
        Formula::new(
            field(EFFICIENCY, "4. 户均建筑面积"),
            vec![field(AREA, " 住宅建筑面积"), field(EFFICIENCY, "3. 总户数")],
            Operator::Divide,
        ),
        Formula::new(
            field(EFFICIENCY, "6. 小户型面积比"),
            vec![field(EFFICIENCY, "5. 小户型面积"), field(AREA, " 住宅建筑面积")],
            Operator::Divide,
        )
        .with_post_process(format_percent),
        Formula::new(
            field(PARKING, "1. 机动车位数量（报批）"),
            vec![field(PARKING, " 地上车位数量"), field(PARKING, " 地下车位数量")],
            Operator::Sum,
        ),
        Formula::new(
            field(PARKING, "2. 可销售车位数（按自然数统计）"),
            vec![
                field(PARKING, " 普通车位"),
                field(PARKING, " 无障碍车位"),
                field(PARKING, " 子母车位"),
            ],
            Operator::Sum,
        ),
        Formula::new(
            field(PARKING, "4. 户均车位数"),
            vec![
                field(PARKING, "1. 机动车位数量（报批）"),
                field(EFFICIENCY, "3. 总户数"),
            ],
            Operator::Divide,
        ),
        Formula::new(
            field(PARKING, "5. 地下室单车位指标"),
            vec![field(AREA, " 地下建筑面积"), field(PARKING, " 地下车位数量")],
            Operator::Divide,
        ),
        Formula::new(
            field(AMENITY, "1. 配套建筑面积"),
            vec![
                field(AMENITY, " 开发商产权配套面积"),
                field(AMENITY, " 政府产权配套面积"),
            ],
            Operator::Sum,
        ),
    ]
}
