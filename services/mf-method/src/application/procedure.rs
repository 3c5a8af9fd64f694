//! 指导书模板套用
//!
//! 挂了指导书的工序不保留自己的参数和属性副本，统一以模板为准。
//! 克隆时在内存里直接铺模板；对已落库的工序做同步时产出差分
//! 写操作：属性按（名称, 类型）对齐做增删改，参数整体替换，
//! 指导内容无条件覆盖。

use std::collections::HashSet;

use crate::domain::entities::{MethodOperation, OperationAttribute, OperationParameter};
use crate::domain::plan::{MethodWritePlan, WriteOp};
use crate::domain::views::Procedure;

/// 指导书同步结果摘要
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcedureSyncSummary {
    pub attributes_updated: u64,
    pub attributes_inserted: u64,
    pub attributes_deleted: u64,
    pub parameters_written: u64,
}

/// 把模板内容铺到内存中的新工序上
///
/// 参数与属性按模板排序号排列，指导内容整体取模板的。
pub fn apply_procedure_template(operation: &mut MethodOperation, procedure: &Procedure) {
    operation.set_procedure(procedure.id().clone());

    let mut parameters: Vec<_> = procedure.parameters().to_vec();
    parameters.sort_by(|a, b| a.sort_order().total_cmp(&b.sort_order()));
    operation.replace_parameters(
        parameters
            .iter()
            .map(|template| OperationParameter::new(template.key(), template.value()))
            .collect(),
    );

    let mut attributes: Vec<_> = procedure.attributes().to_vec();
    attributes.sort_by(|a, b| a.sort_order().total_cmp(&b.sort_order()));
    operation.replace_attributes(
        attributes
            .iter()
            .map(|template| {
                OperationAttribute::new(
                    template.name(),
                    template.attribute_type(),
                    template.min_value(),
                    template.max_value(),
                    template.description().map(str::to_string),
                )
            })
            .collect(),
    );

    operation.set_work_instruction(procedure.content().cloned());
}

/// 对已落库的工序产出指导书同步差分
///
/// 属性以（名称, 类型）为对齐键：命中的就地更新，保住历史上
/// 已录入的检验记录外键；落空的旧属性删除；模板新增的插入。
/// 参数没有这种外键顾虑，先清后插整体替换。
pub fn plan_procedure_sync(
    plan: &mut MethodWritePlan,
    operation: &MethodOperation,
    procedure: &Procedure,
) -> ProcedureSyncSummary {
    let mut summary = ProcedureSyncSummary::default();
    let operation_id = operation.id().clone();

    let mut templates: Vec<_> = procedure.attributes().to_vec();
    templates.sort_by(|a, b| a.sort_order().total_cmp(&b.sort_order()));

    let mut matched_templates: HashSet<usize> = HashSet::new();
    for existing in operation.attributes() {
        let matched = templates
            .iter()
            .enumerate()
            .find(|(idx, template)| {
                !matched_templates.contains(idx) && template.match_key() == existing.match_key()
            })
            .map(|(idx, _)| idx);
        match matched {
            Some(idx) => {
                matched_templates.insert(idx);
                let template = &templates[idx];
                plan.push(WriteOp::UpdateAttribute {
                    attribute_id: existing.id(),
                    min_value: template.min_value(),
                    max_value: template.max_value(),
                    description: template.description().map(str::to_string),
                });
                summary.attributes_updated += 1;
            }
            None => {
                plan.push(WriteOp::DeleteAttribute {
                    attribute_id: existing.id(),
                });
                summary.attributes_deleted += 1;
            }
        }
    }
    for (idx, template) in templates.iter().enumerate() {
        if matched_templates.contains(&idx) {
            continue;
        }
        plan.push(WriteOp::InsertAttribute {
            operation_id: operation_id.clone(),
            attribute: OperationAttribute::new(
                template.name(),
                template.attribute_type(),
                template.min_value(),
                template.max_value(),
                template.description().map(str::to_string),
            ),
        });
        summary.attributes_inserted += 1;
    }

    plan.push(WriteOp::DeleteParameters {
        operation_id: operation_id.clone(),
    });
    let mut parameters: Vec<_> = procedure.parameters().to_vec();
    parameters.sort_by(|a, b| a.sort_order().total_cmp(&b.sort_order()));
    for template in &parameters {
        plan.push(WriteOp::InsertParameter {
            operation_id: operation_id.clone(),
            parameter: OperationParameter::new(template.key(), template.value()),
        });
        summary.parameters_written += 1;
    }

    plan.push(WriteOp::UpdateOperationInstruction {
        operation_id,
        procedure_id: procedure.id().clone(),
        work_instruction: procedure.content().cloned(),
    });

    summary
}
