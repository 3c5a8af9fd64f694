//! 方法树查询

use std::collections::HashMap;

use common::types::CompanyId;
use serde::Serialize;

use crate::domain::entities::{MethodMaterial, MethodOperation};
use crate::domain::enums::MethodDomain;
use crate::domain::tree::MethodTree;
use crate::domain::value_objects::MakeMethodId;

/// 查询一棵已物化的方法树
#[derive(Debug, Clone)]
pub struct GetMethodTreeQuery {
    pub domain: MethodDomain,
    pub method_id: MakeMethodId,
    pub company_id: CompanyId,
}

/// 物料行投影
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialView {
    pub id: String,
    pub item_id: String,
    pub description: String,
    pub method_type: String,
    pub quantity: f64,
    pub estimated_quantity: Option<f64>,
    pub unit_of_measure_code: String,
    pub order: f64,
}

impl MaterialView {
    pub fn from_material(material: &MethodMaterial) -> Self {
        Self {
            id: material.id().to_string(),
            item_id: material.item_id().to_string(),
            description: material.description().to_string(),
            method_type: material.method_type().as_str().to_string(),
            quantity: material.quantity(),
            estimated_quantity: material.estimated_quantity(),
            unit_of_measure_code: material.unit_of_measure_code().to_string(),
            order: material.order(),
        }
    }
}

/// 工序投影
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationView {
    pub id: String,
    pub process_id: String,
    pub description: String,
    pub kind: String,
    pub setup_time: f64,
    pub labor_time: f64,
    pub machine_time: f64,
    pub operation_quantity: Option<f64>,
    pub order: f64,
}

impl OperationView {
    pub fn from_operation(operation: &MethodOperation) -> Self {
        Self {
            id: operation.id().to_string(),
            process_id: operation.process_id().to_string(),
            description: operation.description().to_string(),
            kind: operation.kind().as_str().to_string(),
            setup_time: operation.setup_time(),
            labor_time: operation.labor_time(),
            machine_time: operation.machine_time(),
            operation_quantity: operation.operation_quantity(),
            order: operation.order(),
        }
    }
}

/// 方法树节点投影（嵌套 JSON）
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodTreeView {
    pub method_id: String,
    pub item_id: String,
    pub parent_material_id: Option<String>,
    pub quantity_per_parent: f64,
    pub materials: Vec<MaterialView>,
    pub operations: Vec<OperationView>,
    pub children: Vec<MethodTreeView>,
}

impl MethodTreeView {
    /// 从给定节点向下组装嵌套投影
    ///
    /// 占位节点（父引用悬空补出来的壳）返回空，物料与工序
    /// 都按排序字段排列。
    pub fn assemble(
        tree: &MethodTree,
        idx: usize,
        operations: &HashMap<MakeMethodId, Vec<MethodOperation>>,
    ) -> Option<Self> {
        let data = tree.data(idx)?;
        let method = &data.method;

        let mut materials: Vec<&MethodMaterial> = data.materials.iter().collect();
        materials.sort_by(|a, b| a.order().total_cmp(&b.order()));

        let mut node_operations: Vec<&MethodOperation> = operations
            .get(method.id())
            .map(|ops| ops.iter().collect())
            .unwrap_or_default();
        node_operations.sort_by(|a, b| a.order().total_cmp(&b.order()));

        let children = tree
            .children(idx)
            .iter()
            .filter_map(|child_idx| Self::assemble(tree, *child_idx, operations))
            .collect();

        Some(Self {
            method_id: method.id().to_string(),
            item_id: method.item_id().to_string(),
            parent_material_id: method.parent_material_id().map(|id| id.to_string()),
            quantity_per_parent: method.quantity_per_parent(),
            materials: materials.into_iter().map(MaterialView::from_material).collect(),
            operations: node_operations
                .into_iter()
                .map(OperationView::from_operation)
                .collect(),
            children,
        })
    }
}
