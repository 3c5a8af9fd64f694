//! 需求量级联重算
//!
//! 作业数量或某个节点的单位用量改动后，从给定根出发把绝对
//! 需求量逐层乘下去：每条物料的需求量是自身单位用量乘以父层
//! 数量，挂子方法的物料同时把子方法的单位用量、子方法工序的
//! 加工数量和追溯单元数量一并刷新。根方法自身的工序不在刷新
//! 范围内，只有经连接物料下钻到的子方法才会被触达。

use std::collections::HashMap;

use errors::{AppError, AppResult};
use tracing::warn;

use crate::domain::entities::{MethodOperation, TrackedEntity};
use crate::domain::plan::{MethodWritePlan, WriteOp};
use crate::domain::tree::MethodTree;
use crate::domain::value_objects::MakeMethodId;

/// 需求量重算规划器
///
/// 与克隆规划器同构：上下文全部预加载，规划本身是纯内存遍历。
pub struct RequirementsPlanner<'a> {
    tree: &'a MethodTree,
    operations: HashMap<MakeMethodId, Vec<&'a MethodOperation>>,
    tracked: HashMap<MakeMethodId, Vec<&'a TrackedEntity>>,
}

impl<'a> RequirementsPlanner<'a> {
    pub fn new(
        tree: &'a MethodTree,
        operations: &'a [MethodOperation],
        tracked: &'a [TrackedEntity],
    ) -> Self {
        let mut grouped_ops: HashMap<MakeMethodId, Vec<&'a MethodOperation>> = HashMap::new();
        for operation in operations {
            grouped_ops
                .entry(operation.make_method_id().clone())
                .or_default()
                .push(operation);
        }
        let mut grouped_tracked: HashMap<MakeMethodId, Vec<&'a TrackedEntity>> = HashMap::new();
        for entity in tracked {
            if let Some(method_id) = entity.job_make_method_id() {
                grouped_tracked
                    .entry(method_id.clone())
                    .or_default()
                    .push(entity);
            }
        }
        Self {
            tree,
            operations: grouped_ops,
            tracked: grouped_tracked,
        }
    }

    /// 从 `root` 出发，以 `root_quantity` 为顶层数量追加级联更新
    pub fn plan(
        &self,
        plan: &mut MethodWritePlan,
        root: &MakeMethodId,
        root_quantity: f64,
    ) -> AppResult<()> {
        let root_idx = self
            .tree
            .find_by_key(root)
            .ok_or_else(|| AppError::not_found("方法不在作业方法树中"))?;

        // (节点下标, 父层数量)
        let mut stack = vec![(root_idx, root_quantity)];
        while let Some((node_idx, parent_quantity)) = stack.pop() {
            let Some(data) = self.tree.data(node_idx) else {
                warn!("skipping placeholder node without data during recalculation");
                continue;
            };
            for material in &data.materials {
                let current = material.quantity() * parent_quantity;
                plan.push(WriteOp::UpdateMaterialEstimatedQuantity {
                    material_id: material.id().clone(),
                    estimated_quantity: current,
                });

                let Some(child_idx) = self.tree.child_for_material(node_idx, material.id())
                else {
                    continue;
                };
                let child_method_id = self.tree.key(child_idx).clone();
                plan.push(WriteOp::UpdateMethodQuantity {
                    method_id: child_method_id.clone(),
                    quantity_per_parent: material.quantity(),
                });
                if let Some(operations) = self.operations.get(&child_method_id) {
                    for operation in operations {
                        plan.push(WriteOp::UpdateOperationQuantity {
                            operation_id: operation.id().clone(),
                            operation_quantity: current,
                        });
                    }
                }
                if let Some(entities) = self.tracked.get(&child_method_id) {
                    // 序列追溯按件生产，单元数量恒为 1
                    let entity_quantity = if material.tracking().is_serial() {
                        1.0
                    } else {
                        current
                    };
                    for entity in entities {
                        plan.push(WriteOp::UpdateTrackedEntityQuantity {
                            tracked_entity_id: entity.id().clone(),
                            quantity: entity_quantity,
                        });
                    }
                }
                stack.push((child_idx, current));
            }
        }
        Ok(())
    }
}
