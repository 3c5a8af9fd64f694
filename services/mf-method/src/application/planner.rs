//! 克隆规划
//!
//! 对换发过新标识的源树做一次先序遍历，产出目标域的写计划。
//! 每个节点上：工序字段经配置解析器求值、费率经费率簿解析，
//! 然后套用整表覆盖；物料解析出最终物品身份后按 Make 与否
//! 分流，Make 物料挂出子方法并继续下钻。规划阶段全部在内存
//! 中完成，不触数据库。

use std::collections::HashMap;

use common::types::{CompanyId, UserId};
use errors::{AppError, AppResult};
use tracing::warn;
use uuid::Uuid;

use crate::domain::configuration::ConfigurationResolver;
use crate::domain::entities::{
    MakeMethod, MethodMaterial, MethodOperation, MethodOwner, OperationAttribute,
    OperationParameter, OperationTool,
};
use crate::domain::enums::MethodDomain;
use crate::domain::plan::{MethodWritePlan, WriteOp};
use crate::domain::rates::RateBook;
use crate::domain::tree::MethodTree;
use crate::domain::value_objects::{ConfigKey, ItemId, MakeMethodId, MaterialId, OperationId, ProcedureId};
use crate::domain::views::{Item, Procedure};

use super::procedure::apply_procedure_template;

/// 目标根锚点
#[derive(Debug, Clone)]
pub enum TargetAnchor {
    /// 目标根方法已存在：保留该行，重建其下全部内容
    Existing(MakeMethodId),
    /// 目标根方法不存在：以给定 ID 新建
    New(MakeMethodId),
}

/// 克隆目标描述
#[derive(Debug, Clone)]
pub struct TargetSpec {
    /// 目标域（决定写入哪一族表）
    pub domain: MethodDomain,
    /// 新建方法节点的归属
    pub owner: MethodOwner,
    /// 目标根物品 ID（自引用防护的起点）
    pub item_id: ItemId,
    /// 根锚点
    pub anchor: TargetAnchor,
    /// 咨询锁键来源，跨请求稳定
    pub lock_id: Uuid,
}

/// 整表覆盖统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOverrideStats {
    /// 覆盖清单中没有匹配到生成行的条目数
    pub unmatched_entries: u64,
    /// 未被覆盖清单点名而被丢弃的生成行数
    pub dropped_rows: u64,
}

struct BuiltOperation {
    source_id: OperationId,
    operation: MethodOperation,
}

struct BuiltMaterial {
    source_id: MaterialId,
    resolved_item: ItemId,
    is_make: bool,
    material: MethodMaterial,
}

/// 克隆规划器
///
/// 持有一次克隆所需的全部内存上下文：源树、按源方法分组的
/// 工序、配置解析器、费率簿、物品与指导书查找表。
pub struct ClonePlanner<'a> {
    tree: &'a MethodTree,
    resolver: &'a ConfigurationResolver,
    rates: &'a RateBook,
    operations: HashMap<MakeMethodId, Vec<&'a MethodOperation>>,
    items: &'a HashMap<ItemId, Item>,
    procedures: &'a HashMap<ProcedureId, Procedure>,
    company_id: CompanyId,
    user_id: UserId,
    list_stats: std::cell::Cell<ListOverrideStats>,
}

impl<'a> ClonePlanner<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tree: &'a MethodTree,
        operations: &'a [MethodOperation],
        resolver: &'a ConfigurationResolver,
        rates: &'a RateBook,
        items: &'a HashMap<ItemId, Item>,
        procedures: &'a HashMap<ProcedureId, Procedure>,
        company_id: CompanyId,
        user_id: UserId,
    ) -> Self {
        let mut grouped: HashMap<MakeMethodId, Vec<&'a MethodOperation>> = HashMap::new();
        for operation in operations {
            grouped
                .entry(operation.make_method_id().clone())
                .or_default()
                .push(operation);
        }
        for ops in grouped.values_mut() {
            ops.sort_by(|a, b| a.order().total_cmp(&b.order()));
        }
        Self {
            tree,
            resolver,
            rates,
            operations: grouped,
            items,
            procedures,
            company_id,
            user_id,
            list_stats: std::cell::Cell::new(ListOverrideStats::default()),
        }
    }

    pub fn list_stats(&self) -> ListOverrideStats {
        self.list_stats.get()
    }

    /// 产出一份完整写计划
    pub fn plan(&self, target: &TargetSpec) -> AppResult<MethodWritePlan> {
        let mut plan = MethodWritePlan::new(target.domain, target.lock_id);
        self.plan_into(&mut plan, target)?;
        Ok(plan)
    }

    /// 把克隆追加进既有计划（整单复制逐行共用一个计划）
    pub fn plan_into(&self, plan: &mut MethodWritePlan, target: &TargetSpec) -> AppResult<()> {
        let root_idx = self
            .tree
            .roots()
            .into_iter()
            .find(|idx| self.tree.data(*idx).is_some())
            .ok_or_else(|| AppError::internal("源方法树加载为空"))?;

        let root_method_id = match &target.anchor {
            TargetAnchor::Existing(method_id) => {
                plan.set_wipe_under(method_id.clone());
                method_id.clone()
            }
            TargetAnchor::New(method_id) => {
                plan.push(WriteOp::InsertMethod(MakeMethod::new(
                    method_id.clone(),
                    self.company_id.clone(),
                    target.item_id.clone(),
                    target.owner.clone(),
                    None,
                    1.0,
                    Some(self.user_id.clone()),
                )));
                method_id.clone()
            }
        };

        // (节点下标, 目标方法 ID, 当前遍历物品)
        let mut stack = vec![(root_idx, root_method_id, target.item_id.clone())];
        while let Some((node_idx, target_method_id, current_item_id)) = stack.pop() {
            let Some(data) = self.tree.data(node_idx) else {
                warn!("skipping placeholder node without data in source tree");
                continue;
            };
            let source_method = &data.method;

            // 工序：解析字段与费率，套用整表覆盖后写入
            let built_ops = self.build_operations(source_method, &target_method_id)?;
            let built_ops = self.apply_operation_override(source_method, built_ops);
            for built in built_ops {
                plan.push(WriteOp::InsertOperation(built.operation));
            }

            // 物料：解析物品身份与字段，套用整表覆盖后分流
            let mut sorted: Vec<&MethodMaterial> = data.materials.iter().collect();
            sorted.sort_by(|a, b| a.order().total_cmp(&b.order()));
            let built_materials: Vec<BuiltMaterial> = sorted
                .into_iter()
                .map(|source| self.resolve_material(source, &target_method_id, target.domain))
                .collect();
            let built_materials = self.apply_material_override(source_method, built_materials);

            for built in built_materials {
                let material_id = built.material.id().clone();
                let quantity = built.material.quantity();
                let is_make = built.is_make;
                let resolved_item = built.resolved_item;
                let source_material_id = built.source_id;
                plan.push(WriteOp::InsertMaterial(built.material));

                if !is_make {
                    continue;
                }
                // 自引用防护：解析出的物品就是当前在产物品时不再下钻
                if resolved_item == current_item_id {
                    warn!(
                        item_id = %resolved_item,
                        "material resolves to the item currently being built, skipping subtree"
                    );
                    continue;
                }
                let Some(child_idx) = self.tree.child_for_material(node_idx, &source_material_id)
                else {
                    continue;
                };
                let child_method_id = self.tree.key(child_idx).clone();
                plan.push(WriteOp::InsertMethod(MakeMethod::new(
                    child_method_id.clone(),
                    self.company_id.clone(),
                    resolved_item.clone(),
                    target.owner.clone(),
                    Some(material_id),
                    quantity,
                    Some(self.user_id.clone()),
                )));
                stack.push((child_idx, child_method_id, resolved_item));
            }
        }

        Ok(())
    }

    fn build_operations(
        &self,
        source_method: &MakeMethod,
        target_method_id: &MakeMethodId,
    ) -> AppResult<Vec<BuiltOperation>> {
        let Some(source_ops) = self.operations.get(source_method.id()) else {
            return Ok(Vec::new());
        };

        let mut out = Vec::with_capacity(source_ops.len());
        for source in source_ops {
            let node_id = source.id().0;
            let description =
                self.resolver
                    .resolve_string(node_id, "description", source.description());
            let mut operation = MethodOperation::new(
                OperationId::new(),
                self.company_id.clone(),
                target_method_id.clone(),
                source.process_id().clone(),
                description,
                source.kind(),
                source.order(),
                Some(self.user_id.clone()),
            );
            operation.set_operation_order(source.operation_order());
            operation.set_work_center(source.work_center_id().cloned());
            operation.set_timing(
                self.resolver
                    .resolve_f64(node_id, "setupTime", source.setup_time()),
                source.setup_unit(),
                self.resolver
                    .resolve_f64(node_id, "laborTime", source.labor_time()),
                source.labor_unit(),
                self.resolver
                    .resolve_f64(node_id, "machineTime", source.machine_time()),
                source.machine_unit(),
            );

            if source.kind().is_outside() {
                let outside = self
                    .rates
                    .outside_process_rates(source.process_id(), source.supplier_process_id());
                operation.set_outside_process(
                    source.supplier_process_id().cloned(),
                    outside.minimum_cost,
                    outside.lead_time,
                );
            } else {
                let rates = self
                    .rates
                    .labor_and_overhead_rates(source.process_id(), source.work_center_id());
                operation.set_rates(rates.labor_rate, rates.machine_rate, rates.overhead_rate);
            }

            operation.replace_tools(
                source
                    .tools()
                    .iter()
                    .map(|tool| OperationTool::new(tool.tool_id().clone(), tool.quantity()))
                    .collect(),
            );

            if let Some(procedure_id) = source.procedure_id() {
                // 挂了指导书的工序不直接复制参数/属性，走模板
                let procedure = self.procedures.get(procedure_id).ok_or_else(|| {
                    AppError::not_found(format!("作业指导书不存在: {}", procedure_id))
                })?;
                apply_procedure_template(&mut operation, procedure);
            } else {
                operation.replace_parameters(
                    source
                        .parameters()
                        .iter()
                        .map(|p| OperationParameter::new(p.key(), p.value()))
                        .collect(),
                );
                operation.replace_attributes(
                    source
                        .attributes()
                        .iter()
                        .map(|a| {
                            OperationAttribute::new(
                                a.name(),
                                a.attribute_type(),
                                a.min_value(),
                                a.max_value(),
                                a.description().map(str::to_string),
                            )
                        })
                        .collect(),
                );
                operation.set_work_instruction(source.work_instruction().cloned());
            }

            out.push(BuiltOperation {
                source_id: source.id().clone(),
                operation,
            });
        }
        Ok(out)
    }

    fn resolve_material(
        &self,
        source: &MethodMaterial,
        target_method_id: &MakeMethodId,
        domain: MethodDomain,
    ) -> BuiltMaterial {
        let node_id = source.id().0;

        // 物品身份可被配置覆盖；覆盖后成本/追溯/类型取解析后物品的值
        let default_item = source.item_id().to_string();
        let resolved_raw = self.resolver.resolve_string(node_id, "itemId", &default_item);
        let mut resolved_item_id = source.item_id().clone();
        if resolved_raw != default_item {
            match resolved_raw.parse::<Uuid>() {
                Ok(uuid) => resolved_item_id = ItemId::from_uuid(uuid),
                Err(_) => {
                    warn!(value = %resolved_raw, "itemId override is not a UUID, keeping source item");
                }
            }
        }

        let mut overridden = resolved_item_id != *source.item_id();
        if overridden && !self.items.contains_key(&resolved_item_id) {
            warn!(item_id = %resolved_item_id, "overridden item not found, keeping source item");
            resolved_item_id = source.item_id().clone();
            overridden = false;
        }

        let (item_type, method_type, tracking, uom, base_cost, base_description) = if overridden {
            match self.items.get(&resolved_item_id) {
                Some(item) => (
                    item.item_type(),
                    item.default_method_type(),
                    item.tracking(),
                    item.unit_of_measure_code().to_string(),
                    item.unit_cost(),
                    item.name().to_string(),
                ),
                None => (
                    source.item_type(),
                    source.method_type(),
                    source.tracking(),
                    source.unit_of_measure_code().to_string(),
                    source.unit_cost(),
                    source.description().to_string(),
                ),
            }
        } else {
            (
                source.item_type(),
                source.method_type(),
                source.tracking(),
                source.unit_of_measure_code().to_string(),
                source.unit_cost(),
                source.description().to_string(),
            )
        };

        let quantity = self.resolver.resolve_f64(node_id, "quantity", source.quantity());
        let description = self
            .resolver
            .resolve_string(node_id, "description", &base_description);
        let unit_cost = self.resolver.resolve_f64(node_id, "unitCost", base_cost);

        let mut material = MethodMaterial::new(
            MaterialId::new(),
            self.company_id.clone(),
            target_method_id.clone(),
            resolved_item_id.clone(),
            item_type,
            method_type,
            quantity,
            uom,
            unit_cost,
            description,
            source.order(),
            tracking,
            Some(self.user_id.clone()),
        );
        // 作业域先落单件用量，绝对需求量由级联重算回填
        if domain == MethodDomain::Job {
            material.set_estimated_quantity(quantity);
        }

        BuiltMaterial {
            source_id: source.id().clone(),
            resolved_item: resolved_item_id,
            is_make: method_type.is_make(),
            material,
        }
    }

    fn apply_operation_override(
        &self,
        source_method: &MakeMethod,
        built: Vec<BuiltOperation>,
    ) -> Vec<BuiltOperation> {
        let key = ConfigKey::bill_of_process(
            source_method.id().clone(),
            source_method.parent_material_id().cloned(),
        );
        let Some(entries) = self.resolver.resolve_list(&key) else {
            return built;
        };
        self.apply_list_override(
            &key,
            entries,
            built,
            |row, entry| {
                row.source_id.to_string() == entry || row.operation.description() == entry
            },
            |row| row.operation.description().to_string(),
            |row, order| row.operation.set_order(order),
        )
    }

    fn apply_material_override(
        &self,
        source_method: &MakeMethod,
        built: Vec<BuiltMaterial>,
    ) -> Vec<BuiltMaterial> {
        let key = ConfigKey::bill_of_material(
            source_method.id().clone(),
            source_method.parent_material_id().cloned(),
        );
        let Some(entries) = self.resolver.resolve_list(&key) else {
            return built;
        };
        self.apply_list_override(
            &key,
            entries,
            built,
            |row, entry| row.source_id.to_string() == entry || row.material.description() == entry,
            |row| row.material.description().to_string(),
            |row, order| row.material.set_order(order),
        )
    }

    /// 按覆盖清单重排并筛选生成行
    ///
    /// 清单是成员资格的权威：没被点名的生成行被丢弃（配置出的
    /// 变体有意排除可选项），每次丢弃都记 warn。
    fn apply_list_override<T>(
        &self,
        key: &ConfigKey,
        entries: Vec<String>,
        built: Vec<T>,
        matches: impl Fn(&T, &str) -> bool,
        describe: impl Fn(&T) -> String,
        set_order: impl Fn(&mut T, f64),
    ) -> Vec<T> {
        let mut remaining: Vec<Option<T>> = built.into_iter().map(Some).collect();
        let mut kept = Vec::with_capacity(entries.len());
        let mut stats = self.list_stats.get();

        for entry in &entries {
            let position = remaining
                .iter()
                .position(|slot| slot.as_ref().is_some_and(|row| matches(row, entry)));
            match position {
                Some(idx) => {
                    if let Some(mut row) = remaining[idx].take() {
                        set_order(&mut row, (kept.len() + 1) as f64);
                        kept.push(row);
                    }
                }
                None => {
                    stats.unmatched_entries += 1;
                    warn!(key = %key, entry = %entry, "list override entry matched no generated row");
                }
            }
        }
        for slot in remaining.into_iter().flatten() {
            stats.dropped_rows += 1;
            warn!(key = %key, description = %describe(&slot), "dropping generated row not named by list override");
        }

        self.list_stats.set(stats);
        kept
    }
}
