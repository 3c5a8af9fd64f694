//! PostgreSQL 仓储实现
//!
//! 方法族的读写按域做表名参数化，一套实现服务三个域。写计划
//! 在单个事务里执行：先按计划锁 ID 取事务级咨询锁，再清理旧
//! 子树，最后按序回放写操作，任一步失败整体回滚。

use std::collections::HashMap;

use adapter_postgres::{advisory_lock_key, advisory_xact_lock, TransactionManager};
use async_trait::async_trait;
use common::types::CompanyId;
use domain_core::AggregateRoot;
use errors::{AppError, AppResult};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::entities::{
    MakeMethod, MethodMaterial, MethodOperation, OperationAttribute, OperationParameter, Quote,
    QuoteLine, QuoteLinePrice, QuotePayment, QuoteShipment, TrackedEntity,
};
use crate::domain::enums::MethodDomain;
use crate::domain::plan::{MethodWritePlan, WriteOp, WriteStats};
use crate::domain::repositories::{
    ConfigurationRuleRepository, ItemRepository, JobRepository, MethodRepository,
    ProcedureRepository, QuoteRepository, ResourceRepository,
};
use crate::domain::tree::MethodTreeRow;
use crate::domain::value_objects::{
    ItemId, JobId, MakeMethodId, OperationId, ProcedureId, QuoteId, QuoteLineId,
};
use crate::domain::views::{
    ConfigurationRule, Item, Job, Procedure, ProcedureAttribute, ProcedureParameter,
    SupplierProcess, WorkCenter,
};

use super::converters::{
    attribute_from_row, configuration_rule_from_row, item_from_row, job_from_row,
    material_from_row, method_from_node_row, method_from_row, operation_from_row,
    parameter_from_row, procedure_attribute_from_row, procedure_from_row,
    procedure_parameter_from_row, quote_from_row, quote_line_from_row, quote_line_price_from_row,
    quote_payment_from_row, quote_shipment_from_row, supplier_process_from_row, tool_from_row,
    tracked_entity_from_row, work_center_from_row,
};
use super::rows::{
    AttributeRow, ConfigurationRuleRow, ItemRow, JobRow, MakeMethodRow, MaterialRow,
    MethodNodeRow, OperationRow, ParameterRow, ProcedureAttributeRow, ProcedureParameterRow,
    ProcedureRow, QuoteLinePriceRow, QuoteLineRow, QuotePaymentRow, QuoteRow, QuoteShipmentRow,
    SupplierProcessRow, ToolRow, TrackedEntityRow, WorkCenterRow,
};
use super::tables::MethodTables;

// ============================================================================
// MethodRepository 实现
// ============================================================================

pub struct PostgresMethodRepository {
    pool: PgPool,
    transactions: TransactionManager,
}

impl PostgresMethodRepository {
    pub fn new(pool: PgPool) -> Self {
        let transactions = TransactionManager::new(pool.clone());
        Self { pool, transactions }
    }
}

#[async_trait]
impl MethodRepository for PostgresMethodRepository {
    async fn load_tree_rows(
        &self,
        domain: MethodDomain,
        root_method_id: &MakeMethodId,
        company_id: &CompanyId,
    ) -> AppResult<Vec<MethodTreeRow>> {
        let tables = MethodTables::for_domain(domain);

        let tree_sql = tables.tree_sql();
        let node_rows = sqlx::query_as::<_, MethodNodeRow>(&tree_sql)
            .bind(root_method_id.0)
            .bind(company_id.0)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("加载方法树失败: {}", e)))?;

        if node_rows.is_empty() {
            return Ok(Vec::new());
        }

        let method_ids: Vec<Uuid> = node_rows.iter().map(|row| row.id).collect();
        let materials_sql = tables.materials_sql();
        let material_rows = sqlx::query_as::<_, MaterialRow>(&materials_sql)
            .bind(&method_ids)
            .bind(company_id.0)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("加载方法物料失败: {}", e)))?;

        let mut materials_by_method: HashMap<Uuid, Vec<MethodMaterial>> = HashMap::new();
        for row in material_rows {
            materials_by_method
                .entry(row.make_method_id)
                .or_default()
                .push(material_from_row(row));
        }

        Ok(node_rows
            .into_iter()
            .map(|row| {
                let materials = materials_by_method.remove(&row.id).unwrap_or_default();
                let (parent_method_id, method) = method_from_node_row(row);
                MethodTreeRow {
                    parent_method_id,
                    method,
                    materials,
                }
            })
            .collect())
    }

    async fn load_operations(
        &self,
        domain: MethodDomain,
        method_ids: &[MakeMethodId],
        company_id: &CompanyId,
    ) -> AppResult<Vec<MethodOperation>> {
        if method_ids.is_empty() {
            return Ok(Vec::new());
        }
        let tables = MethodTables::for_domain(domain);
        let ids: Vec<Uuid> = method_ids.iter().map(|id| id.0).collect();

        let operations_sql = tables.operations_sql();
        let rows = sqlx::query_as::<_, OperationRow>(&operations_sql)
            .bind(&ids)
            .bind(company_id.0)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("加载工序失败: {}", e)))?;

        attach_operation_children(&self.pool, tables, rows).await
    }

    async fn find_method(
        &self,
        domain: MethodDomain,
        method_id: &MakeMethodId,
        company_id: &CompanyId,
    ) -> AppResult<Option<MakeMethod>> {
        let tables = MethodTables::for_domain(domain);
        let sql = format!(
            "{} WHERE id = $1 AND company_id = $2",
            tables.method_select()
        );
        let row = sqlx::query_as::<_, MakeMethodRow>(&sql)
            .bind(method_id.0)
            .bind(company_id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("查询方法节点失败: {}", e)))?;

        Ok(row.map(method_from_row))
    }

    async fn find_root_for_item(
        &self,
        item_id: &ItemId,
        company_id: &CompanyId,
    ) -> AppResult<Option<MakeMethod>> {
        let tables = MethodTables::for_domain(MethodDomain::Item);
        let sql = format!(
            "{} WHERE item_id = $1 AND company_id = $2 AND parent_material_id IS NULL",
            tables.method_select()
        );
        let row = sqlx::query_as::<_, MakeMethodRow>(&sql)
            .bind(item_id.0)
            .bind(company_id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("查询物品方法根失败: {}", e)))?;

        Ok(row.map(method_from_row))
    }

    async fn find_root_for_job(
        &self,
        job_id: &JobId,
        company_id: &CompanyId,
    ) -> AppResult<Option<MakeMethod>> {
        let tables = MethodTables::for_domain(MethodDomain::Job);
        let sql = format!(
            "{} WHERE job_id = $1 AND company_id = $2 AND parent_material_id IS NULL",
            tables.method_select()
        );
        let row = sqlx::query_as::<_, MakeMethodRow>(&sql)
            .bind(job_id.0)
            .bind(company_id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("查询作业方法根失败: {}", e)))?;

        Ok(row.map(method_from_row))
    }

    async fn find_root_for_quote_line(
        &self,
        quote_id: &QuoteId,
        quote_line_id: &QuoteLineId,
        company_id: &CompanyId,
    ) -> AppResult<Option<MakeMethod>> {
        let tables = MethodTables::for_domain(MethodDomain::Quote);
        let sql = format!(
            "{} WHERE quote_id = $1 AND quote_line_id = $2 AND company_id = $3 \
             AND parent_material_id IS NULL",
            tables.method_select()
        );
        let row = sqlx::query_as::<_, MakeMethodRow>(&sql)
            .bind(quote_id.0)
            .bind(quote_line_id.0)
            .bind(company_id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("查询报价行方法根失败: {}", e)))?;

        Ok(row.map(method_from_row))
    }

    async fn find_operation(
        &self,
        domain: MethodDomain,
        operation_id: &OperationId,
        company_id: &CompanyId,
    ) -> AppResult<Option<MethodOperation>> {
        let tables = MethodTables::for_domain(domain);
        let sql = tables.operation_by_id_sql();
        let row = sqlx::query_as::<_, OperationRow>(&sql)
            .bind(operation_id.0)
            .bind(company_id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("查询工序失败: {}", e)))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut operations = attach_operation_children(&self.pool, tables, vec![row]).await?;
        Ok(operations.pop())
    }

    async fn execute(&self, plan: &MethodWritePlan) -> AppResult<WriteStats> {
        let tables = MethodTables::for_domain(plan.domain());
        let mut stats = WriteStats::default();

        let mut tx = self.transactions.begin().await?;
        advisory_xact_lock(&mut tx, advisory_lock_key(plan.lock_id())).await?;

        if let Some(root) = plan.wipe_under() {
            stats.deleted_methods = wipe_subtree(&mut tx, tables, root).await?;
        }

        for op in plan.ops() {
            match op {
                WriteOp::InsertMethod(method) => {
                    insert_method(&mut tx, tables, method).await?;
                    stats.methods += 1;
                }
                WriteOp::InsertMaterial(material) => {
                    insert_material(&mut tx, tables, material).await?;
                    stats.materials += 1;
                }
                WriteOp::InsertOperation(operation) => {
                    insert_operation(&mut tx, tables, operation, &mut stats).await?;
                }
                WriteOp::UpdateMethodQuantity {
                    method_id,
                    quantity_per_parent,
                } => {
                    let sql = tables.update_method_quantity_sql();
                    sqlx::query(&sql)
                        .bind(method_id.0)
                        .bind(*quantity_per_parent)
                        .execute(&mut *tx)
                        .await
                        .map_err(|e| AppError::database(format!("回写方法用量失败: {}", e)))?;
                    stats.updates += 1;
                }
                WriteOp::UpdateMaterialEstimatedQuantity {
                    material_id,
                    estimated_quantity,
                } => {
                    let sql = tables.update_material_estimate_sql();
                    sqlx::query(&sql)
                        .bind(material_id.0)
                        .bind(*estimated_quantity)
                        .execute(&mut *tx)
                        .await
                        .map_err(|e| AppError::database(format!("回写物料需求量失败: {}", e)))?;
                    stats.updates += 1;
                }
                WriteOp::UpdateOperationQuantity {
                    operation_id,
                    operation_quantity,
                } => {
                    let sql = tables.update_operation_quantity_sql();
                    sqlx::query(&sql)
                        .bind(operation_id.0)
                        .bind(*operation_quantity)
                        .execute(&mut *tx)
                        .await
                        .map_err(|e| AppError::database(format!("回写工序数量失败: {}", e)))?;
                    stats.updates += 1;
                }
                WriteOp::UpdateTrackedEntityQuantity {
                    tracked_entity_id,
                    quantity,
                } => {
                    sqlx::query(
                        "UPDATE tracked_entities SET quantity = $2, updated_at = now() \
                         WHERE id = $1",
                    )
                    .bind(tracked_entity_id.0)
                    .bind(*quantity)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| AppError::database(format!("回写追溯单元数量失败: {}", e)))?;
                    stats.updates += 1;
                }
                WriteOp::UpdateOperationInstruction {
                    operation_id,
                    procedure_id,
                    work_instruction,
                } => {
                    let sql = tables.update_operation_instruction_sql();
                    sqlx::query(&sql)
                        .bind(operation_id.0)
                        .bind(procedure_id.0)
                        .bind(work_instruction.as_ref())
                        .execute(&mut *tx)
                        .await
                        .map_err(|e| AppError::database(format!("覆盖指导内容失败: {}", e)))?;
                    stats.updates += 1;
                }
                WriteOp::UpdateAttribute {
                    attribute_id,
                    min_value,
                    max_value,
                    description,
                } => {
                    let sql = tables.update_attribute_sql();
                    sqlx::query(&sql)
                        .bind(*attribute_id)
                        .bind(*min_value)
                        .bind(*max_value)
                        .bind(description.as_deref())
                        .execute(&mut *tx)
                        .await
                        .map_err(|e| AppError::database(format!("更新工序属性失败: {}", e)))?;
                    stats.updates += 1;
                }
                WriteOp::DeleteAttribute { attribute_id } => {
                    let sql = tables.delete_attribute_sql();
                    sqlx::query(&sql)
                        .bind(*attribute_id)
                        .execute(&mut *tx)
                        .await
                        .map_err(|e| AppError::database(format!("删除工序属性失败: {}", e)))?;
                    stats.updates += 1;
                }
                WriteOp::InsertAttribute {
                    operation_id,
                    attribute,
                } => {
                    insert_attribute_for_operation(&mut tx, tables, operation_id, attribute)
                        .await?;
                    stats.attributes += 1;
                }
                WriteOp::DeleteParameters { operation_id } => {
                    let sql = tables.delete_parameters_sql();
                    sqlx::query(&sql)
                        .bind(operation_id.0)
                        .execute(&mut *tx)
                        .await
                        .map_err(|e| AppError::database(format!("清空工序参数失败: {}", e)))?;
                    stats.updates += 1;
                }
                WriteOp::InsertParameter {
                    operation_id,
                    parameter,
                } => {
                    insert_parameter_for_operation(&mut tx, tables, operation_id, parameter)
                        .await?;
                    stats.parameters += 1;
                }
                WriteOp::InsertQuote(quote) => {
                    insert_quote(&mut tx, quote).await?;
                    stats.sales_rows += 1;
                }
                WriteOp::InsertQuoteLine(line) => {
                    insert_quote_line(&mut tx, line).await?;
                    stats.sales_rows += 1;
                }
                WriteOp::InsertQuotePayment(payment) => {
                    insert_quote_payment(&mut tx, payment).await?;
                    stats.sales_rows += 1;
                }
                WriteOp::InsertQuoteShipment(shipment) => {
                    insert_quote_shipment(&mut tx, shipment).await?;
                    stats.sales_rows += 1;
                }
                WriteOp::InsertQuoteLinePrice(price) => {
                    insert_quote_line_price(&mut tx, price).await?;
                    stats.sales_rows += 1;
                }
            }
        }

        TransactionManager::commit(tx).await?;
        Ok(stats)
    }
}

/// 为一批工序行加载并挂接工装/参数/属性子行
async fn attach_operation_children(
    pool: &PgPool,
    tables: &MethodTables,
    rows: Vec<OperationRow>,
) -> AppResult<Vec<MethodOperation>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let operation_ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();

    let tools_sql = tables.tools_sql();
    let tool_rows = sqlx::query_as::<_, ToolRow>(&tools_sql)
        .bind(&operation_ids)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::database(format!("加载工序工装失败: {}", e)))?;

    let parameters_sql = tables.parameters_sql();
    let parameter_rows = sqlx::query_as::<_, ParameterRow>(&parameters_sql)
        .bind(&operation_ids)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::database(format!("加载工序参数失败: {}", e)))?;

    let attributes_sql = tables.attributes_sql();
    let attribute_rows = sqlx::query_as::<_, AttributeRow>(&attributes_sql)
        .bind(&operation_ids)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::database(format!("加载工序属性失败: {}", e)))?;

    let mut tools_by_op: HashMap<Uuid, Vec<_>> = HashMap::new();
    for row in tool_rows {
        tools_by_op
            .entry(row.operation_id)
            .or_default()
            .push(tool_from_row(row));
    }
    let mut parameters_by_op: HashMap<Uuid, Vec<_>> = HashMap::new();
    for row in parameter_rows {
        parameters_by_op
            .entry(row.operation_id)
            .or_default()
            .push(parameter_from_row(row));
    }
    let mut attributes_by_op: HashMap<Uuid, Vec<_>> = HashMap::new();
    for row in attribute_rows {
        attributes_by_op
            .entry(row.operation_id)
            .or_default()
            .push(attribute_from_row(row));
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let id = row.id;
            let mut operation = operation_from_row(row);
            if let Some(tools) = tools_by_op.remove(&id) {
                operation.replace_tools(tools);
            }
            if let Some(parameters) = parameters_by_op.remove(&id) {
                operation.replace_parameters(parameters);
            }
            if let Some(attributes) = attributes_by_op.remove(&id) {
                operation.replace_attributes(attributes);
            }
            operation
        })
        .collect())
}

// ============================================================================
// 写计划执行辅助
// ============================================================================

/// 清理待覆盖的旧子树，返回删掉的后代方法数
///
/// 删除根节点的物料行即可：方法表与物料表之间的外键级联把
/// 整棵后代子树（方法、物料、工序与子行）一并带走。根方法行
/// 本身保留，只需再清掉它自己的工序行。
async fn wipe_subtree(
    tx: &mut Transaction<'static, Postgres>,
    tables: &MethodTables,
    root: &MakeMethodId,
) -> AppResult<u64> {
    let count_sql = tables.subtree_count_sql();
    let total: i64 = sqlx::query_scalar(&count_sql)
        .bind(root.0)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("统计旧子树失败: {}", e)))?;

    let materials_sql = tables.wipe_materials_sql();
    sqlx::query(&materials_sql)
        .bind(root.0)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("清理旧子树失败: {}", e)))?;

    let operations_sql = tables.wipe_operations_sql();
    sqlx::query(&operations_sql)
        .bind(root.0)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("清理旧工序失败: {}", e)))?;

    Ok((total - 1).max(0) as u64)
}

async fn insert_method(
    tx: &mut Transaction<'static, Postgres>,
    tables: &MethodTables,
    method: &MakeMethod,
) -> AppResult<()> {
    let audit = method.audit_info();
    let sql = tables.insert_method_sql();
    let mut query = sqlx::query(&sql)
        .bind(method.id().0)
        .bind(method.company_id().0)
        .bind(method.item_id().0);
    if tables.has_job_owner {
        query = query.bind(method.job_id().map(|id| id.0));
    }
    if tables.has_quote_owner {
        query = query
            .bind(method.quote_id().map(|id| id.0))
            .bind(method.quote_line_id().map(|id| id.0));
    }
    query
        .bind(method.parent_material_id().map(|id| id.0))
        .bind(method.quantity_per_parent())
        .bind(method.version())
        .bind(audit.created_at)
        .bind(audit.created_by.as_ref().map(|id| id.0))
        .bind(audit.updated_at)
        .bind(audit.updated_by.as_ref().map(|id| id.0))
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("插入方法节点失败: {}", e)))?;
    Ok(())
}

async fn insert_material(
    tx: &mut Transaction<'static, Postgres>,
    tables: &MethodTables,
    material: &MethodMaterial,
) -> AppResult<()> {
    let audit = material.audit_info();
    let sql = tables.insert_material_sql();
    let mut query = sqlx::query(&sql)
        .bind(material.id().0)
        .bind(material.company_id().0)
        .bind(material.make_method_id().0)
        .bind(material.item_id().0)
        .bind(material.item_type().as_str())
        .bind(material.method_type().as_str())
        .bind(material.quantity());
    if tables.has_estimates {
        query = query.bind(material.estimated_quantity());
    }
    query
        .bind(material.unit_of_measure_code())
        .bind(material.unit_cost())
        .bind(material.description())
        .bind(material.order())
        .bind(material.tracking().as_str())
        .bind(audit.created_at)
        .bind(audit.created_by.as_ref().map(|id| id.0))
        .bind(audit.updated_at)
        .bind(audit.updated_by.as_ref().map(|id| id.0))
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("插入物料行失败: {}", e)))?;
    Ok(())
}

async fn insert_operation(
    tx: &mut Transaction<'static, Postgres>,
    tables: &MethodTables,
    operation: &MethodOperation,
    stats: &mut WriteStats,
) -> AppResult<()> {
    let audit = operation.audit_info();
    let sql = tables.insert_operation_sql();
    let mut query = sqlx::query(&sql)
        .bind(operation.id().0)
        .bind(operation.company_id().0)
        .bind(operation.make_method_id().0)
        .bind(operation.process_id().0)
        .bind(operation.procedure_id().map(|id| id.0))
        .bind(operation.work_center_id().map(|id| id.0))
        .bind(operation.description())
        .bind(operation.setup_time())
        .bind(operation.setup_unit().as_str())
        .bind(operation.labor_time())
        .bind(operation.labor_unit().as_str())
        .bind(operation.machine_time())
        .bind(operation.machine_unit().as_str())
        .bind(operation.labor_rate())
        .bind(operation.machine_rate())
        .bind(operation.overhead_rate())
        .bind(operation.kind().as_str())
        .bind(operation.operation_order().as_str())
        .bind(operation.order());
    if tables.has_estimates {
        query = query.bind(operation.operation_quantity());
    }
    query
        .bind(operation.operation_minimum_cost())
        .bind(operation.operation_lead_time())
        .bind(operation.supplier_process_id().map(|id| id.0))
        .bind(operation.work_instruction())
        .bind(audit.created_at)
        .bind(audit.created_by.as_ref().map(|id| id.0))
        .bind(audit.updated_at)
        .bind(audit.updated_by.as_ref().map(|id| id.0))
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("插入工序失败: {}", e)))?;
    stats.operations += 1;

    let tool_sql = tables.insert_tool_sql();
    for tool in operation.tools() {
        sqlx::query(&tool_sql)
            .bind(tool.id())
            .bind(operation.company_id().0)
            .bind(operation.id().0)
            .bind(tool.tool_id().0)
            .bind(tool.quantity())
            .bind(audit.created_at)
            .bind(audit.created_by.as_ref().map(|id| id.0))
            .bind(audit.updated_at)
            .bind(audit.updated_by.as_ref().map(|id| id.0))
            .execute(&mut **tx)
            .await
            .map_err(|e| AppError::database(format!("插入工序工装失败: {}", e)))?;
        stats.tools += 1;
    }

    let parameter_sql = tables.insert_parameter_sql();
    for parameter in operation.parameters() {
        sqlx::query(&parameter_sql)
            .bind(parameter.id())
            .bind(operation.company_id().0)
            .bind(operation.id().0)
            .bind(parameter.key())
            .bind(parameter.value())
            .bind(audit.created_at)
            .bind(audit.created_by.as_ref().map(|id| id.0))
            .bind(audit.updated_at)
            .bind(audit.updated_by.as_ref().map(|id| id.0))
            .execute(&mut **tx)
            .await
            .map_err(|e| AppError::database(format!("插入工序参数失败: {}", e)))?;
        stats.parameters += 1;
    }

    let attribute_sql = tables.insert_attribute_sql();
    for attribute in operation.attributes() {
        sqlx::query(&attribute_sql)
            .bind(attribute.id())
            .bind(operation.company_id().0)
            .bind(operation.id().0)
            .bind(attribute.name())
            .bind(attribute.attribute_type())
            .bind(attribute.min_value())
            .bind(attribute.max_value())
            .bind(attribute.description())
            .bind(audit.created_at)
            .bind(audit.created_by.as_ref().map(|id| id.0))
            .bind(audit.updated_at)
            .bind(audit.updated_by.as_ref().map(|id| id.0))
            .execute(&mut **tx)
            .await
            .map_err(|e| AppError::database(format!("插入工序属性失败: {}", e)))?;
        stats.attributes += 1;
    }

    Ok(())
}

async fn insert_attribute_for_operation(
    tx: &mut Transaction<'static, Postgres>,
    tables: &MethodTables,
    operation_id: &OperationId,
    attribute: &OperationAttribute,
) -> AppResult<()> {
    let sql = tables.insert_attribute_from_operation_sql();
    sqlx::query(&sql)
        .bind(operation_id.0)
        .bind(attribute.id())
        .bind(attribute.name())
        .bind(attribute.attribute_type())
        .bind(attribute.min_value())
        .bind(attribute.max_value())
        .bind(attribute.description())
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("插入工序属性失败: {}", e)))?;
    Ok(())
}

async fn insert_parameter_for_operation(
    tx: &mut Transaction<'static, Postgres>,
    tables: &MethodTables,
    operation_id: &OperationId,
    parameter: &OperationParameter,
) -> AppResult<()> {
    let sql = tables.insert_parameter_from_operation_sql();
    sqlx::query(&sql)
        .bind(operation_id.0)
        .bind(parameter.id())
        .bind(parameter.key())
        .bind(parameter.value())
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("插入工序参数失败: {}", e)))?;
    Ok(())
}

async fn insert_quote(tx: &mut Transaction<'static, Postgres>, quote: &Quote) -> AppResult<()> {
    let audit = quote.audit_info();
    sqlx::query(
        r#"
        INSERT INTO quotes
            (id, company_id, readable_id, revision, customer_id, customer_reference,
             status, expiration_date, notes,
             created_at, created_by, updated_at, updated_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        "#,
    )
    .bind(quote.id().0)
    .bind(quote.company_id().0)
    .bind(quote.readable_id())
    .bind(quote.revision())
    .bind(quote.customer_id())
    .bind(quote.customer_reference())
    .bind(quote.status().as_str())
    .bind(quote.expiration_date())
    .bind(quote.notes())
    .bind(audit.created_at)
    .bind(audit.created_by.as_ref().map(|id| id.0))
    .bind(audit.updated_at)
    .bind(audit.updated_by.as_ref().map(|id| id.0))
    .execute(&mut **tx)
    .await
    .map_err(|e| AppError::database(format!("插入报价单失败: {}", e)))?;
    Ok(())
}

async fn insert_quote_line(
    tx: &mut Transaction<'static, Postgres>,
    line: &QuoteLine,
) -> AppResult<()> {
    let audit = line.audit_info();
    sqlx::query(
        r#"
        INSERT INTO quote_lines
            (id, company_id, quote_id, item_id, description, method_type,
             quantity, unit_of_measure_code, status, sort_order,
             created_at, created_by, updated_at, updated_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        "#,
    )
    .bind(line.id().0)
    .bind(line.company_id().0)
    .bind(line.quote_id().0)
    .bind(line.item_id().0)
    .bind(line.description())
    .bind(line.method_type().as_str())
    .bind(line.quantity())
    .bind(line.unit_of_measure_code())
    .bind(line.status())
    .bind(line.order())
    .bind(audit.created_at)
    .bind(audit.created_by.as_ref().map(|id| id.0))
    .bind(audit.updated_at)
    .bind(audit.updated_by.as_ref().map(|id| id.0))
    .execute(&mut **tx)
    .await
    .map_err(|e| AppError::database(format!("插入报价行失败: {}", e)))?;
    Ok(())
}

async fn insert_quote_payment(
    tx: &mut Transaction<'static, Postgres>,
    payment: &QuotePayment,
) -> AppResult<()> {
    let audit = payment.audit_info();
    sqlx::query(
        r#"
        INSERT INTO quote_payments
            (id, company_id, quote_id, payment_term_id,
             created_at, created_by, updated_at, updated_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(payment.id())
    .bind(payment.company_id().0)
    .bind(payment.quote_id().0)
    .bind(payment.payment_term_id())
    .bind(audit.created_at)
    .bind(audit.created_by.as_ref().map(|id| id.0))
    .bind(audit.updated_at)
    .bind(audit.updated_by.as_ref().map(|id| id.0))
    .execute(&mut **tx)
    .await
    .map_err(|e| AppError::database(format!("插入付款条款失败: {}", e)))?;
    Ok(())
}

async fn insert_quote_shipment(
    tx: &mut Transaction<'static, Postgres>,
    shipment: &QuoteShipment,
) -> AppResult<()> {
    let audit = shipment.audit_info();
    sqlx::query(
        r#"
        INSERT INTO quote_shipments
            (id, company_id, quote_id, shipping_method_id, shipping_cost,
             receipt_requested_date,
             created_at, created_by, updated_at, updated_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
    )
    .bind(shipment.id())
    .bind(shipment.company_id().0)
    .bind(shipment.quote_id().0)
    .bind(shipment.shipping_method_id())
    .bind(shipment.shipping_cost())
    .bind(shipment.receipt_requested_date())
    .bind(audit.created_at)
    .bind(audit.created_by.as_ref().map(|id| id.0))
    .bind(audit.updated_at)
    .bind(audit.updated_by.as_ref().map(|id| id.0))
    .execute(&mut **tx)
    .await
    .map_err(|e| AppError::database(format!("插入发运条款失败: {}", e)))?;
    Ok(())
}

async fn insert_quote_line_price(
    tx: &mut Transaction<'static, Postgres>,
    price: &QuoteLinePrice,
) -> AppResult<()> {
    let audit = price.audit_info();
    sqlx::query(
        r#"
        INSERT INTO quote_line_prices
            (id, company_id, quote_id, quote_line_id, quantity, unit_price,
             discount_percent, lead_time,
             created_at, created_by, updated_at, updated_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        "#,
    )
    .bind(price.id())
    .bind(price.company_id().0)
    .bind(price.quote_id().0)
    .bind(price.quote_line_id().0)
    .bind(price.quantity())
    .bind(price.unit_price())
    .bind(price.discount_percent())
    .bind(price.lead_time())
    .bind(audit.created_at)
    .bind(audit.created_by.as_ref().map(|id| id.0))
    .bind(audit.updated_at)
    .bind(audit.updated_by.as_ref().map(|id| id.0))
    .execute(&mut **tx)
    .await
    .map_err(|e| AppError::database(format!("插入阶梯价格失败: {}", e)))?;
    Ok(())
}

// ============================================================================
// ItemRepository 实现
// ============================================================================

pub struct PostgresItemRepository {
    pool: PgPool,
}

impl PostgresItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemRepository for PostgresItemRepository {
    async fn find_by_id(
        &self,
        item_id: &ItemId,
        company_id: &CompanyId,
    ) -> AppResult<Option<Item>> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, company_id, readable_id, name, description, item_type,
                   default_method_type, unit_of_measure_code, unit_cost, tracking, active
            FROM items
            WHERE id = $1 AND company_id = $2
            "#,
        )
        .bind(item_id.0)
        .bind(company_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("查询物品失败: {}", e)))?;

        Ok(row.map(item_from_row))
    }

    async fn find_many(
        &self,
        item_ids: &[ItemId],
        company_id: &CompanyId,
    ) -> AppResult<Vec<Item>> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = item_ids.iter().map(|id| id.0).collect();
        let rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, company_id, readable_id, name, description, item_type,
                   default_method_type, unit_of_measure_code, unit_cost, tracking, active
            FROM items
            WHERE id = ANY($1) AND company_id = $2
            "#,
        )
        .bind(&ids)
        .bind(company_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("批量查询物品失败: {}", e)))?;

        Ok(rows.into_iter().map(item_from_row).collect())
    }
}

// ============================================================================
// JobRepository 实现
// ============================================================================

pub struct PostgresJobRepository {
    pool: PgPool,
}

impl PostgresJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepository for PostgresJobRepository {
    async fn find_by_id(&self, job_id: &JobId, company_id: &CompanyId) -> AppResult<Option<Job>> {
        let row = sqlx::query_as::<_, JobRow>(
            r#"
            SELECT id, company_id, readable_id, item_id, production_quantity, status, due_date
            FROM jobs
            WHERE id = $1 AND company_id = $2
            "#,
        )
        .bind(job_id.0)
        .bind(company_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("查询作业失败: {}", e)))?;

        Ok(row.map(job_from_row))
    }

    async fn tracked_entities_for_methods(
        &self,
        method_ids: &[MakeMethodId],
        company_id: &CompanyId,
    ) -> AppResult<Vec<TrackedEntity>> {
        if method_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = method_ids.iter().map(|id| id.0).collect();
        let rows = sqlx::query_as::<_, TrackedEntityRow>(
            r#"
            SELECT id, company_id, item_id, job_make_method_id, quantity, status,
                   created_at, created_by, updated_at, updated_by
            FROM tracked_entities
            WHERE job_make_method_id = ANY($1) AND company_id = $2
            "#,
        )
        .bind(&ids)
        .bind(company_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("查询追溯单元失败: {}", e)))?;

        Ok(rows.into_iter().map(tracked_entity_from_row).collect())
    }
}

// ============================================================================
// QuoteRepository 实现
// ============================================================================

pub struct PostgresQuoteRepository {
    pool: PgPool,
}

impl PostgresQuoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuoteRepository for PostgresQuoteRepository {
    async fn find_quote(
        &self,
        quote_id: &QuoteId,
        company_id: &CompanyId,
    ) -> AppResult<Option<Quote>> {
        let row = sqlx::query_as::<_, QuoteRow>(
            r#"
            SELECT id, company_id, readable_id, revision, customer_id, customer_reference,
                   status, expiration_date, notes,
                   created_at, created_by, updated_at, updated_by
            FROM quotes
            WHERE id = $1 AND company_id = $2
            "#,
        )
        .bind(quote_id.0)
        .bind(company_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("查询报价单失败: {}", e)))?;

        Ok(row.map(quote_from_row))
    }

    async fn find_line(
        &self,
        quote_id: &QuoteId,
        quote_line_id: &QuoteLineId,
        company_id: &CompanyId,
    ) -> AppResult<Option<QuoteLine>> {
        let row = sqlx::query_as::<_, QuoteLineRow>(
            r#"
            SELECT id, company_id, quote_id, item_id, description, method_type,
                   quantity, unit_of_measure_code, status, sort_order,
                   created_at, created_by, updated_at, updated_by
            FROM quote_lines
            WHERE quote_id = $1 AND id = $2 AND company_id = $3
            "#,
        )
        .bind(quote_id.0)
        .bind(quote_line_id.0)
        .bind(company_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("查询报价行失败: {}", e)))?;

        Ok(row.map(quote_line_from_row))
    }

    async fn lines_for_quote(
        &self,
        quote_id: &QuoteId,
        company_id: &CompanyId,
    ) -> AppResult<Vec<QuoteLine>> {
        let rows = sqlx::query_as::<_, QuoteLineRow>(
            r#"
            SELECT id, company_id, quote_id, item_id, description, method_type,
                   quantity, unit_of_measure_code, status, sort_order,
                   created_at, created_by, updated_at, updated_by
            FROM quote_lines
            WHERE quote_id = $1 AND company_id = $2
            ORDER BY sort_order
            "#,
        )
        .bind(quote_id.0)
        .bind(company_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("查询报价单行失败: {}", e)))?;

        Ok(rows.into_iter().map(quote_line_from_row).collect())
    }

    async fn payments_for_quote(
        &self,
        quote_id: &QuoteId,
        company_id: &CompanyId,
    ) -> AppResult<Vec<QuotePayment>> {
        let rows = sqlx::query_as::<_, QuotePaymentRow>(
            r#"
            SELECT id, company_id, quote_id, payment_term_id,
                   created_at, created_by, updated_at, updated_by
            FROM quote_payments
            WHERE quote_id = $1 AND company_id = $2
            ORDER BY id
            "#,
        )
        .bind(quote_id.0)
        .bind(company_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("查询付款条款失败: {}", e)))?;

        Ok(rows.into_iter().map(quote_payment_from_row).collect())
    }

    async fn shipments_for_quote(
        &self,
        quote_id: &QuoteId,
        company_id: &CompanyId,
    ) -> AppResult<Vec<QuoteShipment>> {
        let rows = sqlx::query_as::<_, QuoteShipmentRow>(
            r#"
            SELECT id, company_id, quote_id, shipping_method_id, shipping_cost,
                   receipt_requested_date,
                   created_at, created_by, updated_at, updated_by
            FROM quote_shipments
            WHERE quote_id = $1 AND company_id = $2
            ORDER BY id
            "#,
        )
        .bind(quote_id.0)
        .bind(company_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("查询发运条款失败: {}", e)))?;

        Ok(rows.into_iter().map(quote_shipment_from_row).collect())
    }

    async fn prices_for_quote(
        &self,
        quote_id: &QuoteId,
        company_id: &CompanyId,
    ) -> AppResult<Vec<QuoteLinePrice>> {
        let rows = sqlx::query_as::<_, QuoteLinePriceRow>(
            r#"
            SELECT id, company_id, quote_id, quote_line_id, quantity, unit_price,
                   discount_percent, lead_time,
                   created_at, created_by, updated_at, updated_by
            FROM quote_line_prices
            WHERE quote_id = $1 AND company_id = $2
            ORDER BY quote_line_id, quantity
            "#,
        )
        .bind(quote_id.0)
        .bind(company_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("查询阶梯价格失败: {}", e)))?;

        Ok(rows.into_iter().map(quote_line_price_from_row).collect())
    }
}

// ============================================================================
// ProcedureRepository 实现
// ============================================================================

pub struct PostgresProcedureRepository {
    pool: PgPool,
}

impl PostgresProcedureRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProcedureRepository for PostgresProcedureRepository {
    async fn find_by_id(
        &self,
        procedure_id: &ProcedureId,
        company_id: &CompanyId,
    ) -> AppResult<Option<Procedure>> {
        let row = sqlx::query_as::<_, ProcedureRow>(
            r#"
            SELECT id, company_id, name, version, process_id, content, active
            FROM procedures
            WHERE id = $1 AND company_id = $2
            "#,
        )
        .bind(procedure_id.0)
        .bind(company_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("查询作业指导书失败: {}", e)))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let parameter_rows = sqlx::query_as::<_, ProcedureParameterRow>(
            r#"
            SELECT id, procedure_id, key, value, sort_order
            FROM procedure_parameters
            WHERE procedure_id = $1
            ORDER BY sort_order
            "#,
        )
        .bind(procedure_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("查询指导书参数模板失败: {}", e)))?;

        let attribute_rows = sqlx::query_as::<_, ProcedureAttributeRow>(
            r#"
            SELECT id, procedure_id, name, attribute_type, min_value, max_value,
                   description, sort_order
            FROM procedure_attributes
            WHERE procedure_id = $1
            ORDER BY sort_order
            "#,
        )
        .bind(procedure_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("查询指导书属性模板失败: {}", e)))?;

        let parameters = parameter_rows
            .into_iter()
            .map(procedure_parameter_from_row)
            .collect();
        let attributes = attribute_rows
            .into_iter()
            .map(procedure_attribute_from_row)
            .collect();

        Ok(Some(procedure_from_row(row, parameters, attributes)))
    }

    async fn find_many(
        &self,
        procedure_ids: &[ProcedureId],
        company_id: &CompanyId,
    ) -> AppResult<Vec<Procedure>> {
        if procedure_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = procedure_ids.iter().map(|id| id.0).collect();

        let rows = sqlx::query_as::<_, ProcedureRow>(
            r#"
            SELECT id, company_id, name, version, process_id, content, active
            FROM procedures
            WHERE id = ANY($1) AND company_id = $2
            "#,
        )
        .bind(&ids)
        .bind(company_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("批量查询作业指导书失败: {}", e)))?;

        let parameter_rows = sqlx::query_as::<_, ProcedureParameterRow>(
            r#"
            SELECT id, procedure_id, key, value, sort_order
            FROM procedure_parameters
            WHERE procedure_id = ANY($1)
            ORDER BY procedure_id, sort_order
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("批量查询参数模板失败: {}", e)))?;

        let attribute_rows = sqlx::query_as::<_, ProcedureAttributeRow>(
            r#"
            SELECT id, procedure_id, name, attribute_type, min_value, max_value,
                   description, sort_order
            FROM procedure_attributes
            WHERE procedure_id = ANY($1)
            ORDER BY procedure_id, sort_order
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("批量查询属性模板失败: {}", e)))?;

        let mut parameters_by_procedure: HashMap<Uuid, Vec<ProcedureParameter>> = HashMap::new();
        for row in parameter_rows {
            parameters_by_procedure
                .entry(row.procedure_id)
                .or_default()
                .push(procedure_parameter_from_row(row));
        }
        let mut attributes_by_procedure: HashMap<Uuid, Vec<ProcedureAttribute>> = HashMap::new();
        for row in attribute_rows {
            attributes_by_procedure
                .entry(row.procedure_id)
                .or_default()
                .push(procedure_attribute_from_row(row));
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let parameters = parameters_by_procedure.remove(&row.id).unwrap_or_default();
                let attributes = attributes_by_procedure.remove(&row.id).unwrap_or_default();
                procedure_from_row(row, parameters, attributes)
            })
            .collect())
    }
}

// ============================================================================
// ResourceRepository 实现
// ============================================================================

pub struct PostgresResourceRepository {
    pool: PgPool,
}

impl PostgresResourceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceRepository for PostgresResourceRepository {
    async fn work_centers(&self, company_id: &CompanyId) -> AppResult<Vec<WorkCenter>> {
        let rows = sqlx::query_as::<_, WorkCenterRow>(
            r#"
            SELECT wc.id, wc.company_id, wc.name, wc.labor_rate, wc.machine_rate,
                   wc.overhead_rate, wc.active,
                   COALESCE(array_agg(wcp.process_id)
                            FILTER (WHERE wcp.process_id IS NOT NULL),
                            ARRAY[]::uuid[]) AS process_ids
            FROM work_centers wc
            LEFT JOIN work_center_processes wcp ON wcp.work_center_id = wc.id
            WHERE wc.company_id = $1
            GROUP BY wc.id, wc.company_id, wc.name, wc.labor_rate, wc.machine_rate,
                     wc.overhead_rate, wc.active
            "#,
        )
        .bind(company_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("查询工作中心失败: {}", e)))?;

        Ok(rows.into_iter().map(work_center_from_row).collect())
    }

    async fn supplier_processes(&self, company_id: &CompanyId) -> AppResult<Vec<SupplierProcess>> {
        let rows = sqlx::query_as::<_, SupplierProcessRow>(
            r#"
            SELECT id, company_id, process_id, supplier_id, minimum_cost, lead_time
            FROM supplier_processes
            WHERE company_id = $1
            "#,
        )
        .bind(company_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("查询外协工艺失败: {}", e)))?;

        Ok(rows.into_iter().map(supplier_process_from_row).collect())
    }
}

// ============================================================================
// ConfigurationRuleRepository 实现
// ============================================================================

pub struct PostgresConfigurationRuleRepository {
    pool: PgPool,
}

impl PostgresConfigurationRuleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConfigurationRuleRepository for PostgresConfigurationRuleRepository {
    async fn rules_for_item(
        &self,
        item_id: &ItemId,
        company_id: &CompanyId,
    ) -> AppResult<Vec<ConfigurationRule>> {
        let rows = sqlx::query_as::<_, ConfigurationRuleRow>(
            r#"
            SELECT id, company_id, item_id, field_key, transform, active
            FROM configuration_rules
            WHERE item_id = $1 AND company_id = $2 AND active = true
            ORDER BY field_key
            "#,
        )
        .bind(item_id.0)
        .bind(company_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("查询配置规则失败: {}", e)))?;

        Ok(rows.into_iter().map(configuration_rule_from_row).collect())
    }
}
