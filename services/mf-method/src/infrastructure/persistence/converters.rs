//! 数据库行到领域对象的转换

use common::types::{AuditInfo, CompanyId, UserId};
use uuid::Uuid;

use crate::domain::entities::{
    MakeMethod, MethodMaterial, MethodOperation, OperationAttribute, OperationParameter,
    OperationTool, Quote, QuoteLine, QuoteLinePrice, QuotePayment, QuoteShipment, TrackedEntity,
};
use crate::domain::enums::{
    ItemType, JobStatus, MethodType, OperationKind, OperationOrder, QuoteStatus, TimeUnit,
    TrackingKind,
};
use crate::domain::value_objects::{
    ConfigurationRuleId, ItemId, JobId, MakeMethodId, MaterialId, OperationId, ProcedureId,
    ProcessId, QuoteId, QuoteLineId, SupplierProcessId, ToolId, TrackedEntityId, WorkCenterId,
};
use crate::domain::views::{
    ConfigurationRule, Item, Job, Procedure, ProcedureAttribute, ProcedureParameter,
    SupplierProcess, WorkCenter,
};

use super::rows::{
    AttributeRow, ConfigurationRuleRow, ItemRow, JobRow, MakeMethodRow, MaterialRow,
    MethodNodeRow, OperationRow, ParameterRow, ProcedureAttributeRow, ProcedureParameterRow,
    ProcedureRow, QuoteLinePriceRow, QuoteLineRow, QuotePaymentRow, QuoteRow, QuoteShipmentRow,
    SupplierProcessRow, ToolRow, TrackedEntityRow, WorkCenterRow,
};

/// 将 MakeMethodRow 转换为 MakeMethod
pub fn method_from_row(row: MakeMethodRow) -> MakeMethod {
    let audit_info = build_audit_info(
        row.created_at,
        row.created_by,
        row.updated_at,
        row.updated_by,
    );

    MakeMethod::from_parts(
        MakeMethodId::from_uuid(row.id),
        CompanyId::from_uuid(row.company_id),
        ItemId::from_uuid(row.item_id),
        row.job_id.map(JobId::from_uuid),
        row.quote_id.map(QuoteId::from_uuid),
        row.quote_line_id.map(QuoteLineId::from_uuid),
        row.parent_material_id.map(MaterialId::from_uuid),
        row.quantity_per_parent,
        row.version,
        audit_info,
    )
}

/// 将递归树输出行拆成父方法 ID 与方法节点
pub fn method_from_node_row(row: MethodNodeRow) -> (Option<MakeMethodId>, MakeMethod) {
    let parent = row.parent_method_id.map(MakeMethodId::from_uuid);
    let audit_info = build_audit_info(
        row.created_at,
        row.created_by,
        row.updated_at,
        row.updated_by,
    );

    let method = MakeMethod::from_parts(
        MakeMethodId::from_uuid(row.id),
        CompanyId::from_uuid(row.company_id),
        ItemId::from_uuid(row.item_id),
        row.job_id.map(JobId::from_uuid),
        row.quote_id.map(QuoteId::from_uuid),
        row.quote_line_id.map(QuoteLineId::from_uuid),
        row.parent_material_id.map(MaterialId::from_uuid),
        row.quantity_per_parent,
        row.version,
        audit_info,
    );
    (parent, method)
}

/// 将 MaterialRow 转换为 MethodMaterial
pub fn material_from_row(row: MaterialRow) -> MethodMaterial {
    let audit_info = build_audit_info(
        row.created_at,
        row.created_by,
        row.updated_at,
        row.updated_by,
    );

    MethodMaterial::from_parts(
        MaterialId::from_uuid(row.id),
        CompanyId::from_uuid(row.company_id),
        MakeMethodId::from_uuid(row.make_method_id),
        ItemId::from_uuid(row.item_id),
        ItemType::parse(&row.item_type),
        MethodType::parse(&row.method_type),
        row.quantity,
        row.estimated_quantity,
        row.unit_of_measure_code,
        row.unit_cost,
        row.description,
        row.sort_order,
        TrackingKind::parse(&row.tracking),
        audit_info,
    )
}

/// 将 OperationRow 转换为 MethodOperation（子行另行挂接）
pub fn operation_from_row(row: OperationRow) -> MethodOperation {
    let audit_info = build_audit_info(
        row.created_at,
        row.created_by,
        row.updated_at,
        row.updated_by,
    );

    MethodOperation::from_parts(
        OperationId::from_uuid(row.id),
        CompanyId::from_uuid(row.company_id),
        MakeMethodId::from_uuid(row.make_method_id),
        ProcessId::from_uuid(row.process_id),
        row.procedure_id.map(ProcedureId::from_uuid),
        row.work_center_id.map(WorkCenterId::from_uuid),
        row.description,
        row.setup_time,
        TimeUnit::parse(&row.setup_unit),
        row.labor_time,
        TimeUnit::parse(&row.labor_unit),
        row.machine_time,
        TimeUnit::parse(&row.machine_unit),
        row.labor_rate,
        row.machine_rate,
        row.overhead_rate,
        OperationKind::parse(&row.operation_type),
        OperationOrder::parse(&row.operation_order),
        row.sort_order,
        row.operation_quantity,
        row.operation_minimum_cost,
        row.operation_lead_time,
        row.supplier_process_id.map(SupplierProcessId::from_uuid),
        row.work_instruction,
        audit_info,
    )
}

pub fn tool_from_row(row: ToolRow) -> OperationTool {
    OperationTool::from_parts(row.id, ToolId::from_uuid(row.tool_id), row.quantity)
}

pub fn parameter_from_row(row: ParameterRow) -> OperationParameter {
    OperationParameter::from_parts(row.id, row.key, row.value)
}

pub fn attribute_from_row(row: AttributeRow) -> OperationAttribute {
    OperationAttribute::from_parts(
        row.id,
        row.name,
        row.attribute_type,
        row.min_value,
        row.max_value,
        row.description,
    )
}

/// 将 ItemRow 转换为物品视图
pub fn item_from_row(row: ItemRow) -> Item {
    Item::from_parts(
        ItemId::from_uuid(row.id),
        CompanyId::from_uuid(row.company_id),
        row.readable_id,
        row.name,
        row.description,
        ItemType::parse(&row.item_type),
        MethodType::parse(&row.default_method_type),
        row.unit_of_measure_code,
        row.unit_cost,
        TrackingKind::parse(&row.tracking),
        row.active,
    )
}

/// 将 JobRow 转换为作业视图
pub fn job_from_row(row: JobRow) -> Job {
    Job::from_parts(
        JobId::from_uuid(row.id),
        CompanyId::from_uuid(row.company_id),
        row.readable_id,
        ItemId::from_uuid(row.item_id),
        row.production_quantity,
        JobStatus::parse(&row.status),
        row.due_date,
    )
}

/// 将 WorkCenterRow 转换为工作中心视图
pub fn work_center_from_row(row: WorkCenterRow) -> WorkCenter {
    let process_ids = row.process_ids.into_iter().map(ProcessId::from_uuid).collect();
    WorkCenter::from_parts(
        WorkCenterId::from_uuid(row.id),
        CompanyId::from_uuid(row.company_id),
        row.name,
        row.labor_rate,
        row.machine_rate,
        row.overhead_rate,
        row.active,
        process_ids,
    )
}

pub fn supplier_process_from_row(row: SupplierProcessRow) -> SupplierProcess {
    SupplierProcess::from_parts(
        SupplierProcessId::from_uuid(row.id),
        CompanyId::from_uuid(row.company_id),
        ProcessId::from_uuid(row.process_id),
        row.supplier_id,
        row.minimum_cost,
        row.lead_time,
    )
}

/// 将指导书行与模板行组装为指导书视图
pub fn procedure_from_row(
    row: ProcedureRow,
    parameters: Vec<ProcedureParameter>,
    attributes: Vec<ProcedureAttribute>,
) -> Procedure {
    Procedure::from_parts(
        ProcedureId::from_uuid(row.id),
        CompanyId::from_uuid(row.company_id),
        row.name,
        row.version,
        ProcessId::from_uuid(row.process_id),
        row.content,
        row.active,
        parameters,
        attributes,
    )
}

pub fn procedure_parameter_from_row(row: ProcedureParameterRow) -> ProcedureParameter {
    ProcedureParameter::from_parts(row.id, row.key, row.value, row.sort_order)
}

pub fn procedure_attribute_from_row(row: ProcedureAttributeRow) -> ProcedureAttribute {
    ProcedureAttribute::from_parts(
        row.id,
        row.name,
        row.attribute_type,
        row.min_value,
        row.max_value,
        row.description,
        row.sort_order,
    )
}

/// 将 ConfigurationRuleRow 转换为配置规则视图
pub fn configuration_rule_from_row(row: ConfigurationRuleRow) -> ConfigurationRule {
    ConfigurationRule::from_parts(
        ConfigurationRuleId::from_uuid(row.id),
        CompanyId::from_uuid(row.company_id),
        ItemId::from_uuid(row.item_id),
        row.field_key,
        row.transform,
        row.active,
    )
}

/// 将 TrackedEntityRow 转换为追溯单元
pub fn tracked_entity_from_row(row: TrackedEntityRow) -> TrackedEntity {
    let audit_info = build_audit_info(
        row.created_at,
        row.created_by,
        row.updated_at,
        row.updated_by,
    );

    TrackedEntity::from_parts(
        TrackedEntityId::from_uuid(row.id),
        CompanyId::from_uuid(row.company_id),
        ItemId::from_uuid(row.item_id),
        row.job_make_method_id.map(MakeMethodId::from_uuid),
        row.quantity,
        row.status,
        audit_info,
    )
}

/// 将 QuoteRow 转换为报价单
pub fn quote_from_row(row: QuoteRow) -> Quote {
    let audit_info = build_audit_info(
        row.created_at,
        row.created_by,
        row.updated_at,
        row.updated_by,
    );

    Quote::from_parts(
        QuoteId::from_uuid(row.id),
        CompanyId::from_uuid(row.company_id),
        row.readable_id,
        row.revision,
        row.customer_id,
        row.customer_reference,
        QuoteStatus::parse(&row.status),
        row.expiration_date,
        row.notes,
        audit_info,
    )
}

/// 将 QuoteLineRow 转换为报价行
pub fn quote_line_from_row(row: QuoteLineRow) -> QuoteLine {
    let audit_info = build_audit_info(
        row.created_at,
        row.created_by,
        row.updated_at,
        row.updated_by,
    );

    QuoteLine::from_parts(
        QuoteLineId::from_uuid(row.id),
        CompanyId::from_uuid(row.company_id),
        QuoteId::from_uuid(row.quote_id),
        ItemId::from_uuid(row.item_id),
        row.description,
        MethodType::parse(&row.method_type),
        row.quantity,
        row.unit_of_measure_code,
        row.status,
        row.sort_order,
        audit_info,
    )
}

pub fn quote_payment_from_row(row: QuotePaymentRow) -> QuotePayment {
    let audit_info = build_audit_info(
        row.created_at,
        row.created_by,
        row.updated_at,
        row.updated_by,
    );

    QuotePayment::from_parts(
        row.id,
        CompanyId::from_uuid(row.company_id),
        QuoteId::from_uuid(row.quote_id),
        row.payment_term_id,
        audit_info,
    )
}

pub fn quote_shipment_from_row(row: QuoteShipmentRow) -> QuoteShipment {
    let audit_info = build_audit_info(
        row.created_at,
        row.created_by,
        row.updated_at,
        row.updated_by,
    );

    QuoteShipment::from_parts(
        row.id,
        CompanyId::from_uuid(row.company_id),
        QuoteId::from_uuid(row.quote_id),
        row.shipping_method_id,
        row.shipping_cost,
        row.receipt_requested_date,
        audit_info,
    )
}

pub fn quote_line_price_from_row(row: QuoteLinePriceRow) -> QuoteLinePrice {
    let audit_info = build_audit_info(
        row.created_at,
        row.created_by,
        row.updated_at,
        row.updated_by,
    );

    QuoteLinePrice::from_parts(
        row.id,
        CompanyId::from_uuid(row.company_id),
        QuoteId::from_uuid(row.quote_id),
        QuoteLineId::from_uuid(row.quote_line_id),
        row.quantity,
        row.unit_price,
        row.discount_percent,
        row.lead_time,
        audit_info,
    )
}

fn build_audit_info(
    created_at: chrono::DateTime<chrono::Utc>,
    created_by: Option<Uuid>,
    updated_at: chrono::DateTime<chrono::Utc>,
    updated_by: Option<Uuid>,
) -> AuditInfo {
    AuditInfo {
        created_at,
        created_by: created_by.map(UserId::from_uuid),
        updated_at,
        updated_by: updated_by.map(UserId::from_uuid),
    }
}
