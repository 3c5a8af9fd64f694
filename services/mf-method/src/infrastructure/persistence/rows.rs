//! 数据库行映射结构
//!
//! 方法族三套表共用同一批行结构：查询侧已把缺失的归属列
//! 和作业域数量列用 NULL 投影补齐。

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// 方法节点数据库行
#[derive(Debug, FromRow)]
pub struct MakeMethodRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub item_id: Uuid,
    pub job_id: Option<Uuid>,
    pub quote_id: Option<Uuid>,
    pub quote_line_id: Option<Uuid>,
    pub parent_material_id: Option<Uuid>,
    pub quantity_per_parent: f64,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<Uuid>,
}

/// 递归树查询输出行，比节点行多一列反查出的父方法 ID
#[derive(Debug, FromRow)]
pub struct MethodNodeRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub item_id: Uuid,
    pub job_id: Option<Uuid>,
    pub quote_id: Option<Uuid>,
    pub quote_line_id: Option<Uuid>,
    pub parent_material_id: Option<Uuid>,
    pub quantity_per_parent: f64,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<Uuid>,
    pub parent_method_id: Option<Uuid>,
}

/// 方法物料数据库行
#[derive(Debug, FromRow)]
pub struct MaterialRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub make_method_id: Uuid,
    pub item_id: Uuid,
    pub item_type: String,
    pub method_type: String,
    pub quantity: f64,
    pub estimated_quantity: Option<f64>,
    pub unit_of_measure_code: String,
    pub unit_cost: f64,
    pub description: String,
    pub sort_order: f64,
    pub tracking: String,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<Uuid>,
}

/// 工序数据库行
#[derive(Debug, FromRow)]
pub struct OperationRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub make_method_id: Uuid,
    pub process_id: Uuid,
    pub procedure_id: Option<Uuid>,
    pub work_center_id: Option<Uuid>,
    pub description: String,
    pub setup_time: f64,
    pub setup_unit: String,
    pub labor_time: f64,
    pub labor_unit: String,
    pub machine_time: f64,
    pub machine_unit: String,
    pub labor_rate: f64,
    pub machine_rate: f64,
    pub overhead_rate: f64,
    pub operation_type: String,
    pub operation_order: String,
    pub sort_order: f64,
    pub operation_quantity: Option<f64>,
    pub operation_minimum_cost: f64,
    pub operation_lead_time: f64,
    pub supplier_process_id: Option<Uuid>,
    pub work_instruction: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<Uuid>,
}

/// 工序工装子行
#[derive(Debug, FromRow)]
pub struct ToolRow {
    pub id: Uuid,
    pub operation_id: Uuid,
    pub tool_id: Uuid,
    pub quantity: f64,
}

/// 工序参数子行
#[derive(Debug, FromRow)]
pub struct ParameterRow {
    pub id: Uuid,
    pub operation_id: Uuid,
    pub key: String,
    pub value: String,
}

/// 工序属性子行
#[derive(Debug, FromRow)]
pub struct AttributeRow {
    pub id: Uuid,
    pub operation_id: Uuid,
    pub name: String,
    pub attribute_type: String,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub description: Option<String>,
}

/// 物品数据库行
#[derive(Debug, FromRow)]
pub struct ItemRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub readable_id: String,
    pub name: String,
    pub description: Option<String>,
    pub item_type: String,
    pub default_method_type: String,
    pub unit_of_measure_code: String,
    pub unit_cost: f64,
    pub tracking: String,
    pub active: bool,
}

/// 作业数据库行
#[derive(Debug, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub readable_id: String,
    pub item_id: Uuid,
    pub production_quantity: f64,
    pub status: String,
    pub due_date: Option<NaiveDate>,
}

/// 工作中心数据库行（含聚合出的承接工艺过程数组）
#[derive(Debug, FromRow)]
pub struct WorkCenterRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub labor_rate: f64,
    pub machine_rate: f64,
    pub overhead_rate: f64,
    pub active: bool,
    pub process_ids: Vec<Uuid>,
}

/// 外协工艺数据库行
#[derive(Debug, FromRow)]
pub struct SupplierProcessRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub process_id: Uuid,
    pub supplier_id: Uuid,
    pub minimum_cost: f64,
    pub lead_time: f64,
}

/// 作业指导书数据库行
#[derive(Debug, FromRow)]
pub struct ProcedureRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub version: i32,
    pub process_id: Uuid,
    pub content: Option<serde_json::Value>,
    pub active: bool,
}

/// 指导书参数模板行
#[derive(Debug, FromRow)]
pub struct ProcedureParameterRow {
    pub id: Uuid,
    pub procedure_id: Uuid,
    pub key: String,
    pub value: String,
    pub sort_order: f64,
}

/// 指导书属性模板行
#[derive(Debug, FromRow)]
pub struct ProcedureAttributeRow {
    pub id: Uuid,
    pub procedure_id: Uuid,
    pub name: String,
    pub attribute_type: String,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub description: Option<String>,
    pub sort_order: f64,
}

/// 配置规则数据库行
#[derive(Debug, FromRow)]
pub struct ConfigurationRuleRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub item_id: Uuid,
    pub field_key: String,
    pub transform: serde_json::Value,
    pub active: bool,
}

/// 追溯单元数据库行
#[derive(Debug, FromRow)]
pub struct TrackedEntityRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub item_id: Uuid,
    pub job_make_method_id: Option<Uuid>,
    pub quantity: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<Uuid>,
}

/// 报价单数据库行
#[derive(Debug, FromRow)]
pub struct QuoteRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub readable_id: String,
    pub revision: i32,
    pub customer_id: Uuid,
    pub customer_reference: Option<String>,
    pub status: String,
    pub expiration_date: Option<NaiveDate>,
    pub notes: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<Uuid>,
}

/// 报价行数据库行
#[derive(Debug, FromRow)]
pub struct QuoteLineRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub quote_id: Uuid,
    pub item_id: Uuid,
    pub description: String,
    pub method_type: String,
    pub quantity: f64,
    pub unit_of_measure_code: String,
    pub status: String,
    pub sort_order: f64,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<Uuid>,
}

/// 报价付款条款行
#[derive(Debug, FromRow)]
pub struct QuotePaymentRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub quote_id: Uuid,
    pub payment_term_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<Uuid>,
}

/// 报价发运条款行
#[derive(Debug, FromRow)]
pub struct QuoteShipmentRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub quote_id: Uuid,
    pub shipping_method_id: Option<Uuid>,
    pub shipping_cost: f64,
    pub receipt_requested_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<Uuid>,
}

/// 报价行阶梯价格行
#[derive(Debug, FromRow)]
pub struct QuoteLinePriceRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub quote_id: Uuid,
    pub quote_line_id: Uuid,
    pub quantity: f64,
    pub unit_price: f64,
    pub discount_percent: f64,
    pub lead_time: f64,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<Uuid>,
}
