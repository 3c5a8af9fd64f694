//! 报价聚合
//!
//! 整单复制（新版本）时逐表整体克隆，除版本号与状态外不改动业务字段。

use chrono::NaiveDate;
use common::types::{AuditInfo, CompanyId, UserId};
use domain_core::{AggregateRoot, Entity};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::enums::{MethodType, QuoteStatus};
use crate::domain::value_objects::{ItemId, QuoteId, QuoteLineId};

/// 报价单头
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    /// 报价单 ID
    id: QuoteId,
    /// 公司 ID
    company_id: CompanyId,
    /// 报价单号（同号不同版本共享）
    readable_id: String,
    /// 版本号，从 0 起
    revision: i32,
    /// 客户 ID
    customer_id: Uuid,
    /// 客户参考号
    customer_reference: Option<String>,
    /// 状态
    status: QuoteStatus,
    /// 失效日期
    expiration_date: Option<NaiveDate>,
    /// 备注
    notes: Option<serde_json::Value>,
    /// 审计信息
    audit_info: AuditInfo,
}

impl Quote {
    /// 从各部分构建（用于从数据库加载）
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: QuoteId,
        company_id: CompanyId,
        readable_id: String,
        revision: i32,
        customer_id: Uuid,
        customer_reference: Option<String>,
        status: QuoteStatus,
        expiration_date: Option<NaiveDate>,
        notes: Option<serde_json::Value>,
        audit_info: AuditInfo,
    ) -> Self {
        Self {
            id,
            company_id,
            readable_id,
            revision,
            customer_id,
            customer_reference,
            status,
            expiration_date,
            notes,
            audit_info,
        }
    }

    /// 以本单为模板创建下一个版本
    ///
    /// 单号与客户信息保留，版本号加一，状态重置为草稿。
    pub fn next_revision(&self, id: QuoteId, user_id: Option<UserId>) -> Self {
        Self {
            id,
            company_id: self.company_id.clone(),
            readable_id: self.readable_id.clone(),
            revision: self.revision + 1,
            customer_id: self.customer_id,
            customer_reference: self.customer_reference.clone(),
            status: QuoteStatus::Draft,
            expiration_date: self.expiration_date,
            notes: self.notes.clone(),
            audit_info: AuditInfo::new(user_id),
        }
    }

    // ========== Getters ==========

    pub fn id(&self) -> &QuoteId {
        &self.id
    }

    pub fn company_id(&self) -> &CompanyId {
        &self.company_id
    }

    pub fn readable_id(&self) -> &str {
        &self.readable_id
    }

    pub fn revision(&self) -> i32 {
        self.revision
    }

    pub fn customer_id(&self) -> Uuid {
        self.customer_id
    }

    pub fn customer_reference(&self) -> Option<&str> {
        self.customer_reference.as_deref()
    }

    pub fn status(&self) -> QuoteStatus {
        self.status
    }

    pub fn expiration_date(&self) -> Option<NaiveDate> {
        self.expiration_date
    }

    pub fn notes(&self) -> Option<&serde_json::Value> {
        self.notes.as_ref()
    }
}

impl Entity for Quote {
    type Id = QuoteId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for Quote {
    fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    fn audit_info_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit_info
    }
}

/// 报价行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteLine {
    /// 报价行 ID
    id: QuoteLineId,
    /// 公司 ID
    company_id: CompanyId,
    /// 所属报价单 ID
    quote_id: QuoteId,
    /// 物品 ID
    item_id: ItemId,
    /// 描述
    description: String,
    /// 供应方式
    method_type: MethodType,
    /// 报价数量
    quantity: f64,
    /// 计量单位
    unit_of_measure_code: String,
    /// 行状态
    status: String,
    /// 行序
    order: f64,
    /// 审计信息
    audit_info: AuditInfo,
}

impl QuoteLine {
    /// 从各部分构建（用于从数据库加载）
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: QuoteLineId,
        company_id: CompanyId,
        quote_id: QuoteId,
        item_id: ItemId,
        description: String,
        method_type: MethodType,
        quantity: f64,
        unit_of_measure_code: String,
        status: String,
        order: f64,
        audit_info: AuditInfo,
    ) -> Self {
        Self {
            id,
            company_id,
            quote_id,
            item_id,
            description,
            method_type,
            quantity,
            unit_of_measure_code,
            status,
            order,
            audit_info,
        }
    }

    /// 克隆到另一张报价单下
    pub fn duplicate_for(
        &self,
        id: QuoteLineId,
        quote_id: QuoteId,
        user_id: Option<UserId>,
    ) -> Self {
        Self {
            id,
            company_id: self.company_id.clone(),
            quote_id,
            item_id: self.item_id.clone(),
            description: self.description.clone(),
            method_type: self.method_type,
            quantity: self.quantity,
            unit_of_measure_code: self.unit_of_measure_code.clone(),
            status: self.status.clone(),
            order: self.order,
            audit_info: AuditInfo::new(user_id),
        }
    }

    // ========== Getters ==========

    pub fn id(&self) -> &QuoteLineId {
        &self.id
    }

    pub fn company_id(&self) -> &CompanyId {
        &self.company_id
    }

    pub fn quote_id(&self) -> &QuoteId {
        &self.quote_id
    }

    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn method_type(&self) -> MethodType {
        self.method_type
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn unit_of_measure_code(&self) -> &str {
        &self.unit_of_measure_code
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn order(&self) -> f64 {
        self.order
    }
}

impl Entity for QuoteLine {
    type Id = QuoteLineId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for QuoteLine {
    fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    fn audit_info_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit_info
    }
}

/// 报价付款条款
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotePayment {
    id: Uuid,
    company_id: CompanyId,
    quote_id: QuoteId,
    /// 付款条款 ID（跨服务引用）
    payment_term_id: Option<Uuid>,
    audit_info: AuditInfo,
}

impl QuotePayment {
    pub fn from_parts(
        id: Uuid,
        company_id: CompanyId,
        quote_id: QuoteId,
        payment_term_id: Option<Uuid>,
        audit_info: AuditInfo,
    ) -> Self {
        Self {
            id,
            company_id,
            quote_id,
            payment_term_id,
            audit_info,
        }
    }

    /// 克隆到另一张报价单下
    pub fn duplicate_for(&self, quote_id: QuoteId, user_id: Option<UserId>) -> Self {
        Self {
            id: Uuid::now_v7(),
            company_id: self.company_id.clone(),
            quote_id,
            payment_term_id: self.payment_term_id,
            audit_info: AuditInfo::new(user_id),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn company_id(&self) -> &CompanyId {
        &self.company_id
    }

    pub fn quote_id(&self) -> &QuoteId {
        &self.quote_id
    }

    pub fn payment_term_id(&self) -> Option<Uuid> {
        self.payment_term_id
    }

    pub fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }
}

/// 报价发运条款
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteShipment {
    id: Uuid,
    company_id: CompanyId,
    quote_id: QuoteId,
    /// 运输方式 ID（跨服务引用）
    shipping_method_id: Option<Uuid>,
    /// 运费
    shipping_cost: f64,
    /// 期望收货日期
    receipt_requested_date: Option<NaiveDate>,
    audit_info: AuditInfo,
}

impl QuoteShipment {
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: Uuid,
        company_id: CompanyId,
        quote_id: QuoteId,
        shipping_method_id: Option<Uuid>,
        shipping_cost: f64,
        receipt_requested_date: Option<NaiveDate>,
        audit_info: AuditInfo,
    ) -> Self {
        Self {
            id,
            company_id,
            quote_id,
            shipping_method_id,
            shipping_cost,
            receipt_requested_date,
            audit_info,
        }
    }

    /// 克隆到另一张报价单下
    pub fn duplicate_for(&self, quote_id: QuoteId, user_id: Option<UserId>) -> Self {
        Self {
            id: Uuid::now_v7(),
            company_id: self.company_id.clone(),
            quote_id,
            shipping_method_id: self.shipping_method_id,
            shipping_cost: self.shipping_cost,
            receipt_requested_date: self.receipt_requested_date,
            audit_info: AuditInfo::new(user_id),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn company_id(&self) -> &CompanyId {
        &self.company_id
    }

    pub fn quote_id(&self) -> &QuoteId {
        &self.quote_id
    }

    pub fn shipping_method_id(&self) -> Option<Uuid> {
        self.shipping_method_id
    }

    pub fn shipping_cost(&self) -> f64 {
        self.shipping_cost
    }

    pub fn receipt_requested_date(&self) -> Option<NaiveDate> {
        self.receipt_requested_date
    }

    pub fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }
}

/// 报价行阶梯价格
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteLinePrice {
    id: Uuid,
    company_id: CompanyId,
    quote_id: QuoteId,
    quote_line_id: QuoteLineId,
    /// 价格适用数量
    quantity: f64,
    /// 单价
    unit_price: f64,
    /// 折扣百分比
    discount_percent: f64,
    /// 交付周期（天）
    lead_time: f64,
    audit_info: AuditInfo,
}

impl QuoteLinePrice {
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: Uuid,
        company_id: CompanyId,
        quote_id: QuoteId,
        quote_line_id: QuoteLineId,
        quantity: f64,
        unit_price: f64,
        discount_percent: f64,
        lead_time: f64,
        audit_info: AuditInfo,
    ) -> Self {
        Self {
            id,
            company_id,
            quote_id,
            quote_line_id,
            quantity,
            unit_price,
            discount_percent,
            lead_time,
            audit_info,
        }
    }

    /// 克隆到另一张报价单的对应行下
    pub fn duplicate_for(
        &self,
        quote_id: QuoteId,
        quote_line_id: QuoteLineId,
        user_id: Option<UserId>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            company_id: self.company_id.clone(),
            quote_id,
            quote_line_id,
            quantity: self.quantity,
            unit_price: self.unit_price,
            discount_percent: self.discount_percent,
            lead_time: self.lead_time,
            audit_info: AuditInfo::new(user_id),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn company_id(&self) -> &CompanyId {
        &self.company_id
    }

    pub fn quote_id(&self) -> &QuoteId {
        &self.quote_id
    }

    pub fn quote_line_id(&self) -> &QuoteLineId {
        &self.quote_line_id
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    pub fn discount_percent(&self) -> f64 {
        self.discount_percent
    }

    pub fn lead_time(&self) -> f64 {
        self.lead_time
    }

    pub fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }
}
