//! 追溯单元
//!
//! 序列/批次追溯的实体单元，可挂接到作业方法节点。
//! 级联重算会把挂接节点的绝对数量回写到这里（序列追溯恒为 1）。

use common::types::{AuditInfo, CompanyId};
use domain_core::{AggregateRoot, Entity};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ItemId, MakeMethodId, TrackedEntityId};

/// 追溯单元
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedEntity {
    /// 追溯单元 ID
    id: TrackedEntityId,
    /// 公司 ID
    company_id: CompanyId,
    /// 物品 ID
    item_id: ItemId,
    /// 挂接的作业方法 ID
    job_make_method_id: Option<MakeMethodId>,
    /// 数量
    quantity: f64,
    /// 状态
    status: String,
    /// 审计信息
    audit_info: AuditInfo,
}

impl TrackedEntity {
    /// 从各部分构建（用于从数据库加载）
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: TrackedEntityId,
        company_id: CompanyId,
        item_id: ItemId,
        job_make_method_id: Option<MakeMethodId>,
        quantity: f64,
        status: String,
        audit_info: AuditInfo,
    ) -> Self {
        Self {
            id,
            company_id,
            item_id,
            job_make_method_id,
            quantity,
            status,
            audit_info,
        }
    }

    // ========== Getters ==========

    pub fn id(&self) -> &TrackedEntityId {
        &self.id
    }

    pub fn company_id(&self) -> &CompanyId {
        &self.company_id
    }

    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    pub fn job_make_method_id(&self) -> Option<&MakeMethodId> {
        self.job_make_method_id.as_ref()
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    // ========== Mutators ==========

    pub fn set_quantity(&mut self, quantity: f64) {
        self.quantity = quantity;
    }
}

impl Entity for TrackedEntity {
    type Id = TrackedEntityId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for TrackedEntity {
    fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    fn audit_info_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit_info
    }
}
