//! 费率参考数据只读视图
//!
//! 工作中心与外协工艺只用于费率解析，本服务从不写入。

use common::types::CompanyId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{ProcessId, SupplierProcessId, WorkCenterId};

/// 工作中心
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkCenter {
    /// 工作中心 ID
    id: WorkCenterId,
    /// 公司 ID
    company_id: CompanyId,
    /// 名称
    name: String,
    /// 人工费率
    labor_rate: f64,
    /// 机器费率
    machine_rate: f64,
    /// 制造费用率
    overhead_rate: f64,
    /// 是否启用
    active: bool,
    /// 可承接的工艺过程
    process_ids: Vec<ProcessId>,
}

impl WorkCenter {
    /// 从各部分构建（用于从数据库加载）
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: WorkCenterId,
        company_id: CompanyId,
        name: String,
        labor_rate: f64,
        machine_rate: f64,
        overhead_rate: f64,
        active: bool,
        process_ids: Vec<ProcessId>,
    ) -> Self {
        Self {
            id,
            company_id,
            name,
            labor_rate,
            machine_rate,
            overhead_rate,
            active,
            process_ids,
        }
    }

    // ========== Getters ==========

    pub fn id(&self) -> &WorkCenterId {
        &self.id
    }

    pub fn company_id(&self) -> &CompanyId {
        &self.company_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn labor_rate(&self) -> f64 {
        self.labor_rate
    }

    pub fn machine_rate(&self) -> f64 {
        self.machine_rate
    }

    pub fn overhead_rate(&self) -> f64 {
        self.overhead_rate
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn process_ids(&self) -> &[ProcessId] {
        &self.process_ids
    }

    /// 是否可承接指定工艺过程
    pub fn serves_process(&self, process_id: &ProcessId) -> bool {
        self.process_ids.contains(process_id)
    }
}

/// 外协工艺
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierProcess {
    /// 外协工艺 ID
    id: SupplierProcessId,
    /// 公司 ID
    company_id: CompanyId,
    /// 工艺过程 ID
    process_id: ProcessId,
    /// 供应商 ID（跨服务引用）
    supplier_id: Uuid,
    /// 最低费用
    minimum_cost: f64,
    /// 交付周期（天）
    lead_time: f64,
}

impl SupplierProcess {
    /// 从各部分构建（用于从数据库加载）
    pub fn from_parts(
        id: SupplierProcessId,
        company_id: CompanyId,
        process_id: ProcessId,
        supplier_id: Uuid,
        minimum_cost: f64,
        lead_time: f64,
    ) -> Self {
        Self {
            id,
            company_id,
            process_id,
            supplier_id,
            minimum_cost,
            lead_time,
        }
    }

    // ========== Getters ==========

    pub fn id(&self) -> &SupplierProcessId {
        &self.id
    }

    pub fn company_id(&self) -> &CompanyId {
        &self.company_id
    }

    pub fn process_id(&self) -> &ProcessId {
        &self.process_id
    }

    pub fn supplier_id(&self) -> Uuid {
        self.supplier_id
    }

    pub fn minimum_cost(&self) -> f64 {
        self.minimum_cost
    }

    pub fn lead_time(&self) -> f64 {
        self.lead_time
    }
}
