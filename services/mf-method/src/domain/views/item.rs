//! 物品只读视图
//!
//! 克隆时解析物料字段用的参考数据，本服务不维护物品主数据。

use common::types::CompanyId;
use serde::{Deserialize, Serialize};

use crate::domain::enums::{ItemType, MethodType, TrackingKind};
use crate::domain::value_objects::ItemId;

/// 物品
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// 物品 ID
    id: ItemId,
    /// 公司 ID
    company_id: CompanyId,
    /// 物品编码
    readable_id: String,
    /// 名称
    name: String,
    /// 描述
    description: Option<String>,
    /// 物品类型
    item_type: ItemType,
    /// 默认供应方式
    default_method_type: MethodType,
    /// 计量单位
    unit_of_measure_code: String,
    /// 单位成本
    unit_cost: f64,
    /// 追溯方式
    tracking: TrackingKind,
    /// 是否启用
    active: bool,
}

impl Item {
    /// 从各部分构建（用于从数据库加载）
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: ItemId,
        company_id: CompanyId,
        readable_id: String,
        name: String,
        description: Option<String>,
        item_type: ItemType,
        default_method_type: MethodType,
        unit_of_measure_code: String,
        unit_cost: f64,
        tracking: TrackingKind,
        active: bool,
    ) -> Self {
        Self {
            id,
            company_id,
            readable_id,
            name,
            description,
            item_type,
            default_method_type,
            unit_of_measure_code,
            unit_cost,
            tracking,
            active,
        }
    }

    // ========== Getters ==========

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn company_id(&self) -> &CompanyId {
        &self.company_id
    }

    pub fn readable_id(&self) -> &str {
        &self.readable_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn item_type(&self) -> ItemType {
        self.item_type
    }

    pub fn default_method_type(&self) -> MethodType {
        self.default_method_type
    }

    pub fn unit_of_measure_code(&self) -> &str {
        &self.unit_of_measure_code
    }

    pub fn unit_cost(&self) -> f64 {
        self.unit_cost
    }

    pub fn tracking(&self) -> TrackingKind {
        self.tracking
    }

    pub fn active(&self) -> bool {
        self.active
    }
}
