//! 配置规则只读视图
//!
//! 字段键与变换规则存为原文，解析失败由配置解析器降级处理，
//! 不在加载阶段报错。

use common::types::CompanyId;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ConfigurationRuleId, ItemId};

/// 配置规则
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurationRule {
    /// 规则 ID
    id: ConfigurationRuleId,
    /// 公司 ID
    company_id: CompanyId,
    /// 适用物品 ID
    item_id: ItemId,
    /// 字段键原文，如 `field:<nodeId>`
    field_key: String,
    /// 变换规则（带标签 JSON）
    transform: serde_json::Value,
    /// 是否启用
    active: bool,
}

impl ConfigurationRule {
    /// 从各部分构建（用于从数据库加载）
    pub fn from_parts(
        id: ConfigurationRuleId,
        company_id: CompanyId,
        item_id: ItemId,
        field_key: String,
        transform: serde_json::Value,
        active: bool,
    ) -> Self {
        Self {
            id,
            company_id,
            item_id,
            field_key,
            transform,
            active,
        }
    }

    // ========== Getters ==========

    pub fn id(&self) -> &ConfigurationRuleId {
        &self.id
    }

    pub fn company_id(&self) -> &CompanyId {
        &self.company_id
    }

    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    pub fn field_key(&self) -> &str {
        &self.field_key
    }

    pub fn transform(&self) -> &serde_json::Value {
        &self.transform
    }

    pub fn active(&self) -> bool {
        self.active
    }
}
