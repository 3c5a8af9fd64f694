//! 配置规则仓储接口（只读）

use async_trait::async_trait;
use common::types::CompanyId;
use errors::AppResult;

use crate::domain::value_objects::ItemId;
use crate::domain::views::ConfigurationRule;

/// 配置规则仓储接口
#[async_trait]
pub trait ConfigurationRuleRepository: Send + Sync {
    /// 物品上登记的全部启用配置规则
    async fn rules_for_item(
        &self,
        item_id: &ItemId,
        company_id: &CompanyId,
    ) -> AppResult<Vec<ConfigurationRule>>;
}
