//! 物品仓储接口（只读）

use async_trait::async_trait;
use common::types::CompanyId;
use errors::AppResult;

use crate::domain::value_objects::ItemId;
use crate::domain::views::Item;

/// 物品仓储接口
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// 按 ID 查找物品
    async fn find_by_id(
        &self,
        item_id: &ItemId,
        company_id: &CompanyId,
    ) -> AppResult<Option<Item>>;

    /// 批量查找物品
    async fn find_many(
        &self,
        item_ids: &[ItemId],
        company_id: &CompanyId,
    ) -> AppResult<Vec<Item>>;
}
