//! 作业仓储接口

use async_trait::async_trait;
use common::types::CompanyId;
use errors::AppResult;

use crate::domain::entities::TrackedEntity;
use crate::domain::value_objects::{JobId, MakeMethodId};
use crate::domain::views::Job;

/// 作业仓储接口
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// 按 ID 查找作业
    async fn find_by_id(&self, job_id: &JobId, company_id: &CompanyId)
        -> AppResult<Option<Job>>;

    /// 查找挂接在一组作业方法节点上的追溯单元
    async fn tracked_entities_for_methods(
        &self,
        method_ids: &[MakeMethodId],
        company_id: &CompanyId,
    ) -> AppResult<Vec<TrackedEntity>>;
}
