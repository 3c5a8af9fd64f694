//! 作业指导书仓储接口（只读）

use async_trait::async_trait;
use common::types::CompanyId;
use errors::AppResult;

use crate::domain::value_objects::ProcedureId;
use crate::domain::views::Procedure;

/// 作业指导书仓储接口
#[async_trait]
pub trait ProcedureRepository: Send + Sync {
    /// 按 ID 查找指导书（含参数/属性模板，模板内有序）
    async fn find_by_id(
        &self,
        procedure_id: &ProcedureId,
        company_id: &CompanyId,
    ) -> AppResult<Option<Procedure>>;

    /// 批量查找指导书
    async fn find_many(
        &self,
        procedure_ids: &[ProcedureId],
        company_id: &CompanyId,
    ) -> AppResult<Vec<Procedure>>;
}
