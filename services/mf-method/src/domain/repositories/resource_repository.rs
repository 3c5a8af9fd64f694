//! 费率参考数据仓储接口（只读）

use async_trait::async_trait;
use common::types::CompanyId;
use errors::AppResult;

use crate::domain::views::{SupplierProcess, WorkCenter};

/// 费率参考数据仓储接口
#[async_trait]
pub trait ResourceRepository: Send + Sync {
    /// 公司全量工作中心（含承接工艺过程清单）
    async fn work_centers(&self, company_id: &CompanyId) -> AppResult<Vec<WorkCenter>>;

    /// 公司全量外协工艺
    async fn supplier_processes(&self, company_id: &CompanyId) -> AppResult<Vec<SupplierProcess>>;
}
