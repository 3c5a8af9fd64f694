//! 方法仓储接口
//!
//! 三个域（物品/作业/报价）表名不同、形状相同，
//! 实现按域做表名参数化，接口只有一套。

use async_trait::async_trait;
use common::types::CompanyId;
use errors::AppResult;

use crate::domain::entities::{MakeMethod, MethodOperation};
use crate::domain::enums::MethodDomain;
use crate::domain::plan::{MethodWritePlan, WriteStats};
use crate::domain::tree::MethodTreeRow;
use crate::domain::value_objects::{ItemId, JobId, MakeMethodId, OperationId, QuoteId, QuoteLineId};

/// 方法仓储接口
#[async_trait]
pub trait MethodRepository: Send + Sync {
    // ========== 树加载 ==========

    /// 加载指定根方法的整棵子树（每行附带节点物料），平面返回
    async fn load_tree_rows(
        &self,
        domain: MethodDomain,
        root_method_id: &MakeMethodId,
        company_id: &CompanyId,
    ) -> AppResult<Vec<MethodTreeRow>>;

    /// 加载一组方法节点下的全部工序，附带工装/参数/属性子行
    async fn load_operations(
        &self,
        domain: MethodDomain,
        method_ids: &[MakeMethodId],
        company_id: &CompanyId,
    ) -> AppResult<Vec<MethodOperation>>;

    // ========== 锚点查找 ==========

    /// 按 ID 查找方法节点
    async fn find_method(
        &self,
        domain: MethodDomain,
        method_id: &MakeMethodId,
        company_id: &CompanyId,
    ) -> AppResult<Option<MakeMethod>>;

    /// 物品主数据方法树的根
    async fn find_root_for_item(
        &self,
        item_id: &ItemId,
        company_id: &CompanyId,
    ) -> AppResult<Option<MakeMethod>>;

    /// 作业方法树的根
    async fn find_root_for_job(
        &self,
        job_id: &JobId,
        company_id: &CompanyId,
    ) -> AppResult<Option<MakeMethod>>;

    /// 报价行方法树的根
    async fn find_root_for_quote_line(
        &self,
        quote_id: &QuoteId,
        quote_line_id: &QuoteLineId,
        company_id: &CompanyId,
    ) -> AppResult<Option<MakeMethod>>;

    /// 按 ID 查找工序（附带子行，供指导书同步差分）
    async fn find_operation(
        &self,
        domain: MethodDomain,
        operation_id: &OperationId,
        company_id: &CompanyId,
    ) -> AppResult<Option<MethodOperation>>;

    // ========== 执行 ==========

    /// 在单个事务里执行写计划
    ///
    /// 先按计划的锁 ID 取事务级咨询锁，再做旧子树清理，
    /// 然后按序回放写操作。任何一步失败整体回滚。
    async fn execute(&self, plan: &MethodWritePlan) -> AppResult<WriteStats>;
}
