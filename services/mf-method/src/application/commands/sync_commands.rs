//! 方法同步命令
//!
//! `sourceId` / `targetId` 在请求里是字符串：普通域是单个
//! UUID，报价行域是 `"<quoteId>:<quoteLineId>"` 复合串。
//! 命令负责按操作类型把字符串解析成强类型锚点。

use std::str::FromStr;

use common::types::{CompanyId, UserId};
use errors::{AppError, AppResult};

use crate::domain::enums::{MethodDomain, SyncOp};
use crate::domain::value_objects::{
    ItemId, JobId, MakeMethodId, OperationId, ProcedureId, QuoteId, QuoteLineId,
};

/// 解析后的锚点
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorRef {
    /// 物品
    Item(ItemId),
    /// 作业
    Job(JobId),
    /// 作业方法节点
    JobMakeMethod(MakeMethodId),
    /// 报价行（复合串）
    QuoteLine(QuoteId, QuoteLineId),
    /// 报价方法节点
    QuoteMakeMethod(MakeMethodId),
    /// 整张报价单
    Quote(QuoteId),
}

/// 方法同步命令
#[derive(Debug, Clone)]
pub struct SyncMethodCommand {
    pub op: SyncOp,
    pub source_id: String,
    pub target_id: Option<String>,
    pub company_id: CompanyId,
    pub user_id: UserId,
    pub configuration: Option<serde_json::Value>,
}

impl SyncMethodCommand {
    pub fn validate(&self) -> AppResult<()> {
        if self.source_id.trim().is_empty() {
            return Err(AppError::validation("sourceId 不能为空"));
        }
        if self.op.requires_target() {
            match &self.target_id {
                Some(target) if !target.trim().is_empty() => {}
                _ => {
                    return Err(AppError::validation(format!(
                        "{} 操作缺少 targetId",
                        self.op.as_str()
                    )));
                }
            }
        }
        // 锚点格式提前检查，解析失败在这里就报 400
        self.source_anchor()?;
        self.target_anchor()?;
        Ok(())
    }

    /// 源锚点
    pub fn source_anchor(&self) -> AppResult<AnchorRef> {
        match self.op {
            SyncOp::ItemToItem
            | SyncOp::ItemToJob
            | SyncOp::ItemToJobMakeMethod
            | SyncOp::ItemToQuoteLine
            | SyncOp::ItemToQuoteMakeMethod => parse_item(&self.source_id).map(AnchorRef::Item),
            SyncOp::JobMakeMethodToItem => {
                parse_method(&self.source_id).map(AnchorRef::JobMakeMethod)
            }
            SyncOp::JobToItem | SyncOp::RecalculateJobRequirements => {
                parse_job(&self.source_id).map(AnchorRef::Job)
            }
            SyncOp::QuoteLineToItem | SyncOp::QuoteLineToJob | SyncOp::QuoteLineToQuoteLine => {
                parse_quote_line(&self.source_id)
                    .map(|(quote, line)| AnchorRef::QuoteLine(quote, line))
            }
            SyncOp::QuoteMakeMethodToItem => {
                parse_method(&self.source_id).map(AnchorRef::QuoteMakeMethod)
            }
            SyncOp::QuoteToQuote => parse_quote(&self.source_id).map(AnchorRef::Quote),
            SyncOp::RecalculateJobMakeMethodRequirements => {
                parse_method(&self.source_id).map(AnchorRef::JobMakeMethod)
            }
        }
    }

    /// 目标锚点，不需要目标的操作返回空
    pub fn target_anchor(&self) -> AppResult<Option<AnchorRef>> {
        if !self.op.requires_target() {
            return Ok(None);
        }
        let target = self
            .target_id
            .as_deref()
            .ok_or_else(|| AppError::validation("targetId 缺失"))?;
        let anchor = match self.op {
            SyncOp::ItemToItem
            | SyncOp::JobMakeMethodToItem
            | SyncOp::JobToItem
            | SyncOp::QuoteLineToItem
            | SyncOp::QuoteMakeMethodToItem => parse_item(target).map(AnchorRef::Item)?,
            SyncOp::ItemToJob | SyncOp::QuoteLineToJob => parse_job(target).map(AnchorRef::Job)?,
            SyncOp::ItemToJobMakeMethod => parse_method(target).map(AnchorRef::JobMakeMethod)?,
            SyncOp::ItemToQuoteLine | SyncOp::QuoteLineToQuoteLine => parse_quote_line(target)
                .map(|(quote, line)| AnchorRef::QuoteLine(quote, line))?,
            SyncOp::ItemToQuoteMakeMethod => {
                parse_method(target).map(AnchorRef::QuoteMakeMethod)?
            }
            SyncOp::QuoteToQuote
            | SyncOp::RecalculateJobMakeMethodRequirements
            | SyncOp::RecalculateJobRequirements => {
                return Ok(None);
            }
        };
        Ok(Some(anchor))
    }
}

fn parse_item(value: &str) -> AppResult<ItemId> {
    ItemId::from_str(value.trim())
        .map_err(|_| AppError::validation(format!("物品 ID 无效: {}", value)))
}

fn parse_job(value: &str) -> AppResult<JobId> {
    JobId::from_str(value.trim())
        .map_err(|_| AppError::validation(format!("作业 ID 无效: {}", value)))
}

fn parse_method(value: &str) -> AppResult<MakeMethodId> {
    MakeMethodId::from_str(value.trim())
        .map_err(|_| AppError::validation(format!("方法 ID 无效: {}", value)))
}

fn parse_quote(value: &str) -> AppResult<QuoteId> {
    QuoteId::from_str(value.trim())
        .map_err(|_| AppError::validation(format!("报价单 ID 无效: {}", value)))
}

/// 解析 `"<quoteId>:<quoteLineId>"` 复合串
fn parse_quote_line(value: &str) -> AppResult<(QuoteId, QuoteLineId)> {
    let (quote, line) = value
        .trim()
        .split_once(':')
        .ok_or_else(|| AppError::validation(format!("报价行复合 ID 无效: {}", value)))?;
    let quote_id = QuoteId::from_str(quote)
        .map_err(|_| AppError::validation(format!("报价行复合 ID 无效: {}", value)))?;
    let line_id = QuoteLineId::from_str(line)
        .map_err(|_| AppError::validation(format!("报价行复合 ID 无效: {}", value)))?;
    Ok((quote_id, line_id))
}

/// 指导书同步命令
#[derive(Debug, Clone)]
pub struct SyncProcedureCommand {
    pub procedure_id: ProcedureId,
    pub operation_id: OperationId,
    pub domain: MethodDomain,
    pub company_id: CompanyId,
    pub user_id: UserId,
}
