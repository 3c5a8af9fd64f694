//! 请求/响应 DTO
//!
//! 请求体沿用外部约定的 camelCase 字段，`type` 承载操作名。
//! 锚点 ID 保持字符串原样进命令层，由命令按操作类型解析。

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::types::{CompanyId, UserId};
use errors::{AppError, AppResult};

use crate::application::commands::{SyncMethodCommand, SyncProcedureCommand};
use crate::domain::enums::{MethodDomain, SyncOp};
use crate::domain::value_objects::{OperationId, ProcedureId};

/// 方法同步请求
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncMethodRequest {
    #[serde(rename = "type")]
    pub op: String,
    pub source_id: String,
    #[serde(default)]
    pub target_id: Option<String>,
    pub company_id: Uuid,
    pub user_id: Uuid,
    #[serde(default)]
    pub configuration: Option<serde_json::Value>,
}

impl SyncMethodRequest {
    pub fn into_command(self) -> AppResult<SyncMethodCommand> {
        let op = SyncOp::parse(&self.op)
            .ok_or_else(|| AppError::validation(format!("type 不支持: {}", self.op)))?;
        Ok(SyncMethodCommand {
            op,
            source_id: self.source_id,
            target_id: self.target_id,
            company_id: CompanyId(self.company_id),
            user_id: UserId(self.user_id),
            configuration: self.configuration,
        })
    }
}

/// 方法同步响应
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncMethodResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_quote_id: Option<String>,
}

/// 指导书同步请求
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncProcedureRequest {
    pub procedure_id: Uuid,
    pub operation_id: Uuid,
    pub domain: String,
    pub company_id: Uuid,
    pub user_id: Uuid,
}

impl SyncProcedureRequest {
    pub fn into_command(self) -> AppResult<SyncProcedureCommand> {
        let domain = MethodDomain::parse(&self.domain)
            .ok_or_else(|| AppError::validation(format!("domain 不支持: {}", self.domain)))?;
        Ok(SyncProcedureCommand {
            procedure_id: ProcedureId(self.procedure_id),
            operation_id: OperationId(self.operation_id),
            domain,
            company_id: CompanyId(self.company_id),
            user_id: UserId(self.user_id),
        })
    }
}

/// 指导书同步响应
#[derive(Debug, Clone, Serialize)]
pub struct SyncProcedureResponse {
    pub success: bool,
}
