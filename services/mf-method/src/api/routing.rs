//! API 路由
//!
//! 同步入口、指导书同步、方法树查询与健康检查。指标在这里
//! 按请求结果统一记录，Prometheus 导出器另行监听。

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use adapter_postgres::check_connection;
use common::types::CompanyId;
use errors::{AppError, AppResult};
use telemetry::HealthStatus;

use crate::api::dto::{
    SyncMethodRequest, SyncMethodResponse, SyncProcedureRequest, SyncProcedureResponse,
};
use crate::application::handler::MethodHandler;
use crate::application::queries::{GetMethodTreeQuery, MethodTreeView};
use crate::domain::enums::MethodDomain;
use crate::domain::value_objects::MakeMethodId;
use crate::infrastructure::observability::{
    record_configuration_overrides, record_list_overrides, record_procedure_sync,
    record_rows_written, SyncTimer,
};

/// 路由共享状态
#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<MethodHandler>,
    pub pool: PgPool,
}

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/methods/sync", post(sync_method))
        .route("/v1/procedures/sync", post(sync_procedure))
        .route("/v1/methods/{domain}/{method_id}/tree", get(method_tree))
        .with_state(state)
}

// ============================================================================
// 同步端点
// ============================================================================

async fn sync_method(
    State(state): State<AppState>,
    Json(request): Json<SyncMethodRequest>,
) -> AppResult<Json<SyncMethodResponse>> {
    let command = request.into_command()?;
    let timer = SyncTimer::new(command.op.as_str());

    match state.handler.sync_method(command).await {
        Ok(outcome) => {
            timer.finish(true);
            record_rows_written(&outcome.stats);
            record_configuration_overrides(&outcome.overrides);
            record_list_overrides(&outcome.list_overrides);
            Ok(Json(SyncMethodResponse {
                success: true,
                new_quote_id: outcome.new_quote_id.map(|id| id.to_string()),
            }))
        }
        Err(e) => {
            timer.finish(false);
            Err(e)
        }
    }
}

async fn sync_procedure(
    State(state): State<AppState>,
    Json(request): Json<SyncProcedureRequest>,
) -> AppResult<Json<SyncProcedureResponse>> {
    let command = request.into_command()?;
    let timer = SyncTimer::new("procedureSync");

    match state.handler.sync_procedure(command).await {
        Ok(summary) => {
            timer.finish(true);
            record_procedure_sync(&summary);
            Ok(Json(SyncProcedureResponse { success: true }))
        }
        Err(e) => {
            timer.finish(false);
            Err(e)
        }
    }
}

// ============================================================================
// 方法树查询
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TreeQueryParams {
    company_id: Uuid,
}

async fn method_tree(
    State(state): State<AppState>,
    Path((domain, method_id)): Path<(String, Uuid)>,
    Query(params): Query<TreeQueryParams>,
) -> AppResult<Json<MethodTreeView>> {
    let domain = MethodDomain::parse(&domain)
        .ok_or_else(|| AppError::validation(format!("domain 不支持: {}", domain)))?;

    let view = state
        .handler
        .get_method_tree(GetMethodTreeQuery {
            domain,
            method_id: MakeMethodId(method_id),
            company_id: CompanyId(params.company_id),
        })
        .await?;
    Ok(Json(view))
}

// ============================================================================
// 健康检查
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub checks: Vec<HealthCheckView>,
}

#[derive(Debug, Serialize)]
pub struct HealthCheckView {
    pub name: String,
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let mut status = HealthStatus::new();
    match check_connection(&state.pool).await {
        Ok(()) => status.add_check("database", true, None),
        Err(e) => status.add_check("database", false, Some(e.to_string())),
    }

    let code = if status.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let response = HealthResponse {
        status: if status.healthy {
            "healthy".to_string()
        } else {
            "unhealthy".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: status
            .checks
            .into_iter()
            .map(|check| HealthCheckView {
                name: check.name,
                healthy: check.healthy,
                message: check.message,
            })
            .collect(),
    };
    (code, Json(response))
}
