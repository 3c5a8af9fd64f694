//! MF Method Metrics
//!
//! 业务指标记录

use metrics::{counter, histogram};
use std::time::Instant;

use crate::application::{ListOverrideStats, ProcedureSyncSummary};
use crate::domain::configuration::OverrideStats;
use crate::domain::plan::WriteStats;

// ============================================================================
// 同步 Metrics
// ============================================================================

/// 同步请求计时器
pub struct SyncTimer {
    start: Instant,
    op: String,
}

impl SyncTimer {
    pub fn new(op: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            op: op.into(),
        }
    }

    pub fn finish(self, success: bool) {
        let duration = self.start.elapsed().as_secs_f64() * 1000.0;
        let labels = [("op", self.op), ("success", success.to_string())];

        histogram!("mf_method_sync_duration_ms", &labels).record(duration);
        counter!("mf_method_sync_total", &labels).increment(1);
    }
}

/// 记录一次写计划落库的行数
pub fn record_rows_written(stats: &WriteStats) {
    let tables = [
        ("methods", stats.methods),
        ("materials", stats.materials),
        ("operations", stats.operations),
        ("tools", stats.tools),
        ("parameters", stats.parameters),
        ("attributes", stats.attributes),
        ("sales", stats.sales_rows),
    ];
    for (table, count) in tables {
        if count > 0 {
            let labels = [("table", table.to_string())];
            counter!("mf_method_rows_written_total", &labels).increment(count);
        }
    }

    if stats.deleted_methods > 0 {
        counter!("mf_method_subtree_methods_deleted_total").increment(stats.deleted_methods);
    }
    if stats.updates > 0 {
        counter!("mf_method_rows_updated_total").increment(stats.updates);
    }
}

// ============================================================================
// 配置覆盖 Metrics
// ============================================================================

/// 记录字段覆盖的解析结果
pub fn record_configuration_overrides(stats: &OverrideStats) {
    if stats.applied > 0 {
        let labels = [("result", "applied".to_string())];
        counter!("mf_method_config_overrides_total", &labels).increment(stats.applied);
    }
    if stats.degraded > 0 {
        let labels = [("result", "degraded".to_string())];
        counter!("mf_method_config_overrides_total", &labels).increment(stats.degraded);
    }
}

/// 记录整表覆盖的匹配结果
pub fn record_list_overrides(stats: &ListOverrideStats) {
    if stats.unmatched_entries > 0 {
        counter!("mf_method_list_override_unmatched_total").increment(stats.unmatched_entries);
    }
    if stats.dropped_rows > 0 {
        counter!("mf_method_list_override_dropped_rows_total").increment(stats.dropped_rows);
    }
}

// ============================================================================
// 指导书同步 Metrics
// ============================================================================

/// 记录指导书同步的变更明细
pub fn record_procedure_sync(summary: &ProcedureSyncSummary) {
    let changes = [
        ("updated", summary.attributes_updated),
        ("inserted", summary.attributes_inserted),
        ("deleted", summary.attributes_deleted),
    ];
    for (change, count) in changes {
        if count > 0 {
            let labels = [("change", change.to_string())];
            counter!("mf_method_procedure_attributes_total", &labels).increment(count);
        }
    }

    if summary.parameters_written > 0 {
        counter!("mf_method_procedure_parameters_written_total")
            .increment(summary.parameters_written);
    }
}
