//! 作业只读视图

use chrono::NaiveDate;
use common::types::CompanyId;
use serde::{Deserialize, Serialize};

use crate::domain::enums::JobStatus;
use crate::domain::value_objects::{ItemId, JobId};

/// 作业（工单）头
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// 作业 ID
    id: JobId,
    /// 公司 ID
    company_id: CompanyId,
    /// 作业单号
    readable_id: String,
    /// 生产物品 ID
    item_id: ItemId,
    /// 生产数量
    production_quantity: f64,
    /// 状态
    status: JobStatus,
    /// 交付日期
    due_date: Option<NaiveDate>,
}

impl Job {
    /// 从各部分构建（用于从数据库加载）
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: JobId,
        company_id: CompanyId,
        readable_id: String,
        item_id: ItemId,
        production_quantity: f64,
        status: JobStatus,
        due_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id,
            company_id,
            readable_id,
            item_id,
            production_quantity,
            status,
            due_date,
        }
    }

    // ========== Getters ==========

    pub fn id(&self) -> &JobId {
        &self.id
    }

    pub fn company_id(&self) -> &CompanyId {
        &self.company_id
    }

    pub fn readable_id(&self) -> &str {
        &self.readable_id
    }

    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    pub fn production_quantity(&self) -> f64 {
        self.production_quantity
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }
}
