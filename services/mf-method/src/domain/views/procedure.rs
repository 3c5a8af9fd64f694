//! 作业指导书只读视图
//!
//! 可复用的工序模板：指导内容加有序的参数/属性模板。
//! 同步流程按模板差分目标工序，模板本身从不被改写。

use common::types::CompanyId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{ProcedureId, ProcessId};

/// 参数模板
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcedureParameter {
    id: Uuid,
    /// 参数键
    key: String,
    /// 参数值
    value: String,
    /// 模板内排序
    sort_order: f64,
}

impl ProcedureParameter {
    pub fn from_parts(id: Uuid, key: String, value: String, sort_order: f64) -> Self {
        Self {
            id,
            key,
            value,
            sort_order,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn sort_order(&self) -> f64 {
        self.sort_order
    }
}

/// 属性模板
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcedureAttribute {
    id: Uuid,
    /// 属性名
    name: String,
    /// 属性类型
    attribute_type: String,
    /// 下限
    min_value: Option<f64>,
    /// 上限
    max_value: Option<f64>,
    /// 描述
    description: Option<String>,
    /// 模板内排序
    sort_order: f64,
}

impl ProcedureAttribute {
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: Uuid,
        name: String,
        attribute_type: String,
        min_value: Option<f64>,
        max_value: Option<f64>,
        description: Option<String>,
        sort_order: f64,
    ) -> Self {
        Self {
            id,
            name,
            attribute_type,
            min_value,
            max_value,
            description,
            sort_order,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute_type(&self) -> &str {
        &self.attribute_type
    }

    pub fn min_value(&self) -> Option<f64> {
        self.min_value
    }

    pub fn max_value(&self) -> Option<f64> {
        self.max_value
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn sort_order(&self) -> f64 {
        self.sort_order
    }

    /// 差分匹配键
    pub fn match_key(&self) -> (&str, &str) {
        (&self.name, &self.attribute_type)
    }
}

/// 作业指导书
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Procedure {
    /// 指导书 ID
    id: ProcedureId,
    /// 公司 ID
    company_id: CompanyId,
    /// 名称
    name: String,
    /// 版本号
    version: i32,
    /// 适用工艺过程 ID
    process_id: ProcessId,
    /// 指导内容
    content: Option<serde_json::Value>,
    /// 是否启用
    active: bool,
    /// 参数模板（有序）
    parameters: Vec<ProcedureParameter>,
    /// 属性模板（有序）
    attributes: Vec<ProcedureAttribute>,
}

impl Procedure {
    /// 从各部分构建（用于从数据库加载）
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: ProcedureId,
        company_id: CompanyId,
        name: String,
        version: i32,
        process_id: ProcessId,
        content: Option<serde_json::Value>,
        active: bool,
        parameters: Vec<ProcedureParameter>,
        attributes: Vec<ProcedureAttribute>,
    ) -> Self {
        Self {
            id,
            company_id,
            name,
            version,
            process_id,
            content,
            active,
            parameters,
            attributes,
        }
    }

    // ========== Getters ==========

    pub fn id(&self) -> &ProcedureId {
        &self.id
    }

    pub fn company_id(&self) -> &CompanyId {
        &self.company_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn process_id(&self) -> &ProcessId {
        &self.process_id
    }

    pub fn content(&self) -> Option<&serde_json::Value> {
        self.content.as_ref()
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn parameters(&self) -> &[ProcedureParameter] {
        &self.parameters
    }

    pub fn attributes(&self) -> &[ProcedureAttribute] {
        &self.attributes
    }
}
