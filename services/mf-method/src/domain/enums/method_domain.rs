//! 方法树所属域

use serde::{Deserialize, Serialize};

/// 方法树的三个平行域
///
/// 三个域的表结构同构，仓储实现按域选择表名集合。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodDomain {
    /// 物品主数据方法
    Item,
    /// 作业（车间工单）方法
    Job,
    /// 报价方法
    Quote,
}

impl MethodDomain {
    pub fn as_str(&self) -> &'static str {
        match self {
            MethodDomain::Item => "item",
            MethodDomain::Job => "job",
            MethodDomain::Quote => "quote",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "item" => Some(MethodDomain::Item),
            "job" => Some(MethodDomain::Job),
            "quote" => Some(MethodDomain::Quote),
            _ => None,
        }
    }
}
