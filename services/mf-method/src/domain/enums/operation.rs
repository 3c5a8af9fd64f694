//! 工序相关枚举

use serde::{Deserialize, Serialize};

/// 工序类别：厂内加工或外协加工
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OperationKind {
    /// 未指定
    #[default]
    Unspecified,
    /// 厂内
    Inside,
    /// 外协
    Outside,
}

impl OperationKind {
    pub fn is_outside(&self) -> bool {
        matches!(self, OperationKind::Outside)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Unspecified => "Unspecified",
            OperationKind::Inside => "Inside",
            OperationKind::Outside => "Outside",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "Inside" => OperationKind::Inside,
            "Outside" => OperationKind::Outside,
            _ => OperationKind::Unspecified,
        }
    }
}

/// 工序衔接方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OperationOrder {
    /// 顺序执行
    #[default]
    AfterPrevious,
    /// 与上道工序并行
    WithPrevious,
}

impl OperationOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationOrder::AfterPrevious => "After Previous",
            OperationOrder::WithPrevious => "With Previous",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "With Previous" => OperationOrder::WithPrevious,
            _ => OperationOrder::AfterPrevious,
        }
    }
}

/// 工时计量单位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TimeUnit {
    /// 总小时
    #[default]
    TotalHours,
    /// 每件小时
    HoursPerPiece,
    /// 总分钟
    TotalMinutes,
    /// 每件分钟
    MinutesPerPiece,
}

impl TimeUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::TotalHours => "Total Hours",
            TimeUnit::HoursPerPiece => "Hours/Piece",
            TimeUnit::TotalMinutes => "Total Minutes",
            TimeUnit::MinutesPerPiece => "Minutes/Piece",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "Hours/Piece" => TimeUnit::HoursPerPiece,
            "Total Minutes" => TimeUnit::TotalMinutes,
            "Minutes/Piece" => TimeUnit::MinutesPerPiece,
            _ => TimeUnit::TotalHours,
        }
    }
}
