//! 单据状态枚举

use serde::{Deserialize, Serialize};

/// 作业状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum JobStatus {
    /// 未指定
    #[default]
    Unspecified,
    /// 草稿
    Draft,
    /// 已排程
    Ready,
    /// 进行中
    InProgress,
    /// 已完成
    Completed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Unspecified => "Unspecified",
            JobStatus::Draft => "Draft",
            JobStatus::Ready => "Ready",
            JobStatus::InProgress => "InProgress",
            JobStatus::Completed => "Completed",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "Draft" => JobStatus::Draft,
            "Ready" => JobStatus::Ready,
            "InProgress" => JobStatus::InProgress,
            "Completed" => JobStatus::Completed,
            _ => JobStatus::Unspecified,
        }
    }
}

/// 报价单状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum QuoteStatus {
    /// 未指定
    #[default]
    Unspecified,
    /// 草稿
    Draft,
    /// 已发送
    Sent,
    /// 已成单
    Ordered,
    /// 已过期
    Expired,
    /// 已丢单
    Lost,
}

impl QuoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::Unspecified => "Unspecified",
            QuoteStatus::Draft => "Draft",
            QuoteStatus::Sent => "Sent",
            QuoteStatus::Ordered => "Ordered",
            QuoteStatus::Expired => "Expired",
            QuoteStatus::Lost => "Lost",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "Draft" => QuoteStatus::Draft,
            "Sent" => QuoteStatus::Sent,
            "Ordered" => QuoteStatus::Ordered,
            "Expired" => QuoteStatus::Expired,
            "Lost" => QuoteStatus::Lost,
            _ => QuoteStatus::Unspecified,
        }
    }
}
