//! 方法同步操作类型

use serde::{Deserialize, Serialize};

/// 引擎对外暴露的全部操作
///
/// 十二种域间克隆 + 两种数量级联重算。克隆操作按
/// `(源域, 目标域)` 配对命名，与请求体 `type` 字段一一对应。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyncOp {
    ItemToItem,
    ItemToJob,
    ItemToJobMakeMethod,
    ItemToQuoteLine,
    ItemToQuoteMakeMethod,
    JobMakeMethodToItem,
    JobToItem,
    QuoteLineToItem,
    QuoteMakeMethodToItem,
    QuoteLineToJob,
    QuoteLineToQuoteLine,
    QuoteToQuote,
    RecalculateJobMakeMethodRequirements,
    RecalculateJobRequirements,
}

impl SyncOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncOp::ItemToItem => "itemToItem",
            SyncOp::ItemToJob => "itemToJob",
            SyncOp::ItemToJobMakeMethod => "itemToJobMakeMethod",
            SyncOp::ItemToQuoteLine => "itemToQuoteLine",
            SyncOp::ItemToQuoteMakeMethod => "itemToQuoteMakeMethod",
            SyncOp::JobMakeMethodToItem => "jobMakeMethodToItem",
            SyncOp::JobToItem => "jobToItem",
            SyncOp::QuoteLineToItem => "quoteLineToItem",
            SyncOp::QuoteMakeMethodToItem => "quoteMakeMethodToItem",
            SyncOp::QuoteLineToJob => "quoteLineToJob",
            SyncOp::QuoteLineToQuoteLine => "quoteLineToQuoteLine",
            SyncOp::QuoteToQuote => "quoteToQuote",
            SyncOp::RecalculateJobMakeMethodRequirements => {
                "recalculate:jobMakeMethodRequirements"
            }
            SyncOp::RecalculateJobRequirements => "recalculate:jobRequirements",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "itemToItem" => Some(SyncOp::ItemToItem),
            "itemToJob" => Some(SyncOp::ItemToJob),
            "itemToJobMakeMethod" => Some(SyncOp::ItemToJobMakeMethod),
            "itemToQuoteLine" => Some(SyncOp::ItemToQuoteLine),
            "itemToQuoteMakeMethod" => Some(SyncOp::ItemToQuoteMakeMethod),
            "jobMakeMethodToItem" => Some(SyncOp::JobMakeMethodToItem),
            "jobToItem" => Some(SyncOp::JobToItem),
            "quoteLineToItem" => Some(SyncOp::QuoteLineToItem),
            "quoteMakeMethodToItem" => Some(SyncOp::QuoteMakeMethodToItem),
            "quoteLineToJob" => Some(SyncOp::QuoteLineToJob),
            "quoteLineToQuoteLine" => Some(SyncOp::QuoteLineToQuoteLine),
            "quoteToQuote" => Some(SyncOp::QuoteToQuote),
            "recalculate:jobMakeMethodRequirements" => {
                Some(SyncOp::RecalculateJobMakeMethodRequirements)
            }
            "recalculate:jobRequirements" => Some(SyncOp::RecalculateJobRequirements),
            _ => None,
        }
    }

    /// 是否为数量级联重算（不做任何克隆）
    pub fn is_recalculation(&self) -> bool {
        matches!(
            self,
            SyncOp::RecalculateJobMakeMethodRequirements | SyncOp::RecalculateJobRequirements
        )
    }

    /// 是否需要 targetId
    ///
    /// quoteToQuote 自建目标报价单，重算只有单一对象。
    pub fn requires_target(&self) -> bool {
        !self.is_recalculation() && !matches!(self, SyncOp::QuoteToQuote)
    }
}
