//! 报价仓储接口
//!
//! 报价单头与条款行只在整单复制时成批读出，方法树本身
//! 走方法仓储。

use async_trait::async_trait;
use common::types::CompanyId;
use errors::AppResult;

use crate::domain::entities::{Quote, QuoteLine, QuoteLinePrice, QuotePayment, QuoteShipment};
use crate::domain::value_objects::{QuoteId, QuoteLineId};

/// 报价仓储接口
#[async_trait]
pub trait QuoteRepository: Send + Sync {
    /// 按 ID 查找报价单
    async fn find_quote(
        &self,
        quote_id: &QuoteId,
        company_id: &CompanyId,
    ) -> AppResult<Option<Quote>>;

    /// 按复合键查找报价行
    async fn find_line(
        &self,
        quote_id: &QuoteId,
        quote_line_id: &QuoteLineId,
        company_id: &CompanyId,
    ) -> AppResult<Option<QuoteLine>>;

    /// 报价单的全部行
    async fn lines_for_quote(
        &self,
        quote_id: &QuoteId,
        company_id: &CompanyId,
    ) -> AppResult<Vec<QuoteLine>>;

    /// 报价单的付款条款
    async fn payments_for_quote(
        &self,
        quote_id: &QuoteId,
        company_id: &CompanyId,
    ) -> AppResult<Vec<QuotePayment>>;

    /// 报价单的发运条款
    async fn shipments_for_quote(
        &self,
        quote_id: &QuoteId,
        company_id: &CompanyId,
    ) -> AppResult<Vec<QuoteShipment>>;

    /// 报价单全部行的阶梯价格
    async fn prices_for_quote(
        &self,
        quote_id: &QuoteId,
        company_id: &CompanyId,
    ) -> AppResult<Vec<QuoteLinePrice>>;
}
