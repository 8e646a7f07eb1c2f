use super::decode;
use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::exchanges::kalshi::rest::KalshiRest;
use crate::exchanges::kalshi::types::{
    Balance, FillsPage, GetFillsParams, GetPositionsParams, MarketPosition, PositionsPage,
};

/// Kalshi portfolio queries
pub struct Account<R: RestClient> {
    rest: KalshiRest<R>,
}

impl<R: RestClient + Clone> Account<R> {
    pub fn new(rest: &R) -> Self {
        Self {
            rest: KalshiRest::new(rest.clone()),
        }
    }
}

impl<R: RestClient> Account<R> {
    pub async fn get_balance(&self) -> Result<Balance, ExchangeError> {
        decode(self.rest.get_balance().await?)
    }

    pub async fn get_positions(
        &self,
        params: &GetPositionsParams,
    ) -> Result<PositionsPage, ExchangeError> {
        decode(self.rest.get_positions(params).await?)
    }

    /// Market positions with a non-zero contract count
    pub async fn get_open_positions(&self) -> Result<Vec<MarketPosition>, ExchangeError> {
        let params = GetPositionsParams {
            count_filter: Some("position".to_string()),
            ..Default::default()
        };
        let page = self.get_positions(&params).await?;
        Ok(page
            .market_positions
            .into_iter()
            .filter(|p| p.position != 0)
            .collect())
    }

    pub async fn get_fills(&self, params: &GetFillsParams) -> Result<FillsPage, ExchangeError> {
        decode(self.rest.get_fills(params).await?)
    }

    /// End the session on the exchange side
    pub async fn logout(&self) -> Result<(), ExchangeError> {
        self.rest.logout().await.map(|_| ())
    }
}
