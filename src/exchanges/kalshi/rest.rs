use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::params::Params;
use crate::exchanges::kalshi::types::{
    CandlestickParams, CreateOrderRequest, GetEventsParams, GetFillsParams, GetMarketsParams,
    GetOrdersParams, GetPositionsParams, GetSettlementsParams, GetTradesParams,
};
use serde_json::{json, Value};
use tracing::instrument;

const EXCHANGE_URL: &str = "/exchange";
const MARKETS_URL: &str = "/markets";
const EVENTS_URL: &str = "/events";
const SERIES_URL: &str = "/series";
const PORTFOLIO_URL: &str = "/portfolio";

/// Kalshi REST endpoints over a signed `RestClient`
///
/// Every method returns the decoded JSON body as-is.
#[derive(Debug, Clone)]
pub struct KalshiRest<R: RestClient> {
    client: R,
}

/// Reject identifiers that would produce a malformed path
fn require_identifier<'a>(name: &str, value: &'a str) -> Result<&'a str, ExchangeError> {
    if value.is_empty() || value.contains(|c: char| matches!(c, '/' | '?' | '#')) {
        return Err(ExchangeError::InvalidParameters(format!(
            "{} must be a non-empty identifier without '/', '?' or '#': {:?}",
            name, value
        )));
    }
    Ok(value)
}

impl<R: RestClient> KalshiRest<R> {
    pub fn new(client: R) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &R {
        &self.client
    }

    fn market_url(ticker: &str) -> Result<String, ExchangeError> {
        Ok(format!("{}/{}", MARKETS_URL, require_identifier("ticker", ticker)?))
    }

    fn order_url(order_id: &str) -> Result<String, ExchangeError> {
        Ok(format!(
            "{}/orders/{}",
            PORTFOLIO_URL,
            require_identifier("order_id", order_id)?
        ))
    }

    // Exchange

    pub async fn logout(&self) -> Result<Value, ExchangeError> {
        self.client.post("/logout", &json!({})).await
    }

    pub async fn get_exchange_status(&self) -> Result<Value, ExchangeError> {
        self.client
            .get(&format!("{}/status", EXCHANGE_URL), &Params::new())
            .await
    }

    // Market data

    #[instrument(skip(self))]
    pub async fn get_markets(&self, params: &GetMarketsParams) -> Result<Value, ExchangeError> {
        self.client.get(MARKETS_URL, &params.to_params()).await
    }

    #[instrument(skip(self))]
    pub async fn get_events(&self, params: &GetEventsParams) -> Result<Value, ExchangeError> {
        self.client.get(EVENTS_URL, &params.to_params()).await
    }

    pub async fn get_market(&self, ticker: &str) -> Result<Value, ExchangeError> {
        self.client
            .get(&Self::market_url(ticker)?, &Params::new())
            .await
    }

    /// Get one event. An explicit `with_nested_markets` is always sent,
    /// `false` included.
    pub async fn get_event(
        &self,
        event_ticker: &str,
        with_nested_markets: Option<bool>,
    ) -> Result<Value, ExchangeError> {
        let mut path = format!(
            "{}/{}",
            EVENTS_URL,
            require_identifier("event_ticker", event_ticker)?
        );
        if let Some(nested) = with_nested_markets {
            path = format!("{}?with_nested_markets={}", path, nested);
        }
        self.client.get(&path, &Params::new()).await
    }

    pub async fn get_series(&self, series_ticker: &str) -> Result<Value, ExchangeError> {
        let path = format!(
            "{}/{}",
            SERIES_URL,
            require_identifier("series_ticker", series_ticker)?
        );
        self.client.get(&path, &Params::new()).await
    }

    #[instrument(skip(self))]
    pub async fn get_market_candlesticks(
        &self,
        ticker: &str,
        series_ticker: &str,
        params: &CandlestickParams,
    ) -> Result<Value, ExchangeError> {
        let path = format!(
            "{}/{}/markets/{}/candlesticks",
            SERIES_URL,
            require_identifier("series_ticker", series_ticker)?,
            require_identifier("ticker", ticker)?
        );
        self.client.get(&path, &params.to_params()).await
    }

    /// Order book, optionally cut to `depth` price levels per side
    pub async fn get_orderbook(
        &self,
        ticker: &str,
        depth: Option<u32>,
    ) -> Result<Value, ExchangeError> {
        let path = format!("{}/orderbook", Self::market_url(ticker)?);
        self.client
            .get(&path, &Params::new().with("depth", depth))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_trades(&self, params: &GetTradesParams) -> Result<Value, ExchangeError> {
        self.client
            .get(&format!("{}/trades", MARKETS_URL), &params.to_params())
            .await
    }

    // Portfolio

    pub async fn get_balance(&self) -> Result<Value, ExchangeError> {
        self.client
            .get(&format!("{}/balance", PORTFOLIO_URL), &Params::new())
            .await
    }

    #[instrument(skip(self), fields(ticker = %order.ticker, client_order_id = %order.client_order_id))]
    pub async fn create_order(&self, order: &CreateOrderRequest) -> Result<Value, ExchangeError> {
        self.client
            .post(&format!("{}/orders", PORTFOLIO_URL), &order.to_body())
            .await
    }

    pub async fn batch_create_orders(
        &self,
        orders: &[CreateOrderRequest],
    ) -> Result<Value, ExchangeError> {
        let body = json!({
            "orders": orders.iter().map(CreateOrderRequest::to_body).collect::<Vec<_>>()
        });
        self.client
            .post(&format!("{}/orders/batched", PORTFOLIO_URL), &body)
            .await
    }

    pub async fn decrease_order(
        &self,
        order_id: &str,
        reduce_by: u32,
    ) -> Result<Value, ExchangeError> {
        let path = format!("{}/decrease", Self::order_url(order_id)?);
        self.client
            .post(&path, &json!({ "reduce_by": reduce_by }))
            .await
    }

    pub async fn cancel_order(&self, order_id: &str) -> Result<Value, ExchangeError> {
        self.client.delete(&Self::order_url(order_id)?, None).await
    }

    pub async fn batch_cancel_orders(&self, order_ids: &[String]) -> Result<Value, ExchangeError> {
        self.client
            .delete(
                &format!("{}/orders/batched", PORTFOLIO_URL),
                Some(&json!({ "ids": order_ids })),
            )
            .await
    }

    pub async fn get_fills(&self, params: &GetFillsParams) -> Result<Value, ExchangeError> {
        self.client
            .get(&format!("{}/fills", PORTFOLIO_URL), &params.to_params())
            .await
    }

    pub async fn get_orders(&self, params: &GetOrdersParams) -> Result<Value, ExchangeError> {
        self.client
            .get(&format!("{}/orders", PORTFOLIO_URL), &params.to_params())
            .await
    }

    pub async fn get_order(&self, order_id: &str) -> Result<Value, ExchangeError> {
        self.client
            .get(&Self::order_url(order_id)?, &Params::new())
            .await
    }

    pub async fn get_positions(&self, params: &GetPositionsParams) -> Result<Value, ExchangeError> {
        self.client
            .get(&format!("{}/positions", PORTFOLIO_URL), &params.to_params())
            .await
    }

    pub async fn get_portfolio_settlements(
        &self,
        params: &GetSettlementsParams,
    ) -> Result<Value, ExchangeError> {
        self.client
            .get(&format!("{}/settlements", PORTFOLIO_URL), &params.to_params())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_validation() {
        assert!(require_identifier("ticker", "KXBTC-25").is_ok());
        assert!(require_identifier("ticker", "").is_err());
        assert!(require_identifier("ticker", "a/b").is_err());
        assert!(require_identifier("ticker", "a?b=1").is_err());
    }
}
