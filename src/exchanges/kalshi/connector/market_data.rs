use super::decode;
use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::exchanges::kalshi::rest::KalshiRest;
use crate::exchanges::kalshi::types::{
    CandlestickParams, Candlestick, CandlesticksResponse, EventResponse, EventsPage,
    ExchangeStatus, GetEventsParams, GetMarketsParams, KalshiMarket, MarketResponse, MarketsPage,
    Orderbook, OrderbookResponse,
};
use tracing::{debug, instrument};

/// Kalshi market data implementation
pub struct MarketData<R: RestClient> {
    rest: KalshiRest<R>,
}

impl<R: RestClient + Clone> MarketData<R> {
    pub fn new(rest: &R) -> Self {
        Self {
            rest: KalshiRest::new(rest.clone()),
        }
    }
}

impl<R: RestClient> MarketData<R> {
    pub async fn get_exchange_status(&self) -> Result<ExchangeStatus, ExchangeError> {
        decode(self.rest.get_exchange_status().await?)
    }

    #[instrument(skip(self))]
    pub async fn get_markets(&self, params: &GetMarketsParams) -> Result<MarketsPage, ExchangeError> {
        let page: MarketsPage = decode(self.rest.get_markets(params).await?)?;
        debug!(count = page.markets.len(), "Fetched markets");
        Ok(page)
    }

    pub async fn get_market(&self, ticker: &str) -> Result<KalshiMarket, ExchangeError> {
        let response: MarketResponse = decode(self.rest.get_market(ticker).await?)?;
        Ok(response.market)
    }

    pub async fn get_events(&self, params: &GetEventsParams) -> Result<EventsPage, ExchangeError> {
        decode(self.rest.get_events(params).await?)
    }

    pub async fn get_event(
        &self,
        event_ticker: &str,
        with_nested_markets: Option<bool>,
    ) -> Result<EventResponse, ExchangeError> {
        decode(self.rest.get_event(event_ticker, with_nested_markets).await?)
    }

    /// Candlesticks for one market; the exchange needs the series ticker too
    pub async fn get_market_candlesticks(
        &self,
        ticker: &str,
        series_ticker: &str,
        params: &CandlestickParams,
    ) -> Result<Vec<Candlestick>, ExchangeError> {
        let response: CandlesticksResponse = decode(
            self.rest
                .get_market_candlesticks(ticker, series_ticker, params)
                .await?,
        )?;
        Ok(response.candlesticks)
    }

    pub async fn get_orderbook(
        &self,
        ticker: &str,
        depth: Option<u32>,
    ) -> Result<Orderbook, ExchangeError> {
        let response: OrderbookResponse = decode(self.rest.get_orderbook(ticker, depth).await?)?;
        Ok(response.orderbook)
    }
}
