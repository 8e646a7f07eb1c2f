use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::exchanges::kalshi::rest::KalshiRest;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub mod account;
pub mod market_data;
pub mod trading;

pub use account::Account;
pub use market_data::MarketData;
pub use trading::Trading;

/// Kalshi connector that composes the market, trading and account parts
///
/// All parts share one gateway, so they share its signer and its pacing.
pub struct KalshiConnector<R: RestClient> {
    pub market: MarketData<R>,
    pub trading: Trading<R>,
    pub account: Account<R>,
    rest: KalshiRest<R>,
}

impl<R: RestClient + Clone> KalshiConnector<R> {
    pub fn new(rest: R) -> Self {
        Self {
            market: MarketData::new(&rest),
            trading: Trading::new(&rest),
            account: Account::new(&rest),
            rest: KalshiRest::new(rest),
        }
    }

    /// Raw endpoint access returning untyped JSON
    pub fn rest(&self) -> &KalshiRest<R> {
        &self.rest
    }
}

pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ExchangeError> {
    serde_json::from_value(value).map_err(|e| {
        ExchangeError::DeserializationError(format!("Failed to parse Kalshi response: {}", e))
    })
}
