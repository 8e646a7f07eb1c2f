//! Kalshi trading API (v2)
//!
//! Every request is signed with RSA-PSS over `{timestamp}{METHOD}{/trade-api/v2}{path}`
//! and paced by the gateway's rate limiter. `KalshiRest` exposes each endpoint as raw
//! JSON; `KalshiConnector` wraps the common ones in typed responses.

pub mod signer;
pub mod types;

pub mod builder;
pub mod connector;
pub mod rest;

// Re-export main components
pub use builder::{build_connector, KalshiBuilder, KALSHI_REST_URL, KALSHI_REST_URL_DEMO};
pub use connector::{Account, KalshiConnector, MarketData, Trading};
pub use rest::KalshiRest;
pub use signer::KalshiSigner;
pub use types::{
    Action, Balance, CandlestickInterval, CandlestickParams, CreateOrderRequest, ExchangeStatus,
    GetEventsParams, GetFillsParams, GetMarketsParams, GetOrdersParams, GetPositionsParams,
    GetSettlementsParams, GetTradesParams, KalshiEvent, KalshiFill, KalshiMarket, KalshiOrder,
    MarketPosition, OrderType, Orderbook, Side,
};
