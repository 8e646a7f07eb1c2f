use crate::core::params::{ParamValue, Params};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// Enums shared by requests and responses

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Yes,
    No,
}

impl Side {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Buy,
    Sell,
}

impl Action {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Market,
    Limit,
}

impl OrderType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Market => "market",
            Self::Limit => "limit",
        }
    }
}

impl From<Side> for ParamValue {
    fn from(value: Side) -> Self {
        Self::Str(value.as_str().to_string())
    }
}

impl From<Action> for ParamValue {
    fn from(value: Action) -> Self {
        Self::Str(value.as_str().to_string())
    }
}

impl From<OrderType> for ParamValue {
    fn from(value: OrderType) -> Self {
        Self::Str(value.as_str().to_string())
    }
}

/// Candlestick period length; the exchange accepts one minute, one hour or one day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandlestickInterval {
    Minute,
    Hour,
    Day,
}

impl CandlestickInterval {
    pub const fn minutes(self) -> u32 {
        match self {
            Self::Minute => 1,
            Self::Hour => 60,
            Self::Day => 1440,
        }
    }
}

// Request parameters. Each struct lists the optional filters of one
// endpoint in the order they are sent.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetMarketsParams {
    pub limit: Option<u32>,
    pub cursor: Option<String>,
    pub event_ticker: Option<String>,
    pub series_ticker: Option<String>,
    pub max_close_ts: Option<i64>,
    pub min_close_ts: Option<i64>,
    /// `unopened`, `open`, `closed` or `settled`
    pub status: Option<String>,
    /// Comma separated market tickers
    pub tickers: Option<String>,
}

impl GetMarketsParams {
    pub fn to_params(&self) -> Params {
        Params::new()
            .with("limit", self.limit)
            .with("cursor", self.cursor.as_ref())
            .with("event_ticker", self.event_ticker.as_ref())
            .with("series_ticker", self.series_ticker.as_ref())
            .with("max_close_ts", self.max_close_ts)
            .with("min_close_ts", self.min_close_ts)
            .with("status", self.status.as_ref())
            .with("tickers", self.tickers.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetEventsParams {
    pub limit: Option<u32>,
    pub cursor: Option<String>,
    pub series_ticker: Option<String>,
    pub status: Option<String>,
    pub with_nested_markets: Option<bool>,
}

impl GetEventsParams {
    pub fn to_params(&self) -> Params {
        Params::new()
            .with("limit", self.limit)
            .with("cursor", self.cursor.as_ref())
            .with("series_ticker", self.series_ticker.as_ref())
            .with("status", self.status.as_ref())
            .with("with_nested_markets", self.with_nested_markets)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandlestickParams {
    /// Unix seconds
    pub start_ts: i64,
    /// Unix seconds
    pub end_ts: i64,
    pub period_interval: CandlestickInterval,
}

impl CandlestickParams {
    pub const fn new(start_ts: i64, end_ts: i64, period_interval: CandlestickInterval) -> Self {
        Self {
            start_ts,
            end_ts,
            period_interval,
        }
    }

    pub fn to_params(&self) -> Params {
        Params::new()
            .with("start_ts", self.start_ts)
            .with("end_ts", self.end_ts)
            .with("period_interval", self.period_interval.minutes())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetTradesParams {
    pub ticker: Option<String>,
    pub limit: Option<u32>,
    pub cursor: Option<String>,
    pub max_ts: Option<i64>,
    pub min_ts: Option<i64>,
}

impl GetTradesParams {
    pub fn to_params(&self) -> Params {
        Params::new()
            .with("ticker", self.ticker.as_ref())
            .with("limit", self.limit)
            .with("cursor", self.cursor.as_ref())
            .with("max_ts", self.max_ts)
            .with("min_ts", self.min_ts)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetFillsParams {
    pub ticker: Option<String>,
    pub order_id: Option<String>,
    pub min_ts: Option<i64>,
    pub max_ts: Option<i64>,
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

impl GetFillsParams {
    pub fn to_params(&self) -> Params {
        Params::new()
            .with("ticker", self.ticker.as_ref())
            .with("order_id", self.order_id.as_ref())
            .with("min_ts", self.min_ts)
            .with("max_ts", self.max_ts)
            .with("limit", self.limit)
            .with("cursor", self.cursor.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetOrdersParams {
    pub ticker: Option<String>,
    pub event_ticker: Option<String>,
    pub min_ts: Option<i64>,
    pub max_ts: Option<i64>,
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

impl GetOrdersParams {
    pub fn to_params(&self) -> Params {
        Params::new()
            .with("ticker", self.ticker.as_ref())
            .with("event_ticker", self.event_ticker.as_ref())
            .with("min_ts", self.min_ts)
            .with("max_ts", self.max_ts)
            .with("limit", self.limit)
            .with("cursor", self.cursor.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetPositionsParams {
    pub limit: Option<u32>,
    pub cursor: Option<String>,
    /// `all`, `settled` or `unsettled`; the exchange defaults to `unsettled`
    pub settlement_status: Option<String>,
    pub ticker: Option<String>,
    pub event_ticker: Option<String>,
    /// Comma separated subset of `position`, `total_traded`, `resting_order_count`
    pub count_filter: Option<String>,
}

impl GetPositionsParams {
    pub fn to_params(&self) -> Params {
        Params::new()
            .with("limit", self.limit)
            .with("cursor", self.cursor.as_ref())
            .with("settlement_status", self.settlement_status.as_ref())
            .with("ticker", self.ticker.as_ref())
            .with("event_ticker", self.event_ticker.as_ref())
            .with("count_filter", self.count_filter.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetSettlementsParams {
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

impl GetSettlementsParams {
    pub fn to_params(&self) -> Params {
        Params::new()
            .with("limit", self.limit)
            .with("cursor", self.cursor.as_ref())
    }
}

/// Order creation request
///
/// The body is built under the falsy-omission rule, the same as query
/// strings: a `yes_price` of zero is not sent at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrderRequest {
    pub ticker: String,
    pub client_order_id: String,
    pub side: Side,
    pub action: Action,
    pub count: u32,
    pub order_type: OrderType,
    /// Cents
    pub yes_price: Option<u32>,
    /// Cents
    pub no_price: Option<u32>,
    pub expiration_ts: Option<i64>,
    pub sell_position_floor: Option<u32>,
    /// Cents
    pub buy_max_cost: Option<u64>,
}

impl CreateOrderRequest {
    pub fn new(
        ticker: impl Into<String>,
        client_order_id: impl Into<String>,
        side: Side,
        action: Action,
        count: u32,
        order_type: OrderType,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            client_order_id: client_order_id.into(),
            side,
            action,
            count,
            order_type,
            yes_price: None,
            no_price: None,
            expiration_ts: None,
            sell_position_floor: None,
            buy_max_cost: None,
        }
    }

    pub fn with_yes_price(mut self, cents: u32) -> Self {
        self.yes_price = Some(cents);
        self
    }

    pub fn with_no_price(mut self, cents: u32) -> Self {
        self.no_price = Some(cents);
        self
    }

    pub fn with_expiration_ts(mut self, ts: i64) -> Self {
        self.expiration_ts = Some(ts);
        self
    }

    pub fn with_sell_position_floor(mut self, floor: u32) -> Self {
        self.sell_position_floor = Some(floor);
        self
    }

    pub fn with_buy_max_cost(mut self, cents: u64) -> Self {
        self.buy_max_cost = Some(cents);
        self
    }

    pub fn to_params(&self) -> Params {
        Params::new()
            .with("ticker", &self.ticker)
            .with("client_order_id", &self.client_order_id)
            .with("side", self.side)
            .with("action", self.action)
            .with("count", self.count)
            .with("type", self.order_type)
            .with("yes_price", self.yes_price)
            .with("no_price", self.no_price)
            .with("expiration_ts", self.expiration_ts)
            .with("sell_position_floor", self.sell_position_floor)
            .with("buy_max_cost", self.buy_max_cost)
    }

    pub fn to_body(&self) -> Value {
        self.to_params().to_json_body()
    }
}

// Response types. Fields the exchange may omit or null are optional.

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeStatus {
    pub exchange_active: bool,
    pub trading_active: bool,
}

/// Available balance in cents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub balance: i64,
}

impl Balance {
    pub fn dollars(&self) -> f64 {
        self.balance as f64 / 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KalshiMarket {
    pub ticker: String,
    #[serde(default)]
    pub event_ticker: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: String,
    pub yes_bid: Option<i64>,
    pub yes_ask: Option<i64>,
    pub no_bid: Option<i64>,
    pub no_ask: Option<i64>,
    pub last_price: Option<i64>,
    pub volume: Option<i64>,
    pub open_interest: Option<i64>,
    pub close_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketsPage {
    pub markets: Vec<KalshiMarket>,
    #[serde(default)]
    pub cursor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketResponse {
    pub market: KalshiMarket,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KalshiEvent {
    pub event_ticker: String,
    #[serde(default)]
    pub series_ticker: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub markets: Vec<KalshiMarket>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventResponse {
    pub event: KalshiEvent,
    #[serde(default)]
    pub markets: Vec<KalshiMarket>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventsPage {
    pub events: Vec<KalshiEvent>,
    #[serde(default)]
    pub cursor: String,
}

/// Price fields in cents; null when nothing traded in the period
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandlePrice {
    pub open: Option<i64>,
    pub high: Option<i64>,
    pub low: Option<i64>,
    pub close: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candlestick {
    pub end_period_ts: i64,
    #[serde(default)]
    pub price: CandlePrice,
    #[serde(default)]
    pub volume: i64,
    pub open_interest: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandlesticksResponse {
    #[serde(default)]
    pub ticker: String,
    pub candlesticks: Vec<Candlestick>,
}

/// Resting bids as `[price_cents, quantity]` pairs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Orderbook {
    #[serde(default)]
    pub yes: Option<Vec<[i64; 2]>>,
    #[serde(default)]
    pub no: Option<Vec<[i64; 2]>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderbookResponse {
    pub orderbook: Orderbook,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KalshiOrder {
    pub order_id: String,
    #[serde(default)]
    pub ticker: String,
    #[serde(default)]
    pub client_order_id: String,
    #[serde(default)]
    pub status: String,
    pub side: Option<Side>,
    pub action: Option<Action>,
    #[serde(rename = "type")]
    pub order_type: Option<OrderType>,
    pub yes_price: Option<i64>,
    pub no_price: Option<i64>,
    pub remaining_count: Option<i64>,
    pub created_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResponse {
    pub order: KalshiOrder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrdersPage {
    pub orders: Vec<KalshiOrder>,
    #[serde(default)]
    pub cursor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecreaseOrderResponse {
    pub order: KalshiOrder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelOrderResponse {
    pub order: KalshiOrder,
    pub reduced_by: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KalshiFill {
    #[serde(default)]
    pub trade_id: String,
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub ticker: String,
    pub side: Option<Side>,
    pub action: Option<Action>,
    #[serde(default)]
    pub count: i64,
    pub yes_price: Option<i64>,
    pub no_price: Option<i64>,
    #[serde(default)]
    pub is_taker: bool,
    pub created_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillsPage {
    pub fills: Vec<KalshiFill>,
    #[serde(default)]
    pub cursor: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketPosition {
    pub ticker: String,
    /// Signed contract count: positive is yes, negative is no
    #[serde(default)]
    pub position: i64,
    #[serde(default)]
    pub market_exposure: i64,
    #[serde(default)]
    pub realized_pnl: i64,
    #[serde(default)]
    pub resting_orders_count: i64,
    #[serde(default)]
    pub total_traded: i64,
    #[serde(default)]
    pub fees_paid: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionsPage {
    #[serde(default)]
    pub market_positions: Vec<MarketPosition>,
    #[serde(default)]
    pub event_positions: Vec<Value>,
    #[serde(default)]
    pub cursor: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_markets_params_order_and_omission() {
        let params = GetMarketsParams {
            limit: Some(5),
            status: Some("open".to_string()),
            min_close_ts: Some(0),
            ..Default::default()
        };
        assert_eq!(params.to_params().to_query_string(), "?limit=5&status=open");
    }

    #[test]
    fn test_events_params_drop_false_nested_markets() {
        let params = GetEventsParams {
            with_nested_markets: Some(false),
            series_ticker: Some("KXHIGHNY".to_string()),
            ..Default::default()
        };
        assert_eq!(params.to_params().to_query_string(), "?series_ticker=KXHIGHNY");
    }

    #[test]
    fn test_candlestick_params() {
        let params = CandlestickParams {
            start_ts: 1_700_000_000,
            end_ts: 1_700_086_400,
            period_interval: CandlestickInterval::Hour,
        };
        assert_eq!(
            params.to_params().to_query_string(),
            "?start_ts=1700000000&end_ts=1700086400&period_interval=60"
        );
        assert_eq!(CandlestickInterval::Day.minutes(), 1440);
    }

    #[test]
    fn test_create_order_body_drops_zero_yes_price() {
        let order = CreateOrderRequest::new(
            "KXBTC-25DEC31-T100000",
            "client-1",
            Side::Yes,
            Action::Buy,
            10,
            OrderType::Limit,
        )
        .with_yes_price(0)
        .with_no_price(40);

        let body = order.to_body();
        assert_eq!(
            body,
            json!({
                "ticker": "KXBTC-25DEC31-T100000",
                "client_order_id": "client-1",
                "side": "yes",
                "action": "buy",
                "count": 10,
                "type": "limit",
                "no_price": 40
            })
        );
        assert!(body.get("yes_price").is_none());
    }

    #[test]
    fn test_create_order_body_keeps_field_order() {
        let order = CreateOrderRequest::new("T", "c", Side::No, Action::Sell, 1, OrderType::Market);
        let keys: Vec<_> = order
            .to_params()
            .retained()
            .map(|(k, _)| k.to_string())
            .collect();
        assert_eq!(
            keys,
            ["ticker", "client_order_id", "side", "action", "count", "type"]
        );
    }

    #[test]
    fn test_decode_order_response() {
        let order: OrderResponse = serde_json::from_value(json!({
            "order": {
                "order_id": "abc",
                "ticker": "T",
                "status": "resting",
                "side": "yes",
                "action": "buy",
                "type": "limit",
                "yes_price": 45,
                "no_price": 55
            }
        }))
        .unwrap();
        assert_eq!(order.order.order_type, Some(OrderType::Limit));
        assert_eq!(order.order.side, Some(Side::Yes));
        assert_eq!(order.order.yes_price, Some(45));
    }

    #[test]
    fn test_decode_orderbook_with_null_side() {
        let book: OrderbookResponse =
            serde_json::from_value(json!({"orderbook": {"yes": [[45, 100], [44, 20]], "no": null}}))
                .unwrap();
        assert_eq!(book.orderbook.yes.unwrap()[0], [45, 100]);
        assert!(book.orderbook.no.is_none());
    }

    #[test]
    fn test_balance_dollars() {
        assert!((Balance { balance: 12_345 }.dollars() - 123.45).abs() < f64::EPSILON);
    }
}
