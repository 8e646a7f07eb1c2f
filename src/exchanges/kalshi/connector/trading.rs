use super::decode;
use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::exchanges::kalshi::rest::KalshiRest;
use crate::exchanges::kalshi::types::{
    CancelOrderResponse, CreateOrderRequest, DecreaseOrderResponse, GetOrdersParams, KalshiOrder,
    OrderResponse, OrdersPage,
};
use tracing::{info, instrument};

/// Kalshi order management
pub struct Trading<R: RestClient> {
    rest: KalshiRest<R>,
}

impl<R: RestClient + Clone> Trading<R> {
    pub fn new(rest: &R) -> Self {
        Self {
            rest: KalshiRest::new(rest.clone()),
        }
    }
}

impl<R: RestClient> Trading<R> {
    /// Place an order. Zero-valued prices are not sent, see `CreateOrderRequest`.
    #[instrument(skip(self, order), fields(ticker = %order.ticker))]
    pub async fn place_order(&self, order: &CreateOrderRequest) -> Result<KalshiOrder, ExchangeError> {
        let response: OrderResponse = decode(self.rest.create_order(order).await?)?;
        info!(order_id = %response.order.order_id, status = %response.order.status, "Order placed");
        Ok(response.order)
    }

    pub async fn cancel_order(&self, order_id: &str) -> Result<CancelOrderResponse, ExchangeError> {
        decode(self.rest.cancel_order(order_id).await?)
    }

    pub async fn decrease_order(
        &self,
        order_id: &str,
        reduce_by: u32,
    ) -> Result<KalshiOrder, ExchangeError> {
        let response: DecreaseOrderResponse =
            decode(self.rest.decrease_order(order_id, reduce_by).await?)?;
        Ok(response.order)
    }

    pub async fn get_order(&self, order_id: &str) -> Result<KalshiOrder, ExchangeError> {
        let response: OrderResponse = decode(self.rest.get_order(order_id).await?)?;
        Ok(response.order)
    }

    pub async fn get_orders(&self, params: &GetOrdersParams) -> Result<OrdersPage, ExchangeError> {
        decode(self.rest.get_orders(params).await?)
    }
}
