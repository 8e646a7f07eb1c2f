pub mod core;
pub mod exchanges;

pub use core::{
    config::ExchangeConfig,
    errors::ExchangeError,
    kernel::{ReqwestRest, RestClient},
    params::{ParamValue, Params},
};
pub use exchanges::kalshi::{KalshiBuilder, KalshiConnector, KalshiRest, KalshiSigner};
