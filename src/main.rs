use kalshix::core::config::ExchangeConfig;
use kalshix::exchanges::kalshi::{GetMarketsParams, KalshiBuilder};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // Reads KALSHI_API_KEY plus KALSHI_PRIVATE_KEY or KALSHI_PRIVATE_KEY_PATH
    let config = ExchangeConfig::from_env("KALSHI")?;
    let kalshi = KalshiBuilder::new().with_config(config).build()?;

    let status = kalshi.market.get_exchange_status().await?;
    println!(
        "Exchange active: {}, trading active: {}",
        status.exchange_active, status.trading_active
    );

    match kalshi.account.get_balance().await {
        Ok(balance) => println!("Balance: ${:.2}", balance.dollars()),
        Err(e) => println!("Error fetching balance: {}", e),
    }

    let params = GetMarketsParams {
        status: Some("open".to_string()),
        limit: Some(5),
        ..Default::default()
    };
    let page = kalshi.market.get_markets(&params).await?;
    println!("Found {} open markets", page.markets.len());
    for market in &page.markets {
        println!("Market: {} ({})", market.ticker, market.status);
    }

    // Example order (commented out for safety)
    /*
    use kalshix::exchanges::kalshi::{Action, CreateOrderRequest, OrderType, Side};
    let order = CreateOrderRequest::new(
        "SOME-MARKET-TICKER",
        "my-client-order-1",
        Side::Yes,
        Action::Buy,
        1,
        OrderType::Limit,
    )
    .with_yes_price(10);
    let placed = kalshi.trading.place_order(&order).await?;
    println!("Order placed: {}", placed.order_id);
    */

    Ok(())
}
