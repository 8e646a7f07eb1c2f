pub mod kalshi;
