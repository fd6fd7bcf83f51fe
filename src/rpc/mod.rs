pub mod blocks;
pub mod price;

pub use blocks::{BlockSource, RpcBlockSource};
pub use price::{HttpPriceOracle, PriceOracle};
