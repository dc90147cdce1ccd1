pub mod chain;
pub mod config;
pub mod error;
pub mod fill;
pub mod permit;
pub mod quotes;
pub mod sanity;
#[cfg(test)]
pub mod tests;
pub mod wrapped_asset;
