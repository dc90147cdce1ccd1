pub mod client;
pub mod transport;
pub mod url;
pub mod wrap;
