pub mod params;
pub mod quote;
pub mod source;
