pub mod addresses;
pub mod chains;
pub mod tokens;
