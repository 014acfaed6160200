pub mod billing;
pub mod config;
pub mod rates;
