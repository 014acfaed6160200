pub mod account_handler;
pub mod errors;
pub mod schema;
pub mod webhook_handler;
