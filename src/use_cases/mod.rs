pub mod dto;
pub mod get_balance;
pub mod lookup_client;
pub mod register_payment;
pub mod resolve_rate;
