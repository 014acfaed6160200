pub mod billing;
pub mod client;
pub mod invoice;
pub mod payment;
pub mod rate;
