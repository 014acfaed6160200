pub mod billing_api_client;
