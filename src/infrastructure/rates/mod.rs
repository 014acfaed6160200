pub mod central_bank_scraper;
pub mod primary_rate_api;
