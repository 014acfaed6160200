use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, HttpServer, web};
use log::info;
use reqwest::Client as HttpClient;

pub mod adapters;
pub mod domain;
pub mod infrastructure;
pub mod use_cases;

use crate::adapters::web::account_handler::consulta;
use crate::adapters::web::webhook_handler::webhook;
use crate::domain::billing::{ClientRegistry, InvoiceLedger};
use crate::domain::rate::{RateProvider, RateStage};
use crate::infrastructure::billing::billing_api_client::BillingApiClient;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::rates::central_bank_scraper::CentralBankScraper;
use crate::infrastructure::rates::primary_rate_api::PrimaryRateApi;
use crate::use_cases::get_balance::GetBalanceUseCase;
use crate::use_cases::lookup_client::LookupClientUseCase;
use crate::use_cases::register_payment::RegisterPaymentUseCase;
use crate::use_cases::resolve_rate::ResolveRateUseCase;

/// Fixed timeout for every outbound call, in seconds.
const OUTBOUND_TIMEOUT_SECS: u64 = 10;

pub async fn run(config: Arc<Config>) -> std::io::Result<()> {
	env_logger::init();

	let http_client = HttpClient::builder()
		.timeout(Duration::from_secs(OUTBOUND_TIMEOUT_SECS))
		.build()
		.expect("Failed to build HTTP client");

	let billing = Arc::new(BillingApiClient::new(
		http_client.clone(),
		config.billing_api_url.clone(),
		config.billing_api_key.clone(),
	));
	let registry: Arc<dyn ClientRegistry> = billing.clone();
	let ledger: Arc<dyn InvoiceLedger> = billing;

	let stages: Vec<Arc<dyn RateStage>> = vec![
		Arc::new(PrimaryRateApi::new(
			http_client.clone(),
			config.rate_api_url.clone(),
		)),
		Arc::new(CentralBankScraper::new(
			config.central_bank_url.clone(),
			Duration::from_secs(OUTBOUND_TIMEOUT_SECS),
		)),
	];
	let resolve_rate = ResolveRateUseCase::new(stages);
	let rates: Arc<dyn RateProvider> = Arc::new(resolve_rate.clone());

	let lookup_client = LookupClientUseCase::new(registry.clone());
	let get_balance = GetBalanceUseCase::new(ledger.clone(), rates.clone());
	let register_payment =
		RegisterPaymentUseCase::new(rates, registry, get_balance.clone(), ledger);

	let port = config.server_port;
	info!("Starting Actix-Web server on 0.0.0.0:{port}...");
	HttpServer::new(move || {
		App::new()
			.app_data(web::Data::new(config.as_ref().clone()))
			.app_data(web::Data::new(resolve_rate.clone()))
			.app_data(web::Data::new(lookup_client.clone()))
			.app_data(web::Data::new(get_balance.clone()))
			.app_data(web::Data::new(register_payment.clone()))
			.service(webhook)
			.service(consulta)
	})
	.bind(("0.0.0.0", port))?
	.run()
	.await
}
