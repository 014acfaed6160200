use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rapinet_pay::domain::billing::{ClientRegistry, InvoiceLedger};
use rapinet_pay::domain::client::{Client, LookupQuery};
use rapinet_pay::domain::invoice::Invoice;
use rapinet_pay::domain::payment::{PaymentConfirmation, SubmissionOutcome};
use rapinet_pay::domain::rate::{
	ExchangeRate, RateProvider, RateSource, RateStage,
};
use serde_json::json;

/// Scripted rate-chain stage that counts how often it was consulted.
pub struct FakeStage {
	pub source: RateSource,
	pub value:  Option<f64>,
	pub calls:  Arc<AtomicUsize>,
}

impl FakeStage {
	pub fn new(source: RateSource, value: Option<f64>) -> Self {
		Self {
			source,
			value,
			calls: Arc::new(AtomicUsize::new(0)),
		}
	}

	pub fn call_count(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl RateStage for FakeStage {
	fn source(&self) -> RateSource {
		self.source
	}

	async fn fetch(&self) -> Option<f64> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		self.value
	}
}

pub struct FixedRateProvider {
	pub rate:  f64,
	pub calls: Arc<AtomicUsize>,
}

impl FixedRateProvider {
	pub fn new(rate: f64) -> Self {
		Self {
			rate,
			calls: Arc::new(AtomicUsize::new(0)),
		}
	}
}

#[async_trait]
impl RateProvider for FixedRateProvider {
	async fn current_rate(&self) -> ExchangeRate {
		self.calls.fetch_add(1, Ordering::SeqCst);
		ExchangeRate::new(self.rate, RateSource::PrimaryApi)
	}
}

pub struct FakeRegistry {
	pub client: Option<Client>,
	pub calls:  Arc<AtomicUsize>,
}

impl FakeRegistry {
	pub fn with_client(client: Client) -> Self {
		Self {
			client: Some(client),
			calls:  Arc::new(AtomicUsize::new(0)),
		}
	}

	pub fn empty() -> Self {
		Self {
			client: None,
			calls:  Arc::new(AtomicUsize::new(0)),
		}
	}
}

#[async_trait]
impl ClientRegistry for FakeRegistry {
	async fn lookup(&self, _query: &LookupQuery) -> Option<Client> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		self.client.clone()
	}
}

/// Scripted billing-platform ledger: `invoices: None` simulates a failed
/// invoice-list fetch, and every submission is recorded for inspection.
pub struct FakeLedger {
	pub invoices:     Option<Vec<Invoice>>,
	pub outcome:      SubmissionOutcome,
	pub submit_fails: bool,
	pub fetch_calls:  Arc<AtomicUsize>,
	pub submissions:  Arc<Mutex<Vec<(i64, PaymentConfirmation)>>>,
}

impl FakeLedger {
	pub fn with_invoices(invoices: Vec<Invoice>) -> Self {
		Self {
			invoices:     Some(invoices),
			outcome:      SubmissionOutcome::Accepted(json!({"status": "ok"})),
			submit_fails: false,
			fetch_calls:  Arc::new(AtomicUsize::new(0)),
			submissions:  Arc::new(Mutex::new(Vec::new())),
		}
	}

	pub fn failing() -> Self {
		Self {
			invoices: None,
			..Self::with_invoices(vec![])
		}
	}

	pub fn rejecting(status: u16, body: &str) -> Self {
		Self {
			outcome: SubmissionOutcome::Rejected {
				status,
				body: body.to_string(),
			},
			..Self::with_invoices(vec![Invoice {
				id:        Some(1),
				total_usd: 10.0,
			}])
		}
	}

	pub fn recorded_submissions(&self) -> Vec<(i64, PaymentConfirmation)> {
		self.submissions.lock().unwrap().clone()
	}
}

#[async_trait]
impl InvoiceLedger for FakeLedger {
	async fn fetch_pending(
		&self,
		_service_id: i64,
	) -> Result<Vec<Invoice>, Box<dyn Error + Send>> {
		self.fetch_calls.fetch_add(1, Ordering::SeqCst);
		match &self.invoices {
			Some(invoices) => Ok(invoices.clone()),
			None => Err(Box::new(std::io::Error::other("invoice fetch failed"))),
		}
	}

	async fn register_payment(
		&self,
		invoice_id: i64,
		confirmation: &PaymentConfirmation,
	) -> Result<SubmissionOutcome, Box<dyn Error + Send>> {
		self.submissions
			.lock()
			.unwrap()
			.push((invoice_id, confirmation.clone()));
		if self.submit_fails {
			return Err(Box::new(std::io::Error::other("connection reset")));
		}
		Ok(self.outcome.clone())
	}
}

pub fn test_client() -> Client {
	Client {
		service_id:  281,
		full_name:   "María Pérez".to_string(),
		national_id: "V-123".to_string(),
	}
}
