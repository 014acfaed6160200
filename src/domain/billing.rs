use async_trait::async_trait;

use crate::domain::client::{Client, LookupQuery};
use crate::domain::invoice::Invoice;
use crate::domain::payment::{PaymentConfirmation, SubmissionOutcome};

/// Read side of the billing platform's subscriber registry. Transport
/// and parse failures are deliberately folded into `None`: the directory
/// contract only distinguishes found from not-found.
#[async_trait]
pub trait ClientRegistry: Send + Sync + 'static {
	async fn lookup(&self, query: &LookupQuery) -> Option<Client>;
}

/// Invoice side of the billing platform: pending invoices per subscriber
/// and the per-invoice payment-registration write.
#[async_trait]
pub trait InvoiceLedger: Send + Sync + 'static {
	async fn fetch_pending(
		&self,
		service_id: i64,
	) -> Result<Vec<Invoice>, Box<dyn std::error::Error + Send>>;

	async fn register_payment(
		&self,
		invoice_id: i64,
		confirmation: &PaymentConfirmation,
	) -> Result<SubmissionOutcome, Box<dyn std::error::Error + Send>>;
}
