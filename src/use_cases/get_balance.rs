use std::error::Error;
use std::sync::Arc;

use log::info;

use crate::domain::billing::InvoiceLedger;
use crate::domain::invoice::BalanceSummary;
use crate::domain::rate::RateProvider;

/// Aggregates a subscriber's pending invoices into a USD total and its
/// bolívar equivalent at the current rate. Fails only when the
/// invoice-list fetch itself fails; an empty list is a zero summary.
#[derive(Clone)]
pub struct GetBalanceUseCase {
	ledger: Arc<dyn InvoiceLedger>,
	rates:  Arc<dyn RateProvider>,
}

impl GetBalanceUseCase {
	pub fn new(ledger: Arc<dyn InvoiceLedger>, rates: Arc<dyn RateProvider>) -> Self {
		Self { ledger, rates }
	}

	pub async fn execute(
		&self,
		service_id: i64,
	) -> Result<BalanceSummary, Box<dyn Error + Send>> {
		let invoices = self.ledger.fetch_pending(service_id).await?;
		let rate = self.rates.current_rate().await;

		let summary = BalanceSummary::from_invoices(invoices, &rate);
		info!(
			"Service {service_id}: {} pending invoice(s), {} USD / {} Bs",
			summary.invoices.len(),
			summary.total_usd,
			summary.total_bs
		);

		Ok(summary)
	}
}
