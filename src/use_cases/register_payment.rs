use std::sync::Arc;

use derive_more::derive::{Display, Error};
use log::{error, info, warn};
use serde_json::json;

use crate::domain::billing::{ClientRegistry, InvoiceLedger};
use crate::domain::client::LookupQuery;
use crate::domain::payment::{PaymentConfirmation, SubmissionOutcome};
use crate::domain::rate::RateProvider;
use crate::use_cases::dto::RegisterPaymentCommand;
use crate::use_cases::get_balance::GetBalanceUseCase;

#[derive(Debug, Clone, PartialEq, Display, Error)]
pub enum PaymentError {
	#[display("Payment notification is missing mandatory fields.")]
	IncompleteInput,
	#[display("Could not convert the notified amount with the current rate.")]
	ConversionError,
	#[display("No subscriber matches the notified payer.")]
	ClientNotFound,
	#[display("Could not fetch the subscriber's pending balance.")]
	BalanceUnavailable,
	#[display("The subscriber has no pending invoice to settle.")]
	NoPendingInvoice,
	#[display("The pending invoice carries no usable identifier.")]
	InvoiceIdMissing,
	#[display("The billing platform rejected the payment (status {status}).")]
	UpstreamRejected { status: u16, detail: String },
	#[display("The payment submission could not be delivered: {detail}")]
	SubmissionFailed { detail: String },
}

impl PaymentError {
	pub fn code(&self) -> &'static str {
		match self {
			PaymentError::IncompleteInput => "incomplete-input",
			PaymentError::ConversionError => "conversion-error",
			PaymentError::ClientNotFound => "client-not-found",
			PaymentError::BalanceUnavailable => "balance-unavailable",
			PaymentError::NoPendingInvoice => "no-pending-invoice",
			PaymentError::InvoiceIdMissing => "invoice-id-missing",
			PaymentError::UpstreamRejected { .. } => "upstream-rejected",
			PaymentError::SubmissionFailed { .. } => "submission-failed",
		}
	}

	/// Structured descriptor embedded in the webhook response body.
	pub fn body(&self) -> serde_json::Value {
		let mut body = json!({
			"error": self.code(),
			"message": self.to_string(),
		});
		if let PaymentError::UpstreamRejected { status, detail } = self {
			body["status"] = json!(status);
			body["detail"] = json!(detail);
		}
		body
	}
}

pub type PaymentResult = Result<serde_json::Value, PaymentError>;

/// The payment-orchestration pipeline: validate, convert, resolve the
/// payer, resolve the invoice, submit. Strictly sequential, no retries,
/// terminal on the first failing step.
#[derive(Clone)]
pub struct RegisterPaymentUseCase {
	rates:    Arc<dyn RateProvider>,
	registry: Arc<dyn ClientRegistry>,
	balance:  GetBalanceUseCase,
	ledger:   Arc<dyn InvoiceLedger>,
}

impl RegisterPaymentUseCase {
	pub fn new(
		rates: Arc<dyn RateProvider>,
		registry: Arc<dyn ClientRegistry>,
		balance: GetBalanceUseCase,
		ledger: Arc<dyn InvoiceLedger>,
	) -> Self {
		Self {
			rates,
			registry,
			balance,
			ledger,
		}
	}

	pub async fn execute(&self, command: RegisterPaymentCommand) -> PaymentResult {
		let (amount_bs, bank_reference, payer_national_id) =
			validate(&command).ok_or(PaymentError::IncompleteInput)?;

		let rate = self.rates.current_rate().await;
		// Unreachable given the resolver's fallback guarantee, but a zero
		// rate would otherwise produce an infinite USD amount.
		if rate.value == 0.0 {
			return Err(PaymentError::ConversionError);
		}
		let amount_usd = amount_bs / rate.value;
		info!(
			"Notification {bank_reference}: {amount_bs} Bs = {amount_usd} USD \
			 at rate {} ({})",
			rate.value, rate.source
		);

		let client = self
			.registry
			.lookup(&LookupQuery::by_national_id(&payer_national_id))
			.await
			.ok_or(PaymentError::ClientNotFound)?;

		let summary = self
			.balance
			.execute(client.service_id)
			.await
			.map_err(|e| {
				error!(
					"Balance fetch failed for service {}: {e}",
					client.service_id
				);
				PaymentError::BalanceUnavailable
			})?;

		// Settlement targets the first invoice in the order the platform
		// returned it. The upstream ordering is not documented as stable.
		let invoice = summary
			.first_pending()
			.ok_or(PaymentError::NoPendingInvoice)?;
		let invoice_id = invoice.id.ok_or(PaymentError::InvoiceIdMissing)?;

		let confirmation = PaymentConfirmation {
			bank_reference: bank_reference.clone(),
			amount_usd,
		};

		match self.ledger.register_payment(invoice_id, &confirmation).await {
			Ok(SubmissionOutcome::Accepted(ack)) => {
				info!(
					"Payment {bank_reference} registered against invoice \
					 {invoice_id}"
				);
				Ok(ack)
			}
			Ok(SubmissionOutcome::Rejected { status, body }) => {
				warn!(
					"Billing platform rejected payment {bank_reference} with \
					 status {status}"
				);
				Err(PaymentError::UpstreamRejected {
					status,
					detail: body,
				})
			}
			Err(e) => {
				error!("Payment submission failed for {bank_reference}: {e}");
				Err(PaymentError::SubmissionFailed {
					detail: e.to_string(),
				})
			}
		}
	}
}

/// All three fields mandatory and non-empty; a zero amount counts as
/// missing, matching the platform's historical behavior.
fn validate(command: &RegisterPaymentCommand) -> Option<(f64, String, String)> {
	let amount_bs = command.amount_bs.filter(|a| *a != 0.0)?;
	let bank_reference = command
		.bank_reference
		.as_deref()
		.filter(|r| !r.trim().is_empty())?;
	let payer_national_id = command
		.payer_national_id
		.as_deref()
		.filter(|c| !c.trim().is_empty())?;

	Some((
		amount_bs,
		bank_reference.to_string(),
		payer_national_id.to_string(),
	))
}
