use serde::{Deserialize, Serialize};

/// The record posted to the billing platform to settle an invoice. The
/// gateway adds the fixed action codes and the server-side timestamp.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PaymentConfirmation {
	pub bank_reference: String,
	pub amount_usd:     f64,
}

/// Outcome of a payment submission that reached the billing platform.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
	/// HTTP 200/201 with the platform's acknowledgment payload.
	Accepted(serde_json::Value),
	/// Any other status, kept verbatim for diagnostics.
	Rejected { status: u16, body: String },
}
