use serde::{Deserialize, Serialize};

/// Inbound payment notification as handed over by the web layer. Every
/// field is optional on the wire; the orchestrator treats absence as a
/// validation failure, not a deserialization error.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct RegisterPaymentCommand {
	pub amount_bs:         Option<f64>,
	pub bank_reference:    Option<String>,
	pub payer_national_id: Option<String>,
}
