use serde::{Deserialize, Serialize};

/// Inbound bank webhook payload. Fields stay optional at the wire level:
/// a notification missing one of them is answered with a structured
/// validation error, not a deserialization failure.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PaymentNotification {
	#[serde(rename = "amountBs")]
	pub amount_bs:         Option<f64>,
	#[serde(rename = "bankReference")]
	pub bank_reference:    Option<String>,
	#[serde(rename = "payerNationalId")]
	pub payer_national_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AccountQuery {
	pub cedula:     Option<String>,
	pub referencia: Option<String>,
}

/// Flattened `/consulta` response: subscriber identity plus the current
/// rate and outstanding totals.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AccountBalanceResponse {
	pub client:      String,
	#[serde(rename = "nationalId")]
	pub national_id: String,
	#[serde(rename = "serviceId")]
	pub service_id:  i64,
	pub rate:        f64,
	#[serde(rename = "pendingUsd")]
	pub pending_usd: f64,
	#[serde(rename = "totalBs")]
	pub total_bs:    f64,
}
