use std::error::Error;

use async_trait::async_trait;
use log::{error, info, warn};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::macros::format_description;

use crate::domain::billing::{ClientRegistry, InvoiceLedger};
use crate::domain::client::{Client, LookupQuery};
use crate::domain::invoice::Invoice;
use crate::domain::payment::{PaymentConfirmation, SubmissionOutcome};

/// Action code understood by the billing platform's payment endpoint.
const ACTION_REGISTER: u8 = 1;
/// Payment-method code for bank-transfer settlements.
const METHOD_BANK_TRANSFER: u8 = 0;

/// HTTP gateway to the subscriber-management platform. Covers the three
/// collaborator endpoints: registry read, pending-invoice read and the
/// per-invoice payment-registration write. Every call authenticates with
/// the platform's static `Api-Key` authorization scheme.
#[derive(Clone)]
pub struct BillingApiClient {
	http:     HttpClient,
	base_url: String,
	api_key:  String,
}

#[derive(Debug, Deserialize)]
struct ClientPage {
	#[serde(default)]
	count:   u32,
	#[serde(default)]
	results: Vec<ClientRecord>,
}

#[derive(Debug, Deserialize)]
struct ClientRecord {
	id_servicio: Option<i64>,
	#[serde(default)]
	nombre:      Option<String>,
	#[serde(default)]
	apellidos:   Option<String>,
	#[serde(default)]
	cedula:      Option<String>,
}

#[derive(Debug, Deserialize)]
struct BalanceResponse {
	#[serde(default)]
	facturas: Vec<InvoiceRecord>,
}

#[derive(Debug, Deserialize)]
struct InvoiceRecord {
	id:         Option<i64>,
	id_factura: Option<i64>,
	#[serde(default)]
	total:      serde_json::Value,
}

#[derive(Debug, Serialize)]
struct RegisterPaymentBody {
	referencia:    String,
	fecha_pago:    String,
	total_cobrado: f64,
	accion:        u8,
	forma_pago:    u8,
}

impl BillingApiClient {
	pub fn new(http: HttpClient, base_url: String, api_key: String) -> Self {
		Self {
			http,
			base_url: base_url.trim_end_matches('/').to_string(),
			api_key,
		}
	}

	fn auth_header(&self) -> String {
		format!("Api-Key {}", self.api_key)
	}
}

#[async_trait]
impl ClientRegistry for BillingApiClient {
	async fn lookup(&self, query: &LookupQuery) -> Option<Client> {
		let url = format!("{}/clientes/", self.base_url);
		let params: Vec<(&str, &str)> = match query {
			LookupQuery {
				national_id: Some(id),
				..
			} => vec![("cedula", id.as_str())],
			LookupQuery {
				partial_reference: Some(reference),
				..
			} => vec![("cedula__contains", reference.as_str())],
			_ => return None,
		};

		let resp = match self
			.http
			.get(&url)
			.header("Authorization", self.auth_header())
			.query(&params)
			.send()
			.await
		{
			Ok(resp) => resp,
			Err(e) => {
				error!("Registry lookup failed: {e}");
				return None;
			}
		};

		if !resp.status().is_success() {
			error!("Registry lookup returned status {}", resp.status());
			return None;
		}

		let page = match resp.json::<ClientPage>().await {
			Ok(page) => page,
			Err(e) => {
				error!("Failed to parse registry response: {e}");
				return None;
			}
		};

		if page.count == 0 {
			info!("Registry returned no match for the lookup query");
			return None;
		}

		// First record wins; the registry's tie-break order for multiple
		// matches is not specified.
		page.results.into_iter().next().and_then(into_client)
	}
}

#[async_trait]
impl InvoiceLedger for BillingApiClient {
	async fn fetch_pending(
		&self,
		service_id: i64,
	) -> Result<Vec<Invoice>, Box<dyn Error + Send>> {
		let url = format!("{}/clientes/{service_id}/saldo/", self.base_url);

		let resp = self
			.http
			.get(&url)
			.header("Authorization", self.auth_header())
			.send()
			.await
			.map_err(|e| Box::new(e) as Box<dyn Error + Send>)?;

		if !resp.status().is_success() {
			let status = resp.status();
			error!("Invoice fetch for service {service_id} returned {status}");
			return Err(Box::new(std::io::Error::other(format!(
				"invoice fetch returned status {status}"
			))));
		}

		let balance = resp
			.json::<BalanceResponse>()
			.await
			.map_err(|e| Box::new(e) as Box<dyn Error + Send>)?;

		Ok(balance.facturas.into_iter().map(into_invoice).collect())
	}

	async fn register_payment(
		&self,
		invoice_id: i64,
		confirmation: &PaymentConfirmation,
	) -> Result<SubmissionOutcome, Box<dyn Error + Send>> {
		let url =
			format!("{}/facturas/{invoice_id}/registrar-pago/", self.base_url);

		let format = format_description!("[year]-[month]-[day] [hour]:[minute]");
		let paid_at = OffsetDateTime::now_utc()
			.format(&format)
			.map_err(|e| Box::new(e) as Box<dyn Error + Send>)?;

		let body = RegisterPaymentBody {
			referencia:    confirmation.bank_reference.clone(),
			fecha_pago:    paid_at,
			total_cobrado: confirmation.amount_usd,
			accion:        ACTION_REGISTER,
			forma_pago:    METHOD_BANK_TRANSFER,
		};

		let resp = self
			.http
			.post(&url)
			.header("Authorization", self.auth_header())
			.json(&body)
			.send()
			.await
			.map_err(|e| Box::new(e) as Box<dyn Error + Send>)?;

		let status = resp.status();
		if status.is_success() {
			let ack = resp
				.json::<serde_json::Value>()
				.await
				.map_err(|e| Box::new(e) as Box<dyn Error + Send>)?;
			return Ok(SubmissionOutcome::Accepted(ack));
		}

		let raw_body = resp.text().await.unwrap_or_default();
		warn!("Payment registration for invoice {invoice_id} got {status}");
		Ok(SubmissionOutcome::Rejected {
			status: status.as_u16(),
			body:   raw_body,
		})
	}
}

fn into_client(record: ClientRecord) -> Option<Client> {
	// A registry record without a service id cannot be billed against.
	let service_id = record.id_servicio?;
	let full_name = [record.nombre, record.apellidos]
		.into_iter()
		.flatten()
		.filter(|part| !part.trim().is_empty())
		.collect::<Vec<_>>()
		.join(" ");

	Some(Client {
		service_id,
		full_name,
		national_id: record.cedula.unwrap_or_default(),
	})
}

fn into_invoice(record: InvoiceRecord) -> Invoice {
	Invoice {
		id:        record.id.or(record.id_factura),
		total_usd: numeric_or_zero(&record.total),
	}
}

/// Invoice totals arrive as numbers, numeric strings or garbage; only a
/// parseable value counts, anything else is zero rather than fatal.
fn numeric_or_zero(value: &serde_json::Value) -> f64 {
	match value {
		serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
		serde_json::Value::String(s) => s.trim().parse().unwrap_or(0.0),
		_ => 0.0,
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn test_numeric_or_zero_accepts_numbers_and_numeric_strings() {
		assert_eq!(numeric_or_zero(&json!(25.5)), 25.5);
		assert_eq!(numeric_or_zero(&json!("10.75")), 10.75);
		assert_eq!(numeric_or_zero(&json!(" 3 ")), 3.0);
	}

	#[test]
	fn test_numeric_or_zero_coerces_garbage_to_zero() {
		assert_eq!(numeric_or_zero(&json!(null)), 0.0);
		assert_eq!(numeric_or_zero(&json!("n/a")), 0.0);
		assert_eq!(numeric_or_zero(&json!({"amount": 5})), 0.0);
	}

	#[test]
	fn test_into_client_joins_name_parts() {
		let record = ClientRecord {
			id_servicio: Some(281),
			nombre:      Some("María".to_string()),
			apellidos:   Some("Pérez".to_string()),
			cedula:      Some("V-123".to_string()),
		};

		let client = into_client(record).unwrap();

		assert_eq!(client.service_id, 281);
		assert_eq!(client.full_name, "María Pérez");
		assert_eq!(client.national_id, "V-123");
	}

	#[test]
	fn test_into_client_without_service_id_is_unusable() {
		let record = ClientRecord {
			id_servicio: None,
			nombre:      Some("María".to_string()),
			apellidos:   None,
			cedula:      Some("V-123".to_string()),
		};

		assert!(into_client(record).is_none());
	}

	#[test]
	fn test_into_invoice_falls_back_to_id_factura() {
		let record = InvoiceRecord {
			id:         None,
			id_factura: Some(42),
			total:      json!("12.50"),
		};

		let invoice = into_invoice(record);

		assert_eq!(invoice.id, Some(42));
		assert_eq!(invoice.total_usd, 12.5);
	}
}
