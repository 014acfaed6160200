use actix_web::error::ResponseError;
use actix_web::{HttpRequest, HttpResponse, Responder, post, web};
use log::{info, warn};

use crate::adapters::web::errors::ApiError;
use crate::adapters::web::schema::PaymentNotification;
use crate::infrastructure::config::settings::Config;
use crate::use_cases::dto::RegisterPaymentCommand;
use crate::use_cases::register_payment::RegisterPaymentUseCase;

/// Bank payment notification entry point. Pipeline failures are part of
/// the contract with the notifying bank: they come back as HTTP 200 with
/// the structured error embedded in the body. Only a bad API key (403)
/// and malformed JSON (400) map to HTTP status codes.
#[post("/webhook")]
pub async fn webhook(
	req: HttpRequest,
	body: web::Bytes,
	config: web::Data<Config>,
	register_payment_use_case: web::Data<RegisterPaymentUseCase>,
) -> impl Responder {
	let presented_key =
		req.headers().get("API-KEY").and_then(|v| v.to_str().ok());
	if presented_key != Some(config.webhook_api_key.as_str()) {
		warn!("Webhook rejected: invalid API key");
		return ApiError::AuthRejected.error_response();
	}

	let notification: PaymentNotification = match serde_json::from_slice(&body)
	{
		Ok(notification) => notification,
		Err(e) => {
			warn!("Webhook rejected: malformed JSON: {e}");
			return ApiError::BadRequest.error_response();
		}
	};

	let command = RegisterPaymentCommand {
		amount_bs:         notification.amount_bs,
		bank_reference:    notification.bank_reference,
		payer_national_id: notification.payer_national_id,
	};

	match register_payment_use_case.execute(command).await {
		Ok(ack) => {
			info!("Payment notification settled");
			HttpResponse::Ok().json(ack)
		}
		Err(e) => {
			warn!("Payment notification failed: {e}");
			HttpResponse::Ok().json(e.body())
		}
	}
}
