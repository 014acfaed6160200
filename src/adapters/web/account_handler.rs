use actix_web::error::ResponseError;
use actix_web::{HttpResponse, Responder, get, web};
use log::error;

use crate::adapters::web::errors::ApiError;
use crate::adapters::web::schema::{AccountBalanceResponse, AccountQuery};
use crate::domain::client::LookupQuery;
use crate::use_cases::get_balance::GetBalanceUseCase;
use crate::use_cases::lookup_client::LookupClientUseCase;
use crate::use_cases::resolve_rate::ResolveRateUseCase;

/// Balance inquiry by national ID or partial bank reference.
#[get("/consulta")]
pub async fn consulta(
	query: web::Query<AccountQuery>,
	lookup_client_use_case: web::Data<LookupClientUseCase>,
	get_balance_use_case: web::Data<GetBalanceUseCase>,
	resolve_rate_use_case: web::Data<ResolveRateUseCase>,
) -> impl Responder {
	let lookup = LookupQuery {
		national_id:       query.cedula.clone(),
		partial_reference: query.referencia.clone(),
	};
	if lookup.is_empty() {
		return ApiError::BadRequest.error_response();
	}

	let client = match lookup_client_use_case.execute(&lookup).await {
		Some(client) => client,
		None => return ApiError::ClientNotFound.error_response(),
	};

	let summary = match get_balance_use_case.execute(client.service_id).await {
		Ok(summary) => summary,
		Err(e) => {
			error!("Balance fetch failed for service {}: {e}", client.service_id);
			return ApiError::BalanceUnavailable.error_response();
		}
	};

	// The aggregator already used a rate internally; it is resolved once
	// more here so the response can expose the value it was quoted at.
	let rate = resolve_rate_use_case.execute().await;

	HttpResponse::Ok().json(AccountBalanceResponse {
		client:      client.full_name,
		national_id: client.national_id,
		service_id:  client.service_id,
		rate:        rate.value,
		pending_usd: summary.total_usd,
		total_bs:    summary.total_bs,
	})
}
