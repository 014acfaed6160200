use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, error};
use derive_more::derive::{Display, Error};
use serde::Serialize;

#[derive(Serialize)]
struct ErrorResponse {
	#[serde(rename = "statusCode")]
	status_code: u16,
	error:       String,
	message:     String,
}

#[derive(Debug, Display, Error)]
pub enum ApiError {
	#[display("The presented API key is not valid.")]
	AuthRejected,
	#[display("Request data is invalid.")]
	BadRequest,
	#[display("No subscriber matches the given identifier.")]
	ClientNotFound,
	#[display("Could not fetch the subscriber's balance.")]
	BalanceUnavailable,
}

impl ApiError {
	pub fn name(&self) -> String {
		match self {
			ApiError::AuthRejected => "Forbidden".to_string(),
			ApiError::BadRequest => "Bad Request".to_string(),
			ApiError::ClientNotFound => "Not Found".to_string(),
			ApiError::BalanceUnavailable => "Internal Server Error".to_string(),
		}
	}
}

impl error::ResponseError for ApiError {
	fn error_response(&self) -> HttpResponse {
		HttpResponse::build(self.status_code())
			.content_type(ContentType::json())
			.json(ErrorResponse {
				status_code: self.status_code().as_u16(),
				error:       self.to_string(),
				message:     self.name(),
			})
	}

	fn status_code(&self) -> StatusCode {
		match self {
			ApiError::AuthRejected => StatusCode::FORBIDDEN,
			ApiError::BadRequest => StatusCode::BAD_REQUEST,
			ApiError::ClientNotFound => StatusCode::NOT_FOUND,
			ApiError::BalanceUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

#[cfg(test)]
mod tests {
	use actix_web::error::ResponseError;

	use super::*;

	#[test]
	fn test_auth_rejected_error() {
		let error = ApiError::AuthRejected;
		assert_eq!(error.name(), "Forbidden");
		assert_eq!(error.status_code(), StatusCode::FORBIDDEN);

		let resp = error.error_response();
		assert_eq!(resp.status(), StatusCode::FORBIDDEN);
	}

	#[test]
	fn test_bad_request_error() {
		let error = ApiError::BadRequest;
		assert_eq!(error.name(), "Bad Request");
		assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);

		let resp = error.error_response();
		assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
	}

	#[test]
	fn test_client_not_found_error() {
		let error = ApiError::ClientNotFound;
		assert_eq!(error.name(), "Not Found");
		assert_eq!(error.status_code(), StatusCode::NOT_FOUND);

		let resp = error.error_response();
		assert_eq!(resp.status(), StatusCode::NOT_FOUND);
	}

	#[test]
	fn test_balance_unavailable_error() {
		let error = ApiError::BalanceUnavailable;
		assert_eq!(error.name(), "Internal Server Error");
		assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

		let resp = error.error_response();
		assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
	}
}
