use async_trait::async_trait;
use log::warn;
use reqwest::Client as HttpClient;

use crate::domain::rate::{RateSource, RateStage};

/// First stage of the rate chain: a JSON quotation service exposing the
/// official rate at `moneda.precio`. Anything short of a 200 with a
/// positive numeric rate is a stage failure, never an error.
#[derive(Clone)]
pub struct PrimaryRateApi {
	http: HttpClient,
	url:  String,
}

impl PrimaryRateApi {
	pub fn new(http: HttpClient, url: String) -> Self {
		Self { http, url }
	}
}

#[async_trait]
impl RateStage for PrimaryRateApi {
	fn source(&self) -> RateSource {
		RateSource::PrimaryApi
	}

	async fn fetch(&self) -> Option<f64> {
		let resp = match self.http.get(&self.url).send().await {
			Ok(resp) => resp,
			Err(e) => {
				warn!("Primary rate API unreachable: {e}");
				return None;
			}
		};

		if !resp.status().is_success() {
			warn!("Primary rate API returned status {}", resp.status());
			return None;
		}

		let body = match resp.text().await {
			Ok(body) => body,
			Err(e) => {
				warn!("Failed to read primary rate API body: {e}");
				return None;
			}
		};
		if body.trim().is_empty() {
			warn!("Primary rate API returned an empty body");
			return None;
		}

		let json: serde_json::Value = match serde_json::from_str(&body) {
			Ok(json) => json,
			Err(e) => {
				warn!("Primary rate API body is not valid JSON: {e}");
				return None;
			}
		};

		match quoted_rate(&json) {
			Some(rate) if rate > 0.0 => Some(rate),
			_ => {
				warn!("Primary rate API quote is missing or non-positive");
				None
			}
		}
	}
}

fn quoted_rate(json: &serde_json::Value) -> Option<f64> {
	let quote = &json["moneda"]["precio"];
	quote
		.as_f64()
		.or_else(|| quote.as_str().and_then(|s| s.trim().parse().ok()))
}
