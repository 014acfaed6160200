use std::time::Duration;

use async_trait::async_trait;
use log::{error, warn};
use scraper::{Html, Selector};

use crate::domain::rate::{RateSource, RateStage};

/// Second stage of the rate chain: scrapes the official rate from the
/// central bank's public page. The whole fetch-and-parse runs on the
/// blocking worker pool so a slow scrape cannot starve the async request
/// pool. Certificate validation is relaxed: the endpoint is well known
/// and has long-standing certificate-chain issues.
pub struct CentralBankScraper {
	url:     String,
	timeout: Duration,
}

impl CentralBankScraper {
	pub fn new(url: String, timeout: Duration) -> Self {
		Self { url, timeout }
	}
}

#[async_trait]
impl RateStage for CentralBankScraper {
	fn source(&self) -> RateSource {
		RateSource::CentralBank
	}

	async fn fetch(&self) -> Option<f64> {
		let url = self.url.clone();
		let timeout = self.timeout;

		match tokio::task::spawn_blocking(move || scrape_rate(&url, timeout))
			.await
		{
			Ok(rate) => rate,
			Err(e) => {
				error!("Central bank scrape task failed: {e}");
				None
			}
		}
	}
}

fn scrape_rate(url: &str, timeout: Duration) -> Option<f64> {
	let client = match reqwest::blocking::Client::builder()
		.timeout(timeout)
		.danger_accept_invalid_certs(true)
		.user_agent("Mozilla/5.0")
		.build()
	{
		Ok(client) => client,
		Err(e) => {
			error!("Failed to build scraping client: {e}");
			return None;
		}
	};

	let resp = match client.get(url).send() {
		Ok(resp) => resp,
		Err(e) => {
			warn!("Central bank page unreachable: {e}");
			return None;
		}
	};

	if !resp.status().is_success() {
		warn!("Central bank page returned status {}", resp.status());
		return None;
	}

	let html = match resp.text() {
		Ok(html) => html,
		Err(e) => {
			warn!("Failed to read central bank page body: {e}");
			return None;
		}
	};

	parse_official_rate(&html)
}

/// Extracts the dollar rate from the page markup: a `div#dolar`
/// container holding a bold text node with a comma-decimal number.
fn parse_official_rate(html: &str) -> Option<f64> {
	let document = Html::parse_document(html);
	let selector = Selector::parse("div#dolar strong").ok()?;

	let node = match document.select(&selector).next() {
		Some(node) => node,
		None => {
			warn!("Central bank page has no rate fragment");
			return None;
		}
	};

	let text = node.text().collect::<String>();
	let normalized = text.trim().replace(',', ".");
	match normalized.parse::<f64>() {
		Ok(rate) => Some(rate),
		Err(_) => {
			warn!("Central bank rate text is not numeric: '{normalized}'");
			None
		}
	}
}
