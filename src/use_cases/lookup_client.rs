use std::sync::Arc;

use log::info;

use crate::domain::billing::ClientRegistry;
use crate::domain::client::{Client, LookupQuery};

/// Subscriber lookup against the billing platform's registry. Returns
/// the first matching record only; the upstream match semantics for
/// multiple hits are unspecified, so the rest is discarded.
#[derive(Clone)]
pub struct LookupClientUseCase {
	registry: Arc<dyn ClientRegistry>,
}

impl LookupClientUseCase {
	pub fn new(registry: Arc<dyn ClientRegistry>) -> Self {
		Self { registry }
	}

	pub async fn execute(&self, query: &LookupQuery) -> Option<Client> {
		let client = self.registry.lookup(query).await;
		match &client {
			Some(c) => {
				info!(
					"Resolved subscriber '{}' (service {})",
					c.full_name, c.service_id
				);
			}
			None => info!("No subscriber matched the lookup query"),
		}
		client
	}
}
