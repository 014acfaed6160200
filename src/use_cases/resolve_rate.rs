use std::sync::Arc;

use async_trait::async_trait;
use log::{info, warn};

use crate::domain::rate::{DEFAULT_RATE, ExchangeRate, RateProvider, RateStage};

/// Resolves the official bolívar/dollar rate through an ordered fallback
/// chain. Never fails: when every stage comes up empty the built-in
/// default rate is returned, so callers are free to treat the rate as
/// always available.
#[derive(Clone)]
pub struct ResolveRateUseCase {
	stages: Vec<Arc<dyn RateStage>>,
}

impl ResolveRateUseCase {
	pub fn new(stages: Vec<Arc<dyn RateStage>>) -> Self {
		Self { stages }
	}

	pub async fn execute(&self) -> ExchangeRate {
		for stage in &self.stages {
			match stage.fetch().await {
				Some(value) if value > 0.0 => {
					info!("Rate {value} obtained from {}", stage.source());
					return ExchangeRate::new(value, stage.source());
				}
				Some(value) => {
					warn!(
						"Unusable rate {value} from {}, trying next source",
						stage.source()
					);
				}
				None => {
					warn!(
						"Rate source {} unavailable, trying next source",
						stage.source()
					);
				}
			}
		}

		warn!("All rate sources failed, using default rate {DEFAULT_RATE}");
		ExchangeRate::fallback()
	}
}

#[async_trait]
impl RateProvider for ResolveRateUseCase {
	async fn current_rate(&self) -> ExchangeRate {
		self.execute().await
	}
}
