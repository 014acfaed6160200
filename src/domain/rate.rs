use async_trait::async_trait;
use derive_more::derive::Display;

/// Last-resort rate used when every live source is unavailable.
/// Pipeline liveness takes priority over conversion accuracy here.
pub const DEFAULT_RATE: f64 = 36.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RateSource {
	#[display("primary rate API")]
	PrimaryApi,
	#[display("central bank page")]
	CentralBank,
	#[display("built-in default")]
	Fallback,
}

/// Bolívares per US dollar, valid for one pipeline run only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangeRate {
	pub value:  f64,
	pub source: RateSource,
}

impl ExchangeRate {
	pub fn new(value: f64, source: RateSource) -> Self {
		Self { value, source }
	}

	pub fn fallback() -> Self {
		Self {
			value:  DEFAULT_RATE,
			source: RateSource::Fallback,
		}
	}

	/// Converts a USD amount to bolívares, rounded to 2 decimal places.
	pub fn to_bolivares(&self, amount_usd: f64) -> f64 {
		(amount_usd * self.value * 100.0).round() / 100.0
	}
}

/// One step of the rate-resolution chain. A `None` is a stage failure,
/// never an error: the resolver just moves on to the next stage.
#[async_trait]
pub trait RateStage: Send + Sync + 'static {
	fn source(&self) -> RateSource;
	async fn fetch(&self) -> Option<f64>;
}

#[async_trait]
pub trait RateProvider: Send + Sync + 'static {
	async fn current_rate(&self) -> ExchangeRate;
}
