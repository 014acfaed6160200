use serde::Deserialize;

/// Process configuration, loaded once at startup. Secrets have no
/// defaults: a deployment without them must fail to boot.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
	pub webhook_api_key:  String,
	pub billing_api_key:  String,
	pub billing_api_url:  String,
	pub rate_api_url:     String,
	pub central_bank_url: String,
	pub server_port:      u16,
}

impl Config {
	pub fn load() -> Result<Self, config::ConfigError> {
		let config_builder = config::Config::builder()
			.set_default("billing_api_url", "https://api.wisphub.app/api")?
			.set_default(
				"rate_api_url",
				"https://pydolarvenezuela-api.vercel.app/api/v1/dollar?page=bcv",
			)?
			.set_default("central_bank_url", "https://www.bcv.org.ve/")?
			.set_default("server_port", 8080_i64)?
			.add_source(config::Environment::with_prefix("APP"))
			.build()?;

		config_builder.try_deserialize()
	}
}
