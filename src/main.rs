use std::sync::Arc;

use rapinet_pay::infrastructure::config::settings::Config;
use rapinet_pay::run;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
	let config = Arc::new(Config::load().expect("Failed to load configuration"));
	run(config).await
}
