use serde::{Deserialize, Serialize};

use crate::domain::rate::ExchangeRate;

/// A pending billing record with a USD-denominated total. The upstream
/// platform does not guarantee an identifier on every record.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Invoice {
	pub id:        Option<i64>,
	pub total_usd: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BalanceSummary {
	pub total_usd: f64,
	pub total_bs:  f64,
	pub invoices:  Vec<Invoice>,
}

impl BalanceSummary {
	/// Sums every pending invoice and converts the total with the given
	/// rate. An empty invoice list is a valid zero-total summary.
	pub fn from_invoices(invoices: Vec<Invoice>, rate: &ExchangeRate) -> Self {
		let total_usd: f64 = invoices.iter().map(|i| i.total_usd).sum();
		Self {
			total_usd,
			total_bs: rate.to_bolivares(total_usd),
			invoices,
		}
	}

	pub fn first_pending(&self) -> Option<&Invoice> {
		self.invoices.first()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::domain::rate::RateSource;

	#[test]
	fn test_summary_sums_all_invoices() {
		let rate = ExchangeRate::new(40.0, RateSource::PrimaryApi);
		let invoices = vec![
			Invoice {
				id:        Some(1),
				total_usd: 10.0,
			},
			Invoice {
				id:        Some(2),
				total_usd: 5.0,
			},
		];

		let summary = BalanceSummary::from_invoices(invoices, &rate);

		assert_eq!(summary.total_usd, 15.0);
		assert_eq!(summary.total_bs, 600.0);
		assert_eq!(summary.invoices.len(), 2);
	}

	#[test]
	fn test_empty_invoice_list_yields_zero_summary() {
		let rate = ExchangeRate::fallback();

		let summary = BalanceSummary::from_invoices(vec![], &rate);

		assert_eq!(summary.total_usd, 0.0);
		assert_eq!(summary.total_bs, 0.0);
		assert!(summary.first_pending().is_none());
	}

	#[test]
	fn test_first_pending_follows_returned_order() {
		let rate = ExchangeRate::fallback();
		let invoices = vec![
			Invoice {
				id:        Some(7),
				total_usd: 1.0,
			},
			Invoice {
				id:        Some(3),
				total_usd: 99.0,
			},
		];

		let summary = BalanceSummary::from_invoices(invoices, &rate);

		assert_eq!(summary.first_pending().unwrap().id, Some(7));
	}
}
