use serde::{Deserialize, Serialize};

/// A subscriber as resolved from the billing platform's registry.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Client {
	pub service_id:  i64,
	pub full_name:   String,
	pub national_id: String,
}

/// Lookup key for the client registry. Exactly one of the two fields is
/// expected; `national_id` takes precedence when both are present.
#[derive(Debug, Clone, Default)]
pub struct LookupQuery {
	pub national_id:       Option<String>,
	pub partial_reference: Option<String>,
}

impl LookupQuery {
	pub fn by_national_id(national_id: &str) -> Self {
		Self {
			national_id:       Some(national_id.to_string()),
			partial_reference: None,
		}
	}

	pub fn by_partial_reference(reference: &str) -> Self {
		Self {
			national_id:       None,
			partial_reference: Some(reference.to_string()),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.national_id.is_none() && self.partial_reference.is_none()
	}
}
