use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    pub full_name: String,

    /// Derived from the account's subscriptions; recomputed on every remote load.
    pub subscription_count: usize,
    pub monthly_spend: f64,
}

impl UserProfile {
    pub fn annual_spend(&self) -> f64 {
        self.monthly_spend * 12.0
    }
}
