use serde::{Deserialize, Serialize};

/// One account's chosen plan for one service. Keyed by `service_name`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserSubscription {
    pub service_name: String,
    pub plan_name: String,
    pub plan_price: f64,
    pub person_count: u32,
}

impl UserSubscription {
    /// Price carried by this account: the plan price split across its seats.
    pub fn monthly_share(&self) -> f64 {
        self.plan_price / f64::from(self.person_count)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("service name must not be empty")]
    EmptyServiceName,

    #[error("invalid price format: {0:?}")]
    InvalidPrice(String),

    #[error("person count must be at least 1 (got {0})")]
    InvalidPersonCount(i64),

    #[error("invalid account email: {0:?}")]
    InvalidEmail(String),

    #[error("{0} must not be empty")]
    EmptyField(&'static str),
}

/// Raw subscription input as typed by a user, before validation.
#[derive(Clone, Debug, Default)]
pub struct SubscriptionDraft {
    pub service_name: String,
    pub plan_name: String,
    pub price: String,
    pub person_count: i64,
}

impl SubscriptionDraft {
    pub fn validate(&self) -> Result<UserSubscription, ValidationError> {
        let service_name = self.service_name.trim();
        if service_name.is_empty() {
            return Err(ValidationError::EmptyServiceName);
        }

        let plan_price = normalize_price(&self.price)?;

        let person_count = u32::try_from(self.person_count)
            .ok()
            .filter(|n| *n >= 1)
            .ok_or(ValidationError::InvalidPersonCount(self.person_count))?;

        Ok(UserSubscription {
            service_name: service_name.to_string(),
            plan_name: self.plan_name.trim().to_string(),
            plan_price,
            person_count,
        })
    }
}

/// Parses a user-entered price. A decimal comma is accepted and stored with a dot.
pub fn normalize_price(input: &str) -> Result<f64, ValidationError> {
    let normalized = input.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(ValidationError::InvalidPrice(input.to_string())),
    }
}

#[cfg(test)]
#[path = "../tests/model/subscription_tests.rs"]
mod tests;
