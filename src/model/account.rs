use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Account key in the remote `Users` collection (the sign-in email).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    pub fn parse(email: &str) -> Result<Self, ValidationError> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(ValidationError::InvalidEmail(email.to_string()));
        }
        Ok(Self(email.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
