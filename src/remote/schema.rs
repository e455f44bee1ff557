//! Typed view of the remote collections.
//!
//! `Users/{email}`: `Name`, `Surname`, `Subscriptions: {service: {PlanName, Price, PersonCount}}`.
//! `Services/{name}`: `Type`, `Plans: {plan: price}`.

use serde_json::{Value, json};

use crate::model::{Plan, Service, UserSubscription};

use super::Document;

pub const USERS: &str = "Users";
pub const SERVICES: &str = "Services";

pub const FIELD_NAME: &str = "Name";
pub const FIELD_SURNAME: &str = "Surname";
pub const FIELD_SUBSCRIPTIONS: &str = "Subscriptions";
pub const FIELD_PLAN_NAME: &str = "PlanName";
pub const FIELD_PRICE: &str = "Price";
pub const FIELD_PERSON_COUNT: &str = "PersonCount";
pub const FIELD_TYPE: &str = "Type";
pub const FIELD_PLANS: &str = "Plans";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{document}: {reason}")]
pub struct ParseError {
    pub document: String,
    pub reason: String,
}

impl ParseError {
    fn new(collection: &str, key: &str, reason: impl Into<String>) -> Self {
        Self {
            document: format!("{}/{}", collection, key),
            reason: reason.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserDocument {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub subscriptions: Vec<UserSubscription>,
}

impl UserDocument {
    pub fn full_name(&self) -> String {
        let name = self.name.as_deref().unwrap_or_default();
        let surname = self.surname.as_deref().unwrap_or_default();
        format!("{} {}", name, surname).trim().to_string()
    }
}

fn optional_string(
    doc: &Document,
    field: &str,
    key: &str,
) -> Result<Option<String>, ParseError> {
    match doc.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(ParseError::new(
            USERS,
            key,
            format!("{} must be a string, got {}", field, other),
        )),
    }
}

/// Parses an account document. A missing `Subscriptions` field means no subscriptions.
pub fn parse_user_document(key: &str, doc: &Document) -> Result<UserDocument, ParseError> {
    let name = optional_string(doc, FIELD_NAME, key)?;
    let surname = optional_string(doc, FIELD_SURNAME, key)?;

    let subscriptions = match doc.get(FIELD_SUBSCRIPTIONS) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Object(map)) => map
            .iter()
            .map(|(service, entry)| parse_subscription_entry(key, service, entry))
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => {
            return Err(ParseError::new(
                USERS,
                key,
                format!("{} must be a map, got {}", FIELD_SUBSCRIPTIONS, other),
            ));
        }
    };

    Ok(UserDocument {
        name,
        surname,
        subscriptions,
    })
}

pub fn parse_subscription_entry(
    key: &str,
    service_name: &str,
    entry: &Value,
) -> Result<UserSubscription, ParseError> {
    let err = |reason: String| {
        ParseError::new(USERS, key, format!("subscription {:?}: {}", service_name, reason))
    };

    if service_name.trim().is_empty() {
        return Err(err("empty service name".to_string()));
    }
    let Some(entry) = entry.as_object() else {
        return Err(err(format!("expected a map, got {}", entry)));
    };

    let plan_name = entry
        .get(FIELD_PLAN_NAME)
        .and_then(Value::as_str)
        .ok_or_else(|| err(format!("missing or non-string {}", FIELD_PLAN_NAME)))?;

    let plan_price = entry
        .get(FIELD_PRICE)
        .and_then(Value::as_f64)
        .filter(|p| *p >= 0.0)
        .ok_or_else(|| err(format!("missing or invalid {}", FIELD_PRICE)))?;

    let person_count = entry
        .get(FIELD_PERSON_COUNT)
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| *n >= 1)
        .ok_or_else(|| err(format!("{} must be an integer >= 1", FIELD_PERSON_COUNT)))?;

    Ok(UserSubscription {
        service_name: service_name.to_string(),
        plan_name: plan_name.to_string(),
        plan_price,
        person_count,
    })
}

pub fn encode_subscription(sub: &UserSubscription) -> Value {
    json!({
        FIELD_PLAN_NAME: sub.plan_name,
        FIELD_PRICE: sub.plan_price,
        FIELD_PERSON_COUNT: sub.person_count,
    })
}

pub fn encode_account(name: &str, surname: &str) -> Document {
    let mut doc = Document::new();
    doc.insert(FIELD_NAME.to_string(), Value::String(name.to_string()));
    doc.insert(FIELD_SURNAME.to_string(), Value::String(surname.to_string()));
    doc
}

pub fn parse_service_document(key: &str, doc: &Document) -> Result<Service, ParseError> {
    let category = doc
        .get(FIELD_TYPE)
        .and_then(Value::as_str)
        .ok_or_else(|| {
            ParseError::new(SERVICES, key, format!("missing or non-string {}", FIELD_TYPE))
        })?;

    Ok(Service {
        name: key.to_string(),
        category: category.to_string(),
    })
}

/// Plans of a catalog service, cheapest first. Equal prices keep plan-name order.
pub fn parse_plans(key: &str, doc: &Document) -> Result<Vec<Plan>, ParseError> {
    let plans = match doc.get(FIELD_PLANS) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Object(map)) => map,
        Some(other) => {
            return Err(ParseError::new(
                SERVICES,
                key,
                format!("{} must be a map, got {}", FIELD_PLANS, other),
            ));
        }
    };

    let mut out = plans
        .iter()
        .map(|(name, price)| {
            price
                .as_f64()
                .map(|price| Plan {
                    name: name.clone(),
                    price,
                })
                .ok_or_else(|| {
                    let reason = format!("plan {:?}: price must be a number", name);
                    ParseError::new(SERVICES, key, reason)
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    out.sort_by(|a, b| a.price.total_cmp(&b.price));
    Ok(out)
}

#[cfg(test)]
#[path = "../tests/remote/schema_tests.rs"]
mod tests;
