use serde_json::json;

use super::*;

fn doc(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[test]
fn account_without_subscriptions_field_has_no_subscriptions() {
    let parsed = parse_user_document("ada@example.com", &doc(json!({"Name": "Ada", "Surname": "L"})))
        .expect("parse user");
    assert!(parsed.subscriptions.is_empty());
    assert_eq!(parsed.full_name(), "Ada L");
}

#[test]
fn account_subscriptions_are_typed() {
    let parsed = parse_user_document(
        "ada@example.com",
        &doc(json!({
            "Subscriptions": {
                "Netflix": {"PlanName": "Standard", "Price": 100, "PersonCount": 2},
                "Spotify": {"PlanName": "Premium", "Price": 59.99, "PersonCount": 1}
            }
        })),
    )
    .expect("parse user");

    assert_eq!(parsed.full_name(), "");
    assert_eq!(parsed.subscriptions.len(), 2);
    let netflix = &parsed.subscriptions[0];
    assert_eq!(netflix.service_name, "Netflix");
    assert_eq!(netflix.plan_price, 100.0);
    assert_eq!(netflix.person_count, 2);
}

#[test]
fn zero_person_count_is_a_parse_error() {
    let err = parse_user_document(
        "ada@example.com",
        &doc(json!({
            "Subscriptions": {"Netflix": {"PlanName": "Standard", "Price": 100, "PersonCount": 0}}
        })),
    )
    .expect_err("zero seats must not parse");
    assert_eq!(err.document, "Users/ada@example.com");
    assert!(err.reason.contains("PersonCount"), "{}", err.reason);
}

#[test]
fn missing_price_is_a_parse_error_not_a_default() {
    let err = parse_user_document(
        "ada@example.com",
        &doc(json!({"Subscriptions": {"Netflix": {"PlanName": "Standard", "PersonCount": 1}}})),
    )
    .expect_err("missing price must not parse");
    assert!(err.reason.contains("Price"), "{}", err.reason);
}

#[test]
fn encoded_subscription_parses_back() {
    let sub = UserSubscription {
        service_name: "Spotify".to_string(),
        plan_name: "Premium".to_string(),
        plan_price: 59.99,
        person_count: 1,
    };
    let parsed = parse_subscription_entry("ada@example.com", "Spotify", &encode_subscription(&sub))
        .expect("parse encoded");
    assert_eq!(parsed, sub);
}

#[test]
fn service_requires_a_type() {
    let svc = parse_service_document("Spotify", &doc(json!({"Type": "Music"}))).expect("parse");
    assert_eq!(svc.name, "Spotify");
    assert_eq!(svc.category, "Music");

    let err = parse_service_document("Spotify", &doc(json!({}))).expect_err("missing type");
    assert_eq!(err.document, "Services/Spotify");
}

#[test]
fn plans_are_sorted_by_price_then_name() {
    let plans = parse_plans(
        "Spotify",
        &doc(json!({
            "Type": "Music",
            "Plans": {"Family": 89.99, "Duo": 79.99, "Individual": 59.99, "Student": 59.99}
        })),
    )
    .expect("parse plans");
    let names: Vec<&str> = plans.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Individual", "Student", "Duo", "Family"]);
}
