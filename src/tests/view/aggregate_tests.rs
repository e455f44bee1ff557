use super::*;

fn sub(service: &str, price: f64, persons: u32) -> UserSubscription {
    UserSubscription {
        service_name: service.to_string(),
        plan_name: "Plan".to_string(),
        plan_price: price,
        person_count: persons,
    }
}

fn service(name: &str, category: &str) -> Service {
    Service {
        name: name.to_string(),
        category: category.to_string(),
    }
}

fn names(subs: &[UserSubscription]) -> Vec<&str> {
    subs.iter().map(|s| s.service_name.as_str()).collect()
}

fn catalog() -> Vec<Service> {
    vec![
        service("Spotify", "Music"),
        service("Netflix", "Video"),
        service("Apple Music", "Music"),
        service("Disney+", "Video"),
    ]
}

#[test]
fn summary_sums_per_seat_prices() {
    let subs = vec![sub("Spotify", 59.99, 1), sub("Netflix", 100.0, 2)];
    let summary = compute_summary(&subs);
    assert_eq!(summary.count, 2);
    assert!((summary.monthly_spend - 109.99).abs() < 1e-9);

    let edited = vec![sub("Spotify", 59.99, 1), sub("Netflix", 100.0, 4)];
    let summary = compute_summary(&edited);
    assert!((summary.monthly_spend - 84.99).abs() < 1e-9);
    assert!((summary.annual_spend() - 84.99 * 12.0).abs() < 1e-9);
}

#[test]
fn summary_of_nothing_is_zero() {
    assert_eq!(compute_summary(&[]), Summary::default());
}

#[test]
fn sort_uses_per_seat_price() {
    let subs = vec![
        sub("Netflix", 100.0, 4),
        sub("Spotify", 59.99, 1),
        sub("YouTube", 30.0, 1),
    ];
    let asc = sort_subscriptions(&subs, SortMode::PriceAscending);
    assert_eq!(names(&asc), vec!["Netflix", "YouTube", "Spotify"]);
}

#[test]
fn descending_reverses_ascending_for_unique_keys() {
    let subs = vec![
        sub("A", 10.0, 1),
        sub("B", 40.0, 2),
        sub("C", 5.0, 1),
        sub("D", 90.0, 3),
    ];
    let asc = sort_subscriptions(&subs, SortMode::PriceAscending);
    let desc = sort_subscriptions(&asc, SortMode::PriceDescending);
    let mut reversed = asc.clone();
    reversed.reverse();
    assert_eq!(desc, reversed);
}

#[test]
fn sort_is_stable_for_equal_keys() {
    let subs = vec![
        sub("First", 20.0, 2),
        sub("Second", 10.0, 1),
        sub("Third", 30.0, 3),
    ];
    let asc = sort_subscriptions(&subs, SortMode::PriceAscending);
    assert_eq!(names(&asc), vec!["First", "Second", "Third"]);
    let desc = sort_subscriptions(&subs, SortMode::PriceDescending);
    assert_eq!(names(&desc), vec!["First", "Second", "Third"]);
}

#[test]
fn alphabetical_is_case_sensitive_ordinal() {
    let subs = vec![sub("spotify", 1.0, 1), sub("Netflix", 1.0, 1), sub("Amazon", 1.0, 1)];
    let sorted = sort_subscriptions(&subs, SortMode::Alphabetical);
    assert_eq!(names(&sorted), vec!["Amazon", "Netflix", "spotify"]);
}

#[test]
fn empty_text_and_all_category_is_identity() {
    let services = catalog();
    assert_eq!(filter_services(&services, "", &CategoryFilter::All), services);
}

#[test]
fn filter_matches_case_insensitive_substring_and_exact_category() {
    let services = catalog();
    let music = filter_services(&services, "MUSIC", &CategoryFilter::All);
    assert_eq!(music, vec![service("Apple Music", "Music")]);

    let videos = filter_services(&services, "", &CategoryFilter::parse("Video"));
    assert_eq!(videos, vec![service("Netflix", "Video"), service("Disney+", "Video")]);

    let none = filter_services(&services, "spot", &CategoryFilter::parse("Video"));
    assert!(none.is_empty());
}

#[test]
fn filter_is_idempotent() {
    let services = catalog();
    let category = CategoryFilter::parse("Music");
    let once = filter_services(&services, "i", &category);
    let twice = filter_services(&once, "i", &category);
    assert_eq!(once, twice);
}

#[test]
fn all_sentinel_is_case_insensitive() {
    assert_eq!(CategoryFilter::parse("All"), CategoryFilter::All);
    assert_eq!(CategoryFilter::parse("ALL"), CategoryFilter::All);
    assert_eq!(
        CategoryFilter::parse("Music"),
        CategoryFilter::Exact("Music".to_string())
    );
}
