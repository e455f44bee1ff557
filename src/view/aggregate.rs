use serde::{Deserialize, Serialize};

use crate::model::{Service, UserSubscription};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub monthly_spend: f64,
}

impl Summary {
    pub fn annual_spend(&self) -> f64 {
        self.monthly_spend * 12.0
    }
}

/// Count and per-seat monthly spend. Person counts are validated upstream, never zero here.
pub fn compute_summary(subs: &[UserSubscription]) -> Summary {
    Summary {
        count: subs.len(),
        monthly_spend: subs.iter().map(UserSubscription::monthly_share).sum(),
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    #[default]
    PriceAscending,
    PriceDescending,
    Alphabetical,
}

/// Stable sort; equal keys keep their input order.
pub fn sort_subscriptions(subs: &[UserSubscription], mode: SortMode) -> Vec<UserSubscription> {
    let mut out = subs.to_vec();
    match mode {
        SortMode::PriceAscending => {
            out.sort_by(|a, b| a.monthly_share().total_cmp(&b.monthly_share()));
        }
        SortMode::PriceDescending => {
            out.sort_by(|a, b| b.monthly_share().total_cmp(&a.monthly_share()));
        }
        SortMode::Alphabetical => out.sort_by(|a, b| a.service_name.cmp(&b.service_name)),
    }
    out
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Exact(String),
}

impl CategoryFilter {
    /// `"all"` in any case is the match-everything sentinel.
    pub fn parse(input: &str) -> Self {
        if input.trim().eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Exact(input.to_string())
        }
    }

    fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Exact(c) => c == category,
        }
    }
}

/// Case-insensitive name containment AND category equality, preserving input order.
pub fn filter_services(services: &[Service], text: &str, category: &CategoryFilter) -> Vec<Service> {
    let needle = text.to_lowercase();
    services
        .iter()
        .filter(|s| needle.is_empty() || s.name.to_lowercase().contains(&needle))
        .filter(|s| category.matches(&s.category))
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "../tests/view/aggregate_tests.rs"]
mod tests;
