use crate::model::{Service, UserProfile, UserSubscription};
use crate::sync::SyncError;

use super::{CategoryFilter, SortMode, Summary, compute_summary, filter_services, sort_subscriptions};

#[derive(Clone, Debug, Default, PartialEq)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Success,
    Failure(String),
}

impl FetchState {
    /// Applies a load outcome. `None` means the result must be ignored (superseded load).
    fn settle<T>(&mut self, result: Result<T, SyncError>) -> Option<T> {
        match result {
            Ok(value) => {
                *self = FetchState::Success;
                Some(value)
            }
            Err(SyncError::Cancelled) => None,
            Err(err) => {
                *self = FetchState::Failure(err.to_string());
                None
            }
        }
    }
}

/// Outcome banner for a mutation.
#[derive(Clone, Debug, PartialEq)]
pub enum Feedback {
    Success(String),
    Error(String),
}

impl Feedback {
    pub fn from_result<T>(result: &Result<T, SyncError>, success: &str) -> Self {
        match result {
            Ok(_) => Feedback::Success(success.to_string()),
            Err(err) => Feedback::Error(err.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Feedback::Success(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Feedback::Success(m) | Feedback::Error(m) => m,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SubscriptionsView {
    subscriptions: Vec<UserSubscription>,
    state: FetchState,
    sort: SortMode,
}

impl SubscriptionsView {
    pub fn begin_load(&mut self) {
        self.state = FetchState::Loading;
    }

    /// A failed load shows an empty list; a cancelled one changes nothing.
    pub fn apply(&mut self, result: Result<Vec<UserSubscription>, SyncError>) {
        let cancelled = matches!(result, Err(SyncError::Cancelled));
        match self.state.settle(result) {
            Some(subs) => self.subscriptions = subs,
            None if !cancelled => self.subscriptions.clear(),
            None => {}
        }
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.sort = sort;
    }

    pub fn subscriptions(&self) -> &[UserSubscription] {
        &self.subscriptions
    }

    pub fn sorted(&self) -> Vec<UserSubscription> {
        sort_subscriptions(&self.subscriptions, self.sort)
    }

    pub fn summary(&self) -> Summary {
        compute_summary(&self.subscriptions)
    }
}

#[derive(Clone, Debug, Default)]
pub struct CatalogView {
    services: Vec<Service>,
    filtered: Vec<Service>,
    search: String,
    category: CategoryFilter,
    state: FetchState,
}

impl CatalogView {
    pub fn begin_load(&mut self) {
        self.state = FetchState::Loading;
    }

    pub fn apply(&mut self, result: Result<Vec<Service>, SyncError>) {
        let cancelled = matches!(result, Err(SyncError::Cancelled));
        match self.state.settle(result) {
            Some(services) => self.services = services,
            None if !cancelled => self.services.clear(),
            None => {}
        }
        self.refilter();
    }

    pub fn set_search(&mut self, text: &str) {
        self.search = text.to_string();
        self.refilter();
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
        self.refilter();
    }

    fn refilter(&mut self) {
        self.filtered = filter_services(&self.services, &self.search, &self.category);
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn filtered(&self) -> &[Service] {
        &self.filtered
    }
}

#[derive(Clone, Debug, Default)]
pub struct ProfileView {
    profile: Option<UserProfile>,
    state: FetchState,
}

impl ProfileView {
    pub fn begin_load(&mut self) {
        self.state = FetchState::Loading;
    }

    pub fn apply(&mut self, result: Result<UserProfile, SyncError>) {
        let cancelled = matches!(result, Err(SyncError::Cancelled));
        match self.state.settle(result) {
            Some(profile) => self.profile = Some(profile),
            None if !cancelled => self.profile = None,
            None => {}
        }
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }
}

#[cfg(test)]
#[path = "../tests/view/state_tests.rs"]
mod tests;
