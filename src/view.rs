//! View state: display aggregates, orderings and the holders the presentation layer reads.

mod aggregate;
mod state;

pub use self::aggregate::{
    CategoryFilter, SortMode, Summary, compute_summary, filter_services, sort_subscriptions,
};
pub use self::state::{CatalogView, Feedback, FetchState, ProfileView, SubscriptionsView};
