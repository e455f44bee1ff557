mod account;
mod config;
mod profile;
mod service;
mod subscription;

pub use self::account::AccountId;
pub use self::config::{ClientConfig, ClientSettings, RemoteConfig};
pub use self::profile::UserProfile;
pub use self::service::{Plan, Service};
pub use self::subscription::{
    SubscriptionDraft, UserSubscription, ValidationError, normalize_price,
};
