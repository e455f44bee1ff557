use serde::{Deserialize, Serialize};

/// Catalog entry. `name` is the unique key and the remote document id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    pub category: String,
}

/// A priced plan nested under a catalog service. Never mirrored locally.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,
    pub price: f64,
}
