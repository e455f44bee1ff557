use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    pub version: u32,

    #[serde(default)]
    pub remote: Option<RemoteConfig>,

    /// Email of the signed-in account; keys the `Users/{email}` document.
    #[serde(default)]
    pub account: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            version: 1,
            remote: None,
            account: None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub base_url: String,
    pub token: String,
}

fn default_language() -> String {
    "en".to_string()
}

/// Device-persisted client flags.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientSettings {
    #[serde(default)]
    pub is_user_logged_in: bool,

    #[serde(default)]
    pub is_dark_mode: bool,

    #[serde(default = "default_language")]
    pub selected_language: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            is_user_logged_in: false,
            is_dark_mode: false,
            selected_language: default_language(),
        }
    }
}
