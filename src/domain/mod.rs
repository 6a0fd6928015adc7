//! Domain - Pure Data Structures and Wire Types
//!
//! These types carry no session logic and map one-to-one onto what the
//! backend sends and accepts.

pub mod auth_config;
pub mod settings;

pub use auth_config::{AuthConfig, AuthConfigProvider, Category, CategoryLists};
pub use settings::{GlobalSettings, SettingValue};

use serde::{Deserialize, Serialize};

/// Everything the backend returns when the settings page is opened
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialState {
    /// Configured providers, by category
    #[serde(flatten)]
    pub configurations: CategoryLists,
    /// Provider types available for primary (form/SSO) configurations
    #[serde(default)]
    pub primary_providers: Vec<AuthConfigProvider>,
    /// Provider types available for secondary configurations
    #[serde(default)]
    pub secondary_providers: Vec<AuthConfigProvider>,
    /// Global policy flags
    #[serde(default)]
    pub global_settings: GlobalSettings,
    /// Documentation link shown on the page
    #[serde(default)]
    pub help_link: Option<String>,
    /// Whether the current user may change anything
    #[serde(default)]
    pub can_edit: bool,
}

/// Payload of a save request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveRequest {
    /// Comma-joined id lists for categories whose ordering changed
    pub orderings: Vec<(Category, String)>,
    /// The full global settings mapping
    pub global_settings: GlobalSettings,
}

impl SaveRequest {
    /// Flatten into form fields: settings first, then changed orderings
    pub fn to_form_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.global_settings.to_form_pairs();
        pairs.extend(
            self.orderings
                .iter()
                .map(|(category, ids)| (category.key().to_string(), ids.clone())),
        );
        pairs
    }

    /// Submitted ordering for a category, if it changed
    pub fn ordering(&self, category: Category) -> Option<&str> {
        self.orderings
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, ids)| ids.as_str())
    }
}
