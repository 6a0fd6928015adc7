//! AuthConfig - Configured Authentication Providers

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Category a configuration belongs to
///
/// Each category keeps its own ordered list; the order is the order in which
/// the server attempts authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Form-based (username/password) providers
    #[serde(rename = "formConfigurations")]
    Form,
    /// Single-sign-on providers
    #[serde(rename = "ssoConfigurations")]
    Sso,
    /// Secondary (multi-factor) providers
    #[serde(rename = "secondaryConfigurations")]
    Secondary,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 3] = [Category::Form, Category::Sso, Category::Secondary];

    /// Wire key used by the backend for this category
    pub fn key(&self) -> &'static str {
        match self {
            Category::Form => "formConfigurations",
            Category::Sso => "ssoConfigurations",
            Category::Secondary => "secondaryConfigurations",
        }
    }

    /// Short name used by the console front-end
    pub fn short_name(&self) -> &'static str {
        match self {
            Category::Form => "form",
            Category::Sso => "sso",
            Category::Secondary => "secondary",
        }
    }

    /// Parse either the wire key or the short name
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(s) || c.short_name().eq_ignore_ascii_case(s))
    }

    /// Whether the last entry of this category is fixed in place
    pub fn has_pinned_tail(&self) -> bool {
        matches!(self, Category::Form)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// One configured authentication provider instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthConfig {
    /// Unique configuration id
    pub configuration: i64,
    /// Provider type tag (e.g. "Database", "CAS", "TOTP")
    pub provider: String,
    /// Whether the configuration is active
    #[serde(default)]
    pub enabled: bool,
    /// Display description
    #[serde(default)]
    pub description: String,
    /// Optional display details (host, domain, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Remaining provider-specific fields, kept as received
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AuthConfig {
    /// Create a configuration with no provider-specific fields
    pub fn new(configuration: i64, provider: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            configuration,
            provider: provider.into(),
            enabled: true,
            description: description.into(),
            details: None,
            extra: Map::new(),
        }
    }

    /// Parse a configuration from its serialized JSON form
    pub fn from_json(serialized: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(serialized)?)
    }

    /// One-line summary for listings
    pub fn summary(&self) -> String {
        let state = if self.enabled { "on" } else { "off" };
        match &self.details {
            Some(details) if !details.is_empty() => format!(
                "#{} [{}] {} ({}) - {}",
                self.configuration, state, self.provider, details, self.description
            ),
            _ => format!(
                "#{} [{}] {} - {}",
                self.configuration, state, self.provider, self.description
            ),
        }
    }
}

/// An available provider type that can be added as a new configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthConfigProvider {
    /// Provider name (matches [`AuthConfig::provider`])
    #[serde(alias = "provider")]
    pub name: String,
    /// Human readable description
    #[serde(default)]
    pub description: String,
    /// Documentation link for the provider
    #[serde(default)]
    pub help_link: Option<String>,
    /// Whether the provider is single-sign-on
    #[serde(default)]
    pub sso: bool,
    /// Field descriptors for the settings form
    #[serde(default)]
    pub settings_fields: Vec<Value>,
}

/// The three ordered configuration lists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryLists {
    /// Form-based configurations; the last entry is the fixed default
    #[serde(default)]
    pub form_configurations: Vec<AuthConfig>,
    /// Single-sign-on configurations
    #[serde(default)]
    pub sso_configurations: Vec<AuthConfig>,
    /// Secondary configurations
    #[serde(default)]
    pub secondary_configurations: Vec<AuthConfig>,
}

impl CategoryLists {
    /// Borrow the list of a category
    pub fn get(&self, category: Category) -> &[AuthConfig] {
        match category {
            Category::Form => &self.form_configurations,
            Category::Sso => &self.sso_configurations,
            Category::Secondary => &self.secondary_configurations,
        }
    }

    /// Mutably borrow the list of a category
    pub fn get_mut(&mut self, category: Category) -> &mut Vec<AuthConfig> {
        match category {
            Category::Form => &mut self.form_configurations,
            Category::Sso => &mut self.sso_configurations,
            Category::Secondary => &mut self.secondary_configurations,
        }
    }

    /// Replace the list of a category
    pub fn set(&mut self, category: Category, configs: Vec<AuthConfig>) {
        *self.get_mut(category) = configs;
    }

    /// Ordered configuration ids of a category
    pub fn ids(&self, category: Category) -> Vec<i64> {
        self.get(category).iter().map(|c| c.configuration).collect()
    }

    /// Find which category holds a configuration id
    pub fn locate(&self, configuration: i64) -> Option<(Category, usize)> {
        Category::ALL.into_iter().find_map(|category| {
            self.get(category)
                .iter()
                .position(|c| c.configuration == configuration)
                .map(|index| (category, index))
        })
    }

    /// Number of primary (form + SSO) configurations
    pub fn auth_count(&self) -> usize {
        self.form_configurations.len() + self.sso_configurations.len()
    }
}
