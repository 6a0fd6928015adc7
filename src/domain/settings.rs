//! Global authentication settings

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Well-known setting keys
pub mod keys {
    /// Allow users to register themselves
    pub const SELF_REGISTRATION: &str = "SelfRegistration";
    /// Allow users to change their own email address
    pub const SELF_SERVICE_EMAIL_CHANGES: &str = "SelfServiceEmailChanges";
    /// Create accounts for users authenticated by external providers
    pub const AUTO_CREATE_ACCOUNTS: &str = "AutoCreateAccounts";
    /// Default email domain for new accounts
    pub const DEFAULT_DOMAIN: &str = "DefaultDomain";
}

/// A single setting value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    /// Checkbox-style flag
    Flag(bool),
    /// Free text value
    Text(String),
}

impl SettingValue {
    /// Value as submitted in the save form
    pub fn to_form_value(&self) -> String {
        match self {
            SettingValue::Flag(flag) => flag.to_string(),
            SettingValue::Text(text) => text.clone(),
        }
    }

    /// The flag, if this is a boolean setting
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            SettingValue::Flag(flag) => Some(*flag),
            SettingValue::Text(_) => None,
        }
    }
}

impl std::fmt::Display for SettingValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_form_value())
    }
}

/// Mapping from setting key to value
///
/// Equality is by key and value; the order keys were inserted in does not
/// matter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobalSettings(BTreeMap<String, SettingValue>);

impl GlobalSettings {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a setting
    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.0.get(key)
    }

    /// Insert or replace a setting
    pub fn insert(&mut self, key: impl Into<String>, value: SettingValue) {
        self.0.insert(key.into(), value);
    }

    /// Flip a boolean setting
    ///
    /// Missing keys are treated as `false`, so the first toggle turns them on.
    /// Returns the new value, or `None` if the setting holds text.
    pub fn toggle(&mut self, key: &str) -> Option<bool> {
        let entry = self
            .0
            .entry(key.to_string())
            .or_insert(SettingValue::Flag(false));
        match entry {
            SettingValue::Flag(flag) => {
                *flag = !*flag;
                Some(*flag)
            }
            SettingValue::Text(_) => None,
        }
    }

    /// Iterate settings in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Key/value pairs as submitted to the backend
    pub fn to_form_pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), v.to_form_value()))
            .collect()
    }

    /// Number of settings
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no settings
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, SettingValue)> for GlobalSettings {
    fn from_iter<I: IntoIterator<Item = (K, SettingValue)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_mixed_values() {
        let settings: GlobalSettings = serde_json::from_str(
            r#"{"SelfRegistration": true, "AutoCreateAccounts": false, "DefaultDomain": "example.org"}"#,
        )
        .expect("valid settings");

        assert_eq!(settings.get(keys::SELF_REGISTRATION), Some(&SettingValue::Flag(true)));
        assert_eq!(
            settings.get(keys::DEFAULT_DOMAIN),
            Some(&SettingValue::Text("example.org".to_string()))
        );
    }

    #[test]
    fn toggle_flips_flags_only() {
        let mut settings: GlobalSettings = [
            ("a", SettingValue::Flag(true)),
            ("domain", SettingValue::Text("x".to_string())),
        ]
        .into_iter()
        .collect();

        assert_eq!(settings.toggle("a"), Some(false));
        assert_eq!(settings.toggle("domain"), None);
        assert_eq!(settings.toggle("missing"), Some(true));
    }

    #[test]
    fn form_pairs_render_booleans_as_text() {
        let settings: GlobalSettings = [("SelfRegistration", SettingValue::Flag(false))]
            .into_iter()
            .collect();
        assert_eq!(
            settings.to_form_pairs(),
            vec![("SelfRegistration".to_string(), "false".to_string())]
        );
    }
}
