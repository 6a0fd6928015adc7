//! Console Profiles
//!
//! Server connection profiles and their persistence.

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, PROFILES_FILE, PROFILE_ENV};
use crate::error::{Error, Result};
use crate::helpers::{decrypt, encrypt, get_or_create_config_dir};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Connection profile for one server
#[derive(Debug, Deserialize, Clone, Serialize, Eq, PartialEq)]
pub struct ConsoleProfile {
    /// Unique identifier (UUID)
    pub id: String,
    /// Profile name (user-visible)
    pub name: String,
    /// Server root, e.g. `https://server.example.org/labkey`
    pub base_url: String,
    /// Container path the settings page lives under (empty for root)
    #[serde(default)]
    pub container: String,
    /// API key (encrypted storage)
    pub api_key: Option<String>,
    /// CSRF token for state-changing requests (encrypted storage)
    pub csrf_token: Option<String>,
    /// HTTP timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Locale override, e.g. "en" or "zh-CN"
    pub locale: Option<String>,
    /// Last update timestamp (RFC3339)
    pub updated_at: Option<String>,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ConsoleProfile {
    fn default() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: "local".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            container: String::new(),
            api_key: None,
            csrf_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            locale: None,
            updated_at: None,
        }
    }
}

/// TOML wrapper structure for the profile list
#[derive(Debug, Default, Deserialize, Clone, Serialize)]
pub(crate) struct ConsoleProfiles {
    #[serde(default)]
    profiles: Vec<ConsoleProfile>,
}

impl ConsoleProfile {
    /// Create a profile for a server
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Generate display name (e.g., "prod (https://server/labkey)")
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            self.base_url.clone()
        } else {
            format!("{} ({})", self.name, self.base_url)
        }
    }

    /// Check the profile can be used to build a client
    pub fn validate(&self) -> Result<()> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::Invalid {
                message: format!("Base URL must start with http:// or https://: {url}"),
            });
        }
        if self.timeout_secs == 0 {
            return Err(Error::Invalid {
                message: "Timeout must be at least one second".to_string(),
            });
        }
        Ok(())
    }
}

/// Get the profile file path in the config directory
fn get_profiles_path() -> Result<PathBuf> {
    let config_dir = get_or_create_config_dir()?;
    let path = config_dir.join(PROFILES_FILE);

    #[cfg(debug_assertions)]
    info!("Profile file: {}", path.display());

    Ok(path)
}

/// Load profiles from a file, decrypting secrets
pub fn load_profiles_from(path: &Path) -> Result<Vec<ConsoleProfile>> {
    if !path.exists() {
        return Ok(vec![]);
    }
    let value = std::fs::read_to_string(path)?;

    if value.trim().is_empty() {
        return Ok(vec![]);
    }

    let stored: ConsoleProfiles = toml::from_str(&value)?;
    let mut profiles = stored.profiles;

    for profile in profiles.iter_mut() {
        profile.api_key = reveal(profile.api_key.take(), &profile.name);
        profile.csrf_token = reveal(profile.csrf_token.take(), &profile.name);
    }

    Ok(profiles)
}

/// Save profiles to a file, encrypting secrets
pub fn save_profiles_to(path: &Path, mut profiles: Vec<ConsoleProfile>) -> Result<()> {
    let now = chrono::Utc::now().to_rfc3339();
    for profile in profiles.iter_mut() {
        profile.api_key = conceal(profile.api_key.take())?;
        profile.csrf_token = conceal(profile.csrf_token.take())?;
        profile.updated_at = Some(now.clone());
    }

    let content = toml::to_string_pretty(&ConsoleProfiles { profiles })?;
    std::fs::write(path, content)?;

    Ok(())
}

/// Load all profiles from the config directory
pub fn get_profiles() -> Result<Vec<ConsoleProfile>> {
    load_profiles_from(&get_profiles_path()?)
}

/// Save all profiles to the config directory
pub fn save_profiles(profiles: Vec<ConsoleProfile>) -> Result<()> {
    save_profiles_to(&get_profiles_path()?, profiles)
}

/// Pick a profile from `profiles`
///
/// A requested name must exist. Without one the first profile wins, and an
/// empty list falls back to a local default.
pub fn choose_profile(profiles: Vec<ConsoleProfile>, requested: Option<&str>) -> Result<ConsoleProfile> {
    match requested.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => profiles
            .into_iter()
            .find(|p| p.name == name)
            .ok_or_else(|| Error::Invalid {
                message: format!("Profile not found: {name}"),
            }),
        None => Ok(profiles.into_iter().next().unwrap_or_default()),
    }
}

/// Select the profile named by the environment, or the first stored one
///
/// On first run the local default is written out so there is a file to edit.
pub fn select_profile() -> Result<ConsoleProfile> {
    let requested = std::env::var(PROFILE_ENV).ok();
    let profiles = get_profiles()?;
    if profiles.is_empty() && requested.is_none() {
        let profile = ConsoleProfile::default();
        save_profiles(vec![profile.clone()])?;
        info!(profile = %profile.display_name(), "Created default connection profile");
        return Ok(profile);
    }
    let profile = choose_profile(profiles, requested.as_deref())?;
    info!(profile = %profile.display_name(), "Selected connection profile");
    Ok(profile)
}

fn reveal(secret: Option<String>, profile: &str) -> Option<String> {
    secret.map(|value| {
        decrypt(&value).unwrap_or_else(|_| {
            warn!(profile, "Stored secret is not encrypted, using it as-is");
            value
        })
    })
}

fn conceal(secret: Option<String>) -> Result<Option<String>> {
    match secret {
        Some(value) if !value.is_empty() => Ok(Some(encrypt(&value)?)),
        _ => Ok(None),
    }
}
