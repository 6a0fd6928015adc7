//! Constants
//!
//! Backend routes, storage names and limits shared across the crate.

/// Server controller hosting the authentication actions
pub const LOGIN_CONTROLLER: &str = "login";
/// Action returning the initial page state
pub const INITIAL_MOUNT_ACTION: &str = "initialMount";
/// Action persisting orderings and global settings
pub const SAVE_SETTINGS_ACTION: &str = "saveSettings";
/// Action deleting one configuration
pub const DELETE_CONFIGURATION_ACTION: &str = "deleteConfiguration";

/// Controller and action of the page shown after save or cancel
pub const ADMIN_CONTROLLER: &str = "admin";
pub const SHOW_ADMIN_ACTION: &str = "showAdmin";

/// Header carrying the CSRF token on state-changing requests
pub const CSRF_HEADER: &str = "X-LABKEY-CSRF";
/// Basic-auth user name used when authenticating with an API key
pub const API_KEY_USER: &str = "apikey";

/// Default HTTP timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Default server when no profile is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/labkey";

/// Profile storage file name
pub const PROFILES_FILE: &str = "profiles.toml";
/// Environment variable selecting a profile by name
pub const PROFILE_ENV: &str = "AUTHCFG_PROFILE";
/// Log file prefix in the data directory
pub const LOG_FILE_PREFIX: &str = "authcfg-console.log";

/// Pending notice buffer capacity
pub const NOTICE_CAPACITY: usize = 200;
