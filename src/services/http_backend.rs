//! HTTP Backend
//!
//! Talks to the server's `login` controller actions over HTTP.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use tracing::{debug, info};

use crate::app::navigation::Destination;
use crate::connection::ConsoleProfile;
use crate::constants::{
    API_KEY_USER, CSRF_HEADER, DELETE_CONFIGURATION_ACTION, INITIAL_MOUNT_ACTION,
    LOGIN_CONTROLLER, SAVE_SETTINGS_ACTION,
};
use crate::domain::{InitialState, SaveRequest};
use crate::error::{Error, Result};
use crate::helpers::mask_secret;

use super::AuthBackend;

/// Envelope some actions wrap their result in
#[derive(Debug, Deserialize)]
struct ApiResponse {
    success: Option<bool>,
    exception: Option<String>,
}

/// Backend reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    container: String,
    api_key: Option<String>,
    csrf_token: Option<String>,
}

impl HttpBackend {
    /// Create a backend for a profile
    pub fn new(profile: &ConsoleProfile) -> Result<Self> {
        profile.validate()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(profile.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let backend = Self {
            client,
            base_url: profile.base_url.trim().trim_end_matches('/').to_string(),
            container: profile.container.trim().trim_matches('/').to_string(),
            api_key: profile.api_key.clone().filter(|k| !k.is_empty()),
            csrf_token: profile.csrf_token.clone().filter(|t| !t.is_empty()),
        };

        debug!(
            base_url = %backend.base_url,
            container = %backend.container,
            api_key = %backend.api_key.as_deref().map(mask_secret).unwrap_or_default(),
            "Created HTTP backend"
        );
        Ok(backend)
    }

    /// URL of a controller action, in `controller-action.view` style
    pub fn action_url(&self, controller: &str, action: &str) -> String {
        if self.container.is_empty() {
            format!("{}/{controller}-{action}.view", self.base_url)
        } else {
            format!("{}/{}/{controller}-{action}.view", self.base_url, self.container)
        }
    }

    /// URL of a navigation destination
    pub fn destination_url(&self, destination: Destination) -> String {
        let (controller, action) = destination.route();
        self.action_url(controller, action)
    }

    fn request(&self, method: Method, action: &str) -> RequestBuilder {
        let is_post = method == Method::POST;
        let mut builder = self
            .client
            .request(method, self.action_url(LOGIN_CONTROLLER, action));

        if let Some(key) = &self.api_key {
            builder = builder.basic_auth(API_KEY_USER, Some(key));
        }
        if is_post {
            if let Some(token) = &self.csrf_token {
                builder = builder.header(CSRF_HEADER, token);
            }
        }
        builder
    }

    /// Turn non-success statuses and failure envelopes into errors
    async fn check(response: Response) -> Result<String> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Error::from_status(status, body));
        }

        if let Ok(envelope) = serde_json::from_str::<ApiResponse>(&body) {
            if envelope.success == Some(false) || envelope.exception.is_some() {
                return Err(Error::Status {
                    status: status.as_u16(),
                    message: envelope
                        .exception
                        .unwrap_or_else(|| "Request was not successful".to_string()),
                });
            }
        }

        Ok(body)
    }
}

impl AuthBackend for HttpBackend {
    async fn fetch_initial_state(&self) -> Result<InitialState> {
        debug!("Fetching initial authentication state");
        let response = self.request(Method::GET, INITIAL_MOUNT_ACTION).send().await?;
        let body = Self::check(response).await?;
        let state: InitialState = serde_json::from_str(&body)?;

        info!(
            form = state.configurations.form_configurations.len(),
            sso = state.configurations.sso_configurations.len(),
            secondary = state.configurations.secondary_configurations.len(),
            can_edit = state.can_edit,
            "Loaded authentication configurations"
        );
        Ok(state)
    }

    async fn save_settings(&self, request: &SaveRequest) -> Result<()> {
        let form = request.to_form_pairs();
        debug!(fields = form.len(), "Saving authentication settings");

        let response = self
            .request(Method::POST, SAVE_SETTINGS_ACTION)
            .form(&form)
            .send()
            .await?;
        Self::check(response).await?;

        info!(
            changed_orderings = request.orderings.len(),
            "Saved authentication settings"
        );
        Ok(())
    }

    async fn delete_configuration(&self, configuration: i64) -> Result<()> {
        debug!(configuration, "Deleting authentication configuration");

        let response = self
            .request(Method::POST, DELETE_CONFIGURATION_ACTION)
            .form(&[("configuration", configuration.to_string())])
            .send()
            .await?;
        Self::check(response).await?;

        info!(configuration, "Deleted authentication configuration");
        Ok(())
    }
}
