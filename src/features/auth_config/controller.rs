//! Auth Settings Controller
//!
//! Single source of truth for one editing session. Mediates between the view
//! (through [`AppEvent`]s) and the backend (through [`AuthBackend`]).

use tracing::{debug, error, info, warn};

use crate::app::navigation::{Destination, LeaveGuard};
use crate::domain::{AuthConfig, Category};
use crate::error::{Error, Result};
use crate::eventing::{AppEvent, EventSender};
use crate::i18n::{Locale, t, tf};
use crate::services::AuthBackend;
use crate::state::{DragResult, SessionState};

/// Controller for the authentication settings page
///
/// Every operation takes `&mut self`, so a controller never has two backend
/// requests in flight.
pub struct AuthSettingsController<B> {
    backend: B,
    state: SessionState,
    guard: LeaveGuard,
    events: EventSender,
    locale: Locale,
}

impl<B: AuthBackend> AuthSettingsController<B> {
    /// Create a controller; the session starts unloaded
    pub fn new(backend: B, events: EventSender, locale: Locale) -> Self {
        Self {
            backend,
            state: SessionState::new(),
            guard: LeaveGuard::new(),
            events,
            locale,
        }
    }

    /// Read-only view of the session
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The backend this controller talks to
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Whether unsaved changes exist
    pub fn is_dirty(&self) -> bool {
        self.state.is_dirty()
    }

    /// Whether leaving the page now should ask for confirmation
    pub fn should_warn_before_leave(&self) -> bool {
        self.guard.should_warn(self.state.is_dirty())
    }

    /// Localized unsaved-changes warning, if one should be shown
    pub fn unsaved_changes_warning(&self) -> Option<String> {
        self.state
            .is_dirty()
            .then(|| t(self.locale, "notice.unsaved_changes"))
    }

    fn emit(&self, event: AppEvent) {
        let _ = self.events.send(event);
    }

    fn report(&self, key: &str, err: &Error) {
        let message = err.to_string();
        self.emit(AppEvent::error(tf(self.locale, key, &[("error", message.as_str())])));
    }

    fn dirty_changed(&self, changed: bool) {
        if changed {
            let dirty = self.state.is_dirty();
            debug!(dirty, "Dirtiness changed");
            self.emit(AppEvent::DirtyChanged { dirty });
        }
    }

    // ==================== Initialization ====================

    /// Fetch the initial state and capture the baseline
    pub async fn load_initial_state(&mut self) -> Result<()> {
        self.state.set_loading();

        match self.backend.fetch_initial_state().await {
            Ok(initial) => {
                let count = Category::ALL
                    .into_iter()
                    .map(|c| initial.configurations.get(c).len())
                    .sum::<usize>();
                let can_edit = initial.can_edit;
                self.state.apply_initial(initial);

                info!(count, can_edit, "Authentication settings session loaded");
                self.emit(AppEvent::Loaded { can_edit });
                let count_text = count.to_string();
                self.emit(AppEvent::info(tf(
                    self.locale,
                    "notice.loaded",
                    &[("count", count_text.as_str())],
                )));
                if !can_edit {
                    self.emit(AppEvent::warn(t(self.locale, "notice.read_only")));
                }
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "Failed to load authentication settings");
                self.state.set_error(err.to_string());
                self.report("notice.load_failed", &err);
                Err(err)
            }
        }
    }

    // ==================== Mutations ====================

    /// Flip a boolean global setting; no-op when read-only
    pub fn toggle_global_setting(&mut self, key: &str) -> Result<()> {
        let changed = self.state.toggle_global_setting(key)?;
        debug!(key, value = ?self.state.global_settings().get(key), "Toggled global setting");
        self.dirty_changed(changed);
        Ok(())
    }

    /// Replace a text global setting; no-op when read-only
    pub fn set_global_setting(&mut self, key: &str, value: &str) -> Result<()> {
        let changed = self.state.set_global_setting(key, value)?;
        debug!(key, value, "Set global setting");
        self.dirty_changed(changed);
        Ok(())
    }

    /// Apply a drag gesture to one of the category lists
    pub fn reorder(&mut self, drag: DragResult) -> Result<()> {
        match self.state.reorder(drag) {
            Ok(changed) => {
                debug!(?drag, "Reordered configurations");
                self.dirty_changed(changed);
                Ok(())
            }
            Err(err) => {
                warn!(?drag, error = %err, "Rejected reorder");
                self.report("notice.reorder_failed", &err);
                Err(err)
            }
        }
    }

    /// Delete a configuration on the backend, then drop it locally
    ///
    /// The baseline keeps the deleted entry; removals never count as dirty.
    pub async fn delete_configuration(&mut self, configuration: i64) -> Result<()> {
        if let Err(err) = self.state.check_deletable(configuration) {
            warn!(configuration, error = %err, "Rejected delete");
            self.report("notice.delete_failed", &err);
            return Err(err);
        }

        match self.backend.delete_configuration(configuration).await {
            Ok(()) => {
                let was_dirty = self.state.is_dirty();
                if self.state.remove_configuration(configuration).is_none() {
                    debug!(configuration, "Deleted configuration was not in the session");
                }
                self.dirty_changed(was_dirty != self.state.is_dirty());
                let id = configuration.to_string();
                self.emit(AppEvent::info(tf(self.locale, "notice.deleted", &[("id", id.as_str())])));
                Ok(())
            }
            Err(err) => {
                error!(configuration, error = %err, "Failed to delete configuration");
                self.report("notice.delete_failed", &err);
                Err(err)
            }
        }
    }

    /// Merge a configuration saved by the edit dialog
    ///
    /// `serialized_config` is the JSON the dialog received from the server.
    pub fn add_or_update_configuration(&mut self, serialized_config: &str, category: Category) -> Result<()> {
        let result = AuthConfig::from_json(serialized_config).and_then(|config| {
            let id = config.configuration;
            self.state
                .add_or_update_configuration(config, category)
                .map(|changed| (id, changed))
        });

        match result {
            Ok((id, changed)) => {
                info!(configuration = id, %category, "Configuration added or updated");
                self.dirty_changed(changed);
                let id_text = id.to_string();
                self.emit(AppEvent::info(tf(
                    self.locale,
                    "notice.updated",
                    &[("id", id_text.as_str())],
                )));
                Ok(())
            }
            Err(err) => {
                warn!(%category, error = %err, "Rejected configuration update");
                self.report("notice.update_failed", &err);
                Err(err)
            }
        }
    }

    // ==================== Save ====================

    /// Submit changed orderings and all global settings
    ///
    /// On success the view is sent to the admin console. On failure nothing
    /// local changes and the leave guard is re-armed so the user can retry.
    pub async fn save(&mut self) -> Result<()> {
        if !self.state.can_edit() {
            let err = if self.state.load_state().is_loaded() {
                Error::ReadOnly
            } else {
                Error::NotLoaded
            };
            self.report("notice.save_failed", &err);
            return Err(err);
        }

        self.guard.disarm();

        let request = match self.state.save_request() {
            Ok(request) => request,
            Err(err) => {
                self.guard.rearm();
                self.report("notice.save_failed", &err);
                return Err(err);
            }
        };

        match self.backend.save_settings(&request).await {
            Ok(()) => {
                self.emit(AppEvent::info(t(self.locale, "notice.saved")));
                self.emit(AppEvent::Navigate {
                    destination: Destination::AdminConsole,
                });
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "Failed to save authentication settings");
                self.guard.rearm();
                self.report("notice.save_failed", &err);
                Err(err)
            }
        }
    }

    /// Leave without saving; no backend call
    pub fn cancel(&mut self) {
        debug!(dirty = self.state.is_dirty(), "Cancelled authentication settings");
        self.emit(AppEvent::Navigate {
            destination: Destination::AdminConsole,
        });
    }
}
