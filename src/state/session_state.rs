//! SessionState - Live and Baseline State of One Editing Session

use std::sync::Arc;

use crate::domain::{
    AuthConfig, AuthConfigProvider, Category, CategoryLists, GlobalSettings, InitialState,
    SaveRequest, SettingValue,
};
use crate::error::{Error, Result};
use crate::features::auth_config::ordering;

/// Loading status of the session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Initial fetch in flight
    Loading,
    /// Session is usable
    Loaded,
    /// Initial fetch failed; the session stays unusable
    Error(Arc<str>),
}

impl LoadState {
    /// Check if currently loading
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Check if loaded successfully
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded)
    }

    /// Get error message if any
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Comparison point for dirtiness
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Baseline {
    /// Lists as last loaded (or last committed by an add/update)
    pub configurations: CategoryLists,
    /// Settings as last loaded
    pub global_settings: GlobalSettings,
}

/// Position in a category list, as reported by a drag gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragLocation {
    /// List the position belongs to
    pub category: Category,
    /// Index within that list
    pub index: usize,
}

/// Outcome of a drag gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragResult {
    /// Where the entry was picked up
    pub source: DragLocation,
    /// Where it was dropped, if on a valid target
    pub destination: Option<DragLocation>,
}

impl DragResult {
    /// A drag within one category
    pub fn within(category: Category, from: usize, to: usize) -> Self {
        Self {
            source: DragLocation {
                category,
                index: from,
            },
            destination: Some(DragLocation { category, index: to }),
        }
    }
}

/// All client-side state of one editing session
///
/// Fields are private; every mutation goes through a named method so the
/// cached dirty flag stays in step with the data it summarizes.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    load_state: LoadState,
    configurations: CategoryLists,
    primary_providers: Vec<AuthConfigProvider>,
    secondary_providers: Vec<AuthConfigProvider>,
    global_settings: GlobalSettings,
    help_link: Option<String>,
    can_edit: bool,
    baseline: Baseline,
    dirty: bool,
}

impl SessionState {
    /// Create an empty, unloaded session
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Getters ====================

    /// Current loading state
    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// Whether the initial fetch has not completed
    pub fn is_loading(&self) -> bool {
        !self.load_state.is_loaded()
    }

    /// Live configuration lists
    pub fn configurations(&self) -> &CategoryLists {
        &self.configurations
    }

    /// Live list of one category
    pub fn configs(&self, category: Category) -> &[AuthConfig] {
        self.configurations.get(category)
    }

    /// Provider types for primary configurations
    pub fn primary_providers(&self) -> &[AuthConfigProvider] {
        &self.primary_providers
    }

    /// Provider types for secondary configurations
    pub fn secondary_providers(&self) -> &[AuthConfigProvider] {
        &self.secondary_providers
    }

    /// Live global settings
    pub fn global_settings(&self) -> &GlobalSettings {
        &self.global_settings
    }

    /// Documentation link
    pub fn help_link(&self) -> Option<&str> {
        self.help_link.as_deref()
    }

    /// Whether the user may edit
    pub fn can_edit(&self) -> bool {
        self.can_edit
    }

    /// Baseline snapshot
    pub fn baseline(&self) -> &Baseline {
        &self.baseline
    }

    /// Number of primary (form + SSO) configurations
    pub fn auth_count(&self) -> usize {
        self.configurations.auth_count()
    }

    /// Cached dirtiness, as of the last mutation that recomputes it
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // ==================== Dirtiness ====================

    /// Categories whose live ordering differs from the baseline
    pub fn dirty_categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|category| {
                !ordering::same_ordering(
                    self.configurations.get(*category),
                    self.baseline.configurations.get(*category),
                )
            })
            .collect()
    }

    /// Whether global settings differ from the baseline
    pub fn settings_changed(&self) -> bool {
        !ordering::is_equivalent(&self.global_settings, &self.baseline.global_settings)
    }

    /// Compute dirtiness from scratch
    pub fn compute_dirty(&self) -> bool {
        !self.dirty_categories().is_empty() || self.settings_changed()
    }

    /// Recompute the cached flag; returns whether it changed
    fn refresh_dirty(&mut self) -> bool {
        let dirty = self.compute_dirty();
        let changed = dirty != self.dirty;
        self.dirty = dirty;
        changed
    }

    // ==================== Setters ====================

    /// Mark the initial fetch as started
    pub fn set_loading(&mut self) {
        self.load_state = LoadState::Loading;
    }

    /// Mark the initial fetch as failed
    pub fn set_error(&mut self, message: impl Into<Arc<str>>) {
        self.load_state = LoadState::Error(message.into());
    }

    /// Populate the session and capture the baseline
    pub fn apply_initial(&mut self, initial: InitialState) {
        self.baseline = Baseline {
            configurations: initial.configurations.clone(),
            global_settings: initial.global_settings.clone(),
        };
        self.configurations = initial.configurations;
        self.primary_providers = initial.primary_providers;
        self.secondary_providers = initial.secondary_providers;
        self.global_settings = initial.global_settings;
        self.help_link = initial.help_link;
        self.can_edit = initial.can_edit;
        self.dirty = false;
        self.load_state = LoadState::Loaded;
    }

    fn ensure_editable(&self) -> Result<()> {
        if !self.load_state.is_loaded() {
            return Err(Error::NotLoaded);
        }
        if !self.can_edit {
            return Err(Error::ReadOnly);
        }
        Ok(())
    }

    /// Flip a boolean global setting
    ///
    /// Returns `Ok(false)` without changing anything when the session is
    /// read-only or the setting holds text. Otherwise returns whether the
    /// dirty flag changed.
    pub fn toggle_global_setting(&mut self, key: &str) -> Result<bool> {
        if !self.load_state.is_loaded() {
            return Err(Error::NotLoaded);
        }
        if !self.can_edit {
            return Ok(false);
        }
        if self.global_settings.toggle(key).is_none() {
            return Ok(false);
        }
        Ok(self.refresh_dirty())
    }

    /// Replace a text global setting
    ///
    /// Same read-only behaviour as [`Self::toggle_global_setting`].
    pub fn set_global_setting(&mut self, key: &str, value: impl Into<String>) -> Result<bool> {
        if !self.load_state.is_loaded() {
            return Err(Error::NotLoaded);
        }
        if !self.can_edit {
            return Ok(false);
        }
        if self.global_settings.get(key).and_then(SettingValue::as_flag).is_some() {
            return Err(Error::Invalid {
                message: format!("Setting {key} is a flag; toggle it instead"),
            });
        }
        self.global_settings
            .insert(key, SettingValue::Text(value.into()));
        Ok(self.refresh_dirty())
    }

    /// Apply a drag gesture
    ///
    /// Returns `Ok(false)` for gestures that do nothing: no destination, a
    /// destination in another category, or a read-only session. Otherwise
    /// returns whether the dirty flag changed.
    pub fn reorder(&mut self, drag: DragResult) -> Result<bool> {
        let Some(destination) = drag.destination else {
            return Ok(false);
        };
        if destination.category != drag.source.category {
            return Ok(false);
        }
        if !self.load_state.is_loaded() {
            return Err(Error::NotLoaded);
        }
        if !self.can_edit {
            return Ok(false);
        }

        let category = drag.source.category;
        let items = ordering::reorder(
            self.configurations.get(category),
            category,
            drag.source.index,
            destination.index,
            |c| c.configuration,
        )?;
        self.configurations.set(category, items);
        Ok(self.refresh_dirty())
    }

    /// Check that a configuration may be deleted and find where it lives
    pub fn check_deletable(&self, configuration: i64) -> Result<Option<Category>> {
        self.ensure_editable()?;
        match self.configurations.locate(configuration) {
            Some((category, index))
                if category.has_pinned_tail()
                    && index + 1 == self.configurations.get(category).len() =>
            {
                Err(Error::Pinned {
                    configuration,
                    category,
                })
            }
            Some((category, _)) => Ok(Some(category)),
            None => Ok(None),
        }
    }

    /// Drop a configuration after the backend confirmed the delete
    ///
    /// Matches by id since indices may have shifted while the request was in
    /// flight. The baseline keeps the entry; ordering checks skip it.
    pub fn remove_configuration(&mut self, configuration: i64) -> Option<AuthConfig> {
        let (category, index) = self.configurations.locate(configuration)?;
        let removed = self.configurations.get_mut(category).remove(index);
        self.refresh_dirty();
        Some(removed)
    }

    /// Insert or replace a configuration in both the live list and the baseline
    ///
    /// Each list keeps its own order, so content edits never count as dirty
    /// while a pending reorder stays dirty.
    pub fn add_or_update_configuration(&mut self, config: AuthConfig, category: Category) -> Result<bool> {
        self.ensure_editable()?;

        if let Some((existing, _)) = self.configurations.locate(config.configuration) {
            if existing != category {
                return Err(Error::Invalid {
                    message: format!(
                        "Configuration {} belongs to {}, not {}",
                        config.configuration, existing, category
                    ),
                });
            }
        }

        let baseline = ordering::add_or_update(self.baseline.configurations.get(category), config.clone(), category);
        self.baseline.configurations.set(category, baseline);
        let updated = ordering::add_or_update(self.configurations.get(category), config, category);
        self.configurations.set(category, updated);
        Ok(self.refresh_dirty())
    }

    /// Build the payload for a save
    pub fn save_request(&self) -> Result<SaveRequest> {
        if !self.load_state.is_loaded() {
            return Err(Error::NotLoaded);
        }
        let orderings = self
            .dirty_categories()
            .into_iter()
            .map(|category| {
                (
                    category,
                    ordering::submission_ids(category, self.configurations.get(category)),
                )
            })
            .collect();
        Ok(SaveRequest {
            orderings,
            global_settings: self.global_settings.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::settings::keys;

    fn config(id: i64, provider: &str) -> AuthConfig {
        AuthConfig::new(id, provider, format!("{provider} {id}"))
    }

    fn loaded(can_edit: bool) -> SessionState {
        let mut state = SessionState::new();
        state.apply_initial(InitialState {
            configurations: CategoryLists {
                form_configurations: vec![config(1, "LDAP"), config(2, "LDAP"), config(0, "Database")],
                sso_configurations: vec![config(10, "CAS"), config(11, "SAML")],
                secondary_configurations: vec![config(20, "TOTP")],
            },
            global_settings: [
                (keys::SELF_REGISTRATION, SettingValue::Flag(false)),
                (keys::AUTO_CREATE_ACCOUNTS, SettingValue::Flag(true)),
                (keys::DEFAULT_DOMAIN, SettingValue::Text(String::new())),
            ]
            .into_iter()
            .collect(),
            can_edit,
            ..InitialState::default()
        });
        state
    }

    #[test]
    fn fresh_load_is_clean() {
        let state = loaded(true);
        assert!(state.load_state().is_loaded());
        assert!(!state.is_dirty());
        assert!(!state.compute_dirty());
        assert_eq!(state.auth_count(), 5);
    }

    #[test]
    fn reorder_marks_dirty_and_inverse_clears() {
        let mut state = loaded(true);

        assert!(state.reorder(DragResult::within(Category::Form, 0, 1)).expect("valid"));
        assert_eq!(state.configurations().ids(Category::Form), vec![2, 1, 0]);
        assert!(state.is_dirty());
        assert_eq!(state.dirty_categories(), vec![Category::Form]);

        assert!(state.reorder(DragResult::within(Category::Form, 1, 0)).expect("valid"));
        assert!(!state.is_dirty());
    }

    #[test]
    fn reorder_without_destination_is_noop() {
        let mut state = loaded(true);
        let drag = DragResult {
            destination: None,
            ..DragResult::within(Category::Sso, 0, 1)
        };
        assert!(!state.reorder(drag).expect("noop"));

        let cross = DragResult {
            source: DragLocation {
                category: Category::Sso,
                index: 0,
            },
            destination: Some(DragLocation {
                category: Category::Secondary,
                index: 0,
            }),
        };
        assert!(!state.reorder(cross).expect("noop"));
        assert_eq!(state.configurations().ids(Category::Sso), vec![10, 11]);
    }

    #[test]
    fn reorder_never_passes_form_tail() {
        let mut state = loaded(true);
        state
            .reorder(DragResult::within(Category::Form, 0, 2))
            .expect("clamped");
        assert_eq!(state.configurations().ids(Category::Form), vec![2, 1, 0]);

        let err = state
            .reorder(DragResult::within(Category::Form, 2, 0))
            .expect_err("pinned");
        assert!(matches!(err, Error::Pinned { .. }));
        assert_eq!(state.configurations().ids(Category::Form), vec![2, 1, 0]);
    }

    #[test]
    fn read_only_session_ignores_edits() {
        let mut state = loaded(false);
        assert!(!state.toggle_global_setting(keys::SELF_REGISTRATION).expect("noop"));
        assert!(!state.reorder(DragResult::within(Category::Sso, 0, 1)).expect("noop"));
        assert_eq!(
            state.global_settings().get(keys::SELF_REGISTRATION),
            Some(&SettingValue::Flag(false))
        );
        assert!(matches!(state.check_deletable(10), Err(Error::ReadOnly)));
        assert!(!state.is_dirty());
    }

    #[test]
    fn toggle_twice_restores_cleanliness() {
        let mut state = loaded(true);
        assert!(state.toggle_global_setting(keys::SELF_REGISTRATION).expect("toggled"));
        assert!(state.is_dirty());
        assert!(state.settings_changed());
        assert!(state.toggle_global_setting(keys::SELF_REGISTRATION).expect("toggled"));
        assert!(!state.is_dirty());
    }

    #[test]
    fn toggle_back_keeps_ordering_dirtiness() {
        let mut state = loaded(true);
        state
            .reorder(DragResult::within(Category::Sso, 0, 1))
            .expect("valid");
        assert!(state.is_dirty());

        state.toggle_global_setting(keys::AUTO_CREATE_ACCOUNTS).expect("toggled");
        state.toggle_global_setting(keys::AUTO_CREATE_ACCOUNTS).expect("toggled");
        assert!(state.is_dirty());
    }

    #[test]
    fn text_setting_change_is_dirty() {
        let mut state = loaded(true);
        assert!(state.set_global_setting(keys::DEFAULT_DOMAIN, "example.org").expect("set"));
        assert!(state.is_dirty());
        assert!(state.set_global_setting(keys::DEFAULT_DOMAIN, "").expect("set"));
        assert!(!state.is_dirty());

        let err = state
            .set_global_setting(keys::SELF_REGISTRATION, "yes")
            .expect_err("flag");
        assert!(matches!(err, Error::Invalid { .. }));
    }

    #[test]
    fn add_or_update_never_dirties() {
        let mut state = loaded(true);
        state
            .add_or_update_configuration(config(12, "SAML"), Category::Sso)
            .expect("added");
        let mut edited = config(1, "LDAP");
        edited.enabled = false;
        state
            .add_or_update_configuration(edited, Category::Form)
            .expect("updated");
        state
            .add_or_update_configuration(config(3, "LDAP"), Category::Form)
            .expect("added");

        assert!(!state.is_dirty());
        assert_eq!(state.configurations().ids(Category::Form), vec![1, 2, 3, 0]);
        assert_eq!(state.configurations().ids(Category::Sso), vec![10, 11, 12]);
        assert!(!state.configs(Category::Form)[0].enabled);
    }

    #[test]
    fn add_or_update_after_reorder_keeps_ordering_dirty() {
        let mut state = loaded(true);
        state
            .reorder(DragResult::within(Category::Sso, 0, 1))
            .expect("valid");
        assert!(state.is_dirty());

        let mut edited = config(10, "CAS");
        edited.description = "Campus CAS".to_string();
        state
            .add_or_update_configuration(edited, Category::Sso)
            .expect("updated");
        state
            .add_or_update_configuration(config(12, "SAML"), Category::Sso)
            .expect("added");

        assert!(state.is_dirty());
        assert_eq!(state.configurations().ids(Category::Sso), vec![11, 10, 12]);
        assert_eq!(state.baseline().configurations.ids(Category::Sso), vec![10, 11, 12]);
        assert_eq!(state.configs(Category::Sso)[1].description, "Campus CAS");

        let request = state.save_request().expect("loaded");
        assert_eq!(request.ordering(Category::Sso), Some("11,10,12"));
    }

    #[test]
    fn new_form_entry_lands_before_tail_in_baseline() {
        let mut state = loaded(true);
        state
            .reorder(DragResult::within(Category::Form, 0, 1))
            .expect("valid");
        state
            .add_or_update_configuration(config(3, "LDAP"), Category::Form)
            .expect("added");

        assert_eq!(state.configurations().ids(Category::Form), vec![2, 1, 3, 0]);
        assert_eq!(state.baseline().configurations.ids(Category::Form), vec![1, 2, 3, 0]);
        assert!(state.is_dirty());

        state
            .reorder(DragResult::within(Category::Form, 1, 0))
            .expect("valid");
        assert!(!state.is_dirty());
    }

    #[test]
    fn add_or_update_rejects_category_mismatch() {
        let mut state = loaded(true);
        let err = state
            .add_or_update_configuration(config(10, "CAS"), Category::Secondary)
            .expect_err("wrong category");
        assert!(matches!(err, Error::Invalid { .. }));
    }

    #[test]
    fn delete_checks_pinned_tail_and_removes_by_id() {
        let mut state = loaded(true);
        assert!(matches!(state.check_deletable(0), Err(Error::Pinned { .. })));
        assert_eq!(state.check_deletable(11).expect("deletable"), Some(Category::Sso));
        assert_eq!(state.check_deletable(99).expect("unknown"), None);

        state
            .reorder(DragResult::within(Category::Sso, 1, 0))
            .expect("valid");
        assert!(state.is_dirty());
        let removed = state.remove_configuration(11).expect("present");
        assert_eq!(removed.configuration, 11);
        assert_eq!(state.configurations().ids(Category::Sso), vec![10]);
        assert_eq!(state.baseline().configurations.ids(Category::Sso), vec![10, 11]);
        assert!(!state.is_dirty());
        assert_eq!(state.is_dirty(), state.compute_dirty());
    }

    #[test]
    fn delete_then_toggle_back_stays_clean() {
        let mut state = loaded(true);
        state.remove_configuration(10).expect("present");
        assert!(!state.is_dirty());
        assert!(state.dirty_categories().is_empty());

        state.toggle_global_setting(keys::SELF_REGISTRATION).expect("toggled");
        assert!(state.is_dirty());
        state.toggle_global_setting(keys::SELF_REGISTRATION).expect("toggled");
        assert!(!state.is_dirty());
        assert_eq!(state.save_request().expect("loaded").ordering(Category::Sso), None);
    }

    #[test]
    fn delete_then_inverse_reorder_stays_clean() {
        let mut state = loaded(true);
        state.remove_configuration(2).expect("present");
        assert_eq!(state.configurations().ids(Category::Form), vec![1, 0]);

        state
            .add_or_update_configuration(config(3, "LDAP"), Category::Form)
            .expect("added");
        state
            .reorder(DragResult::within(Category::Form, 0, 1))
            .expect("valid");
        assert!(state.is_dirty());
        state
            .reorder(DragResult::within(Category::Form, 1, 0))
            .expect("valid");
        assert!(!state.is_dirty());
        assert_eq!(state.is_dirty(), state.compute_dirty());
    }

    #[test]
    fn save_request_lists_only_changed_orderings() {
        let mut state = loaded(true);
        state
            .reorder(DragResult::within(Category::Form, 0, 1))
            .expect("valid");
        state.toggle_global_setting(keys::SELF_REGISTRATION).expect("toggled");

        let request = state.save_request().expect("loaded");
        assert_eq!(request.ordering(Category::Form), Some("2,1"));
        assert_eq!(request.ordering(Category::Sso), None);
        assert_eq!(request.ordering(Category::Secondary), None);
        assert_eq!(
            request.global_settings.get(keys::SELF_REGISTRATION),
            Some(&SettingValue::Flag(true))
        );
        assert_eq!(request.global_settings.len(), 3);
    }

    #[test]
    fn unloaded_session_rejects_edits() {
        let mut state = SessionState::new();
        assert!(state.is_loading());
        assert!(matches!(state.toggle_global_setting("x"), Err(Error::NotLoaded)));
        assert!(matches!(state.save_request(), Err(Error::NotLoaded)));

        state.set_error("boom");
        assert_eq!(state.load_state().error_message(), Some("boom"));
        assert!(state.is_loading());
    }
}
