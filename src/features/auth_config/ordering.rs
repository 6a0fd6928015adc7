//! Ordering helpers for configuration lists
//!
//! Pure functions over category lists: moving entries, comparing orderings
//! and merging edited configurations back in.

use crate::domain::{AuthConfig, Category};
use crate::error::{Error, Result};

/// Identity of a configuration for ordering comparisons
pub fn ordering_of(configs: &[AuthConfig]) -> Vec<i64> {
    configs.iter().map(|c| c.configuration).collect()
}

/// Deep value equality used for every dirtiness check
///
/// Sequences compare element by element in order; maps compare by key and
/// value, so insertion order of keys never matters.
pub fn is_equivalent<T: PartialEq + ?Sized>(current: &T, baseline: &T) -> bool {
    current == baseline
}

/// Whether two lists hold the same configuration ids in the same order
///
/// Baseline entries missing from `current` are skipped, so a deleted
/// configuration never counts as an ordering change.
pub fn same_ordering(current: &[AuthConfig], baseline: &[AuthConfig]) -> bool {
    let live = ordering_of(current);
    let surviving: Vec<i64> = ordering_of(baseline)
        .into_iter()
        .filter(|id| live.contains(id))
        .collect();
    is_equivalent(live.as_slice(), surviving.as_slice())
}

/// Highest index an entry may be moved to within a category
///
/// In the form category the last slot belongs to the fixed default entry.
pub fn last_movable_index(category: Category, len: usize) -> Option<usize> {
    let movable = if category.has_pinned_tail() {
        len.saturating_sub(1)
    } else {
        len
    };
    movable.checked_sub(1)
}

/// Move the entry at `from` to `to`, shifting the entries in between
///
/// Destinations past the last movable slot are clamped to it. Moving the
/// pinned trailing entry of the form category is rejected.
pub fn reorder<T: Clone>(
    items: &[T],
    category: Category,
    from: usize,
    to: usize,
    id_of: impl Fn(&T) -> i64,
) -> Result<Vec<T>> {
    let len = items.len();
    if from >= len {
        return Err(Error::OutOfRange {
            category,
            index: from,
            len,
        });
    }
    if to >= len {
        return Err(Error::OutOfRange {
            category,
            index: to,
            len,
        });
    }

    let Some(last) = last_movable_index(category, len) else {
        return Err(Error::Pinned {
            configuration: id_of(&items[from]),
            category,
        });
    };
    if from > last {
        return Err(Error::Pinned {
            configuration: id_of(&items[from]),
            category,
        });
    }

    let to = to.min(last);
    let mut result = items.to_vec();
    let moved = result.remove(from);
    result.insert(to, moved);
    Ok(result)
}

/// Comma-joined ids of a list as submitted on save
///
/// The fixed trailing entry of the form category is left out; its position
/// is not the administrator's to change.
pub fn submission_ids(category: Category, configs: &[AuthConfig]) -> String {
    let ids = ordering_of(configs);
    let ids = if category.has_pinned_tail() {
        &ids[..ids.len().saturating_sub(1)]
    } else {
        &ids[..]
    };
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Insert a new configuration or replace the one with the same id
///
/// New form configurations go in front of the fixed default entry; other
/// categories append.
pub fn add_or_update(configs: &[AuthConfig], config: AuthConfig, category: Category) -> Vec<AuthConfig> {
    let mut result = configs.to_vec();
    match result
        .iter()
        .position(|c| c.configuration == config.configuration)
    {
        Some(index) => result[index] = config,
        None if category.has_pinned_tail() && !result.is_empty() => {
            let at = result.len() - 1;
            result.insert(at, config);
        }
        None => result.push(config),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GlobalSettings, SettingValue};

    fn configs(ids: &[i64]) -> Vec<AuthConfig> {
        ids.iter()
            .map(|id| AuthConfig::new(*id, "LDAP", format!("config {id}")))
            .collect()
    }

    fn move_ids(ids: &[i64], category: Category, from: usize, to: usize) -> Result<Vec<i64>> {
        reorder(&configs(ids), category, from, to, |c| c.configuration).map(|v| ordering_of(&v))
    }

    #[test]
    fn reorder_shifts_intermediate_entries() {
        assert_eq!(move_ids(&[1, 2, 3, 4], Category::Sso, 0, 2).expect("valid"), vec![2, 3, 1, 4]);
        assert_eq!(move_ids(&[1, 2, 3, 4], Category::Sso, 3, 0).expect("valid"), vec![4, 1, 2, 3]);
        assert_eq!(move_ids(&[1, 2, 3], Category::Secondary, 1, 1).expect("valid"), vec![1, 2, 3]);
    }

    #[test]
    fn reorder_keeps_form_tail_in_place() {
        // Destination on the pinned slot is clamped to the slot before it.
        assert_eq!(move_ids(&[1, 2, 0], Category::Form, 0, 2).expect("clamped"), vec![2, 1, 0]);

        let err = move_ids(&[1, 2, 0], Category::Form, 2, 0).expect_err("tail is pinned");
        assert!(matches!(err, Error::Pinned { configuration: 0, .. }));

        let err = move_ids(&[0], Category::Form, 0, 0).expect_err("only the default");
        assert!(matches!(err, Error::Pinned { .. }));
    }

    #[test]
    fn reorder_rejects_out_of_range() {
        let err = move_ids(&[1, 2], Category::Sso, 5, 0).expect_err("source out of range");
        assert!(matches!(err, Error::OutOfRange { index: 5, len: 2, .. }));

        let err = move_ids(&[1, 2], Category::Sso, 0, 2).expect_err("destination out of range");
        assert!(matches!(err, Error::OutOfRange { index: 2, .. }));
    }

    #[test]
    fn inverse_moves_restore_ordering() {
        let original = configs(&[5, 6, 7, 8]);
        let moved = reorder(&original, Category::Sso, 0, 3, |c| c.configuration).expect("valid");
        let moved = reorder(&moved, Category::Sso, 1, 0, |c| c.configuration).expect("valid");
        assert!(!same_ordering(&moved, &original));

        let back = reorder(&moved, Category::Sso, 0, 1, |c| c.configuration).expect("valid");
        let back = reorder(&back, Category::Sso, 3, 0, |c| c.configuration).expect("valid");
        assert!(same_ordering(&back, &original));
    }

    #[test]
    fn deleted_entries_do_not_change_ordering() {
        let baseline = configs(&[5, 6, 7]);
        assert!(same_ordering(&configs(&[5, 7]), &baseline));
        assert!(!same_ordering(&configs(&[7, 5]), &baseline));
        assert!(!same_ordering(&configs(&[5, 6, 7, 8]), &baseline));
    }

    #[test]
    fn submission_drops_only_form_tail() {
        assert_eq!(submission_ids(Category::Form, &configs(&[2, 1, 0])), "2,1");
        assert_eq!(submission_ids(Category::Form, &configs(&[0])), "");
        assert_eq!(submission_ids(Category::Sso, &configs(&[7, 3])), "7,3");
        assert_eq!(submission_ids(Category::Secondary, &[]), "");
    }

    #[test]
    fn add_or_update_replaces_by_id() {
        let mut edited = AuthConfig::new(2, "LDAP", "renamed");
        edited.enabled = false;

        let result = add_or_update(&configs(&[1, 2, 0]), edited.clone(), Category::Form);
        assert_eq!(ordering_of(&result), vec![1, 2, 0]);
        assert_eq!(result[1], edited);
    }

    #[test]
    fn add_or_update_inserts_before_form_tail() {
        let result = add_or_update(&configs(&[1, 0]), AuthConfig::new(8, "LDAP", "new"), Category::Form);
        assert_eq!(ordering_of(&result), vec![1, 8, 0]);

        let result = add_or_update(&configs(&[4]), AuthConfig::new(8, "SAML", "new"), Category::Sso);
        assert_eq!(ordering_of(&result), vec![4, 8]);
    }

    #[test]
    fn settings_equivalence_ignores_key_order() {
        let mut a = GlobalSettings::new();
        a.insert("a", SettingValue::Flag(true));
        a.insert("b", SettingValue::Flag(false));

        let mut b = GlobalSettings::new();
        b.insert("b", SettingValue::Flag(false));
        b.insert("a", SettingValue::Flag(true));

        assert!(is_equivalent(&a, &b));

        b.insert("a", SettingValue::Flag(false));
        assert!(!is_equivalent(&a, &b));
    }
}
