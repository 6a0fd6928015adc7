//! i18n - Internationalization Module
//!
//! Translations live in `locales/*.yml` and are compiled in by `rust-i18n`.

use std::borrow::Cow;

/// Supported locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    /// English
    #[default]
    En,
    /// Chinese (Simplified)
    ZhCN,
}

impl Locale {
    /// Locale code as used by the translation files
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::ZhCN => "zh-CN",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::ZhCN => "中文",
        }
    }

    /// Parse a locale tag such as `zh-CN`, `zh_CN.UTF-8` or `en-US`
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_ascii_lowercase().replace('_', "-");
        if tag.starts_with("zh") {
            Some(Locale::ZhCN)
        } else if tag.starts_with("en") {
            Some(Locale::En)
        } else {
            None
        }
    }

    /// Locale of the current user, falling back to English
    pub fn detect() -> Self {
        let user = locale_config::Locale::user_default();
        user.tags()
            .find_map(|(_, tag)| Self::from_tag(&tag.to_string()))
            .unwrap_or_default()
    }
}

/// Translate a key
pub fn t(locale: Locale, key: &str) -> String {
    rust_i18n::t!(key, locale = locale.code()).into_owned()
}

/// Translate a key and fill `%{name}` placeholders
///
/// # Example
/// ```ignore
/// // With translation `deleted: "Deleted configuration %{id}."`
/// tf(Locale::En, "notice.deleted", &[("id", "7")])
/// // Returns "Deleted configuration 7."
/// ```
pub fn tf(locale: Locale, key: &str, args: &[(&str, &str)]) -> String {
    let mut result: Cow<'_, str> = rust_i18n::t!(key, locale = locale.code());
    for (name, value) in args {
        result = Cow::Owned(result.replace(&format!("%{{{name}}}"), value));
    }
    result.into_owned()
}
