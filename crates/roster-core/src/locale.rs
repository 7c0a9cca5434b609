//! # Locale
//!
//! Locale preference persisted to local storage, plus a small message catalog
//! with key lookup. Nothing beyond key lookup: no plurals, no interpolation.

use crate::primitives::LOCALE_STORAGE_KEY;
use crate::storage::KeyValueStore;
use crate::RosterError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Supported locales. French is the fallback.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    #[default]
    Fr,
}

impl Locale {
    /// Two-letter code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
        }
    }

    /// Locale for a BCP 47 tag such as `en-GB`, by primary subtag.
    #[must_use]
    pub fn from_language_tag(tag: &str) -> Option<Self> {
        let primary = tag.split(['-', '_', '.']).next().unwrap_or_default();
        primary.to_ascii_lowercase().parse().ok()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Self::En),
            "fr" => Ok(Self::Fr),
            other => Err(RosterError::Validation(format!(
                "Unsupported locale: {other}"
            ))),
        }
    }
}

/// The locale to start with.
///
/// Order: a valid stored code, then the browser/system language, then `fr`.
#[must_use]
pub fn stored_locale(storage: &dyn KeyValueStore, browser_language: Option<&str>) -> Locale {
    if let Ok(Some(stored)) = storage.get(LOCALE_STORAGE_KEY)
        && let Ok(locale) = stored.parse()
    {
        return locale;
    }
    browser_language
        .and_then(Locale::from_language_tag)
        .unwrap_or_default()
}

/// Persist the locale choice.
pub fn set_locale(storage: &mut dyn KeyValueStore, locale: Locale) -> Result<(), RosterError> {
    storage.set(LOCALE_STORAGE_KEY, locale.code())
}

// =============================================================================
// MESSAGE CATALOG
// =============================================================================

/// Translated strings keyed by dotted message key.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    messages: BTreeMap<(Locale, &'static str), &'static str>,
}

const BUILTIN: &[(&str, &str, &str)] = &[
    ("nav.home", "Home", "Accueil"),
    ("nav.login", "Sign in", "Connexion"),
    ("nav.dashboard", "Dashboard", "Tableau de bord"),
    ("nav.users", "Users", "Utilisateurs"),
    ("nav.products", "Products", "Produits"),
    ("nav.sonner", "Sonner - Toast Notifications", "Sonner - Notifications"),
    ("nav.popover", "Popover", "Popover"),
    ("nav.dialog", "Dialog", "Dialogue"),
    ("nav.input_group", "Input Group", "Groupe de champs"),
    ("nav.form_validation", "Form Validation", "Validation de formulaire"),
    ("nav.workflow_crud", "CRUD Workflow", "Workflow CRUD"),
    ("nav.workflow_multi_step", "Multi-Step Form", "Formulaire multi-étapes"),
    ("nav.workflow_cart", "Shopping Cart", "Panier"),
];

impl Catalog {
    /// An empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog shipped with the application.
    #[must_use]
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for (key, en, fr) in BUILTIN {
            catalog.insert(Locale::En, key, en);
            catalog.insert(Locale::Fr, key, fr);
        }
        catalog
    }

    pub fn insert(&mut self, locale: Locale, key: &'static str, message: &'static str) {
        self.messages.insert((locale, key), message);
    }

    /// Look up `key`, falling back to French, then to the key itself.
    #[must_use]
    pub fn lookup<'a>(&self, locale: Locale, key: &'a str) -> &'a str {
        self.messages
            .iter()
            .find(|((l, k), _)| *l == locale && *k == key)
            .or_else(|| {
                self.messages
                    .iter()
                    .find(|((l, k), _)| *l == Locale::Fr && *k == key)
            })
            .map(|(_, message)| *message)
            .unwrap_or(key)
    }
}
