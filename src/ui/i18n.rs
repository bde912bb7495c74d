//! Message table - Localized strings looked up by dotted key path.
//!
//! Templates may contain `{token}` placeholders that are substituted at lookup time.
//! A missing key resolves to the key itself so untranslated text is visible on screen
//! rather than silently blank.

use crate::core::fields::{FieldError, camel_case};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tracing::warn;

/// Built-in English messages
const ENGLISH: &[(&str, &str)] = &[
    ("app.title", "Invoicer"),
    ("app.nav.clients", "Clients"),
    ("app.nav.catalog", "Catalog"),
    ("common.create", "Create"),
    ("common.save", "Save"),
    ("common.saving", "Saving..."),
    ("common.retry", "Retry"),
    ("common.close", "Close"),
    ("common.cancel", "Cancel"),
    ("common.unexpectedError", "Something went wrong. Please try again."),
    ("clients.page.title", "Manage your clients"),
    ("clients.page.loading", "Loading clients..."),
    ("clients.page.empty", "No clients yet."),
    ("clients.validation.nameRequired", "Name is required"),
    ("clients.validation.nameTooLong", "Name must be at most {max} characters"),
    ("clients.validation.addressRequired", "Address is required"),
    ("clients.validation.addressTooLong", "Address must be at most {max} characters"),
    ("clients.validation.cityRequired", "City is required"),
    ("clients.validation.cityTooLong", "City must be at most {max} characters"),
    ("clients.validation.countryRequired", "Country is required"),
    ("clients.validation.countryTooLong", "Country must be at most {max} characters"),
    ("clients.validation.mainContactMethodRequired", "Contact method is required"),
    ("clients.validation.mainContactMethodInvalid", "Choose email, WhatsApp or Discord"),
    ("clients.validation.mainContactRequired", "Main contact is required"),
    ("clients.validation.mainContactTooLong", "Main contact must be at most {max} characters"),
    ("clients.validation.additionalContactTooLong", "Additional contact must be at most {max} characters"),
    ("clients.validation.icoTooLong", "IČO must be at most {max} characters"),
    ("clients.validation.dicTooLong", "DIČ must be at most {max} characters"),
    ("clients.validation.notesTooLong", "Notes must be at most {max} characters"),
    ("clients.validation.favouriteInvalid", "Favourite must be on or off"),
    ("clients.toasts.created", "Client created"),
    ("clients.toasts.updated", "Client updated"),
    ("clients.toasts.archived", "Client archived"),
    ("clients.errors.load", "Unable to load clients."),
    ("clients.errors.save", "Unable to save client."),
    ("clients.errors.archive", "Unable to archive client."),
    ("catalog.page.title", "Catalog items"),
    ("catalog.page.loading", "Loading catalog items..."),
    ("catalog.page.empty", "No catalog items yet."),
    ("catalog.page.priceLine", "{price} / {unit}"),
    ("catalog.page.taxLine", "Tax {rate}%"),
    ("catalog.validation.nameRequired", "Name is required"),
    ("catalog.validation.nameTooLong", "Name must be at most {max} characters"),
    ("catalog.validation.descriptionRequired", "Description is required"),
    ("catalog.validation.descriptionTooLong", "Description must be at most {max} characters"),
    ("catalog.validation.unitRequired", "Unit is required"),
    ("catalog.validation.unitTooLong", "Unit must be at most {max} characters"),
    ("catalog.validation.unitPriceRequired", "Price is required"),
    ("catalog.validation.unitPriceInvalid", "Enter a valid price with up to 2 decimals"),
    ("catalog.validation.taxRateInvalid", "Tax rate must be a whole number"),
    ("catalog.toasts.created", "Catalog item created"),
    ("catalog.toasts.updated", "Catalog item updated"),
    ("catalog.toasts.archived", "Catalog item archived"),
    ("catalog.errors.load", "Unable to load catalog items."),
    ("catalog.errors.save", "Unable to save catalog item."),
    ("catalog.errors.archive", "Unable to archive catalog item."),
    ("users.modal.title", "Company profile"),
    ("users.modal.allRequired", "All fields are required"),
    ("users.modal.loading", "Loading profile..."),
    ("users.validation.nameRequired", "Name is required"),
    ("users.validation.nameTooLong", "Name must be at most {max} characters"),
    ("users.validation.addressRequired", "Address is required"),
    ("users.validation.addressTooLong", "Address must be at most {max} characters"),
    ("users.validation.cityRequired", "City is required"),
    ("users.validation.cityTooLong", "City must be at most {max} characters"),
    ("users.validation.countryRequired", "Country is required"),
    ("users.validation.countryTooLong", "Country must be at most {max} characters"),
    ("users.validation.tradeLicensingOfficeRequired", "Trade licensing office is required"),
    ("users.validation.tradeLicensingOfficeTooLong", "Trade licensing office must be at most {max} characters"),
    ("users.validation.icoRequired", "IČO is required"),
    ("users.validation.icoTooLong", "IČO must be at most {max} characters"),
    ("users.validation.dicRequired", "DIČ is required"),
    ("users.validation.dicTooLong", "DIČ must be at most {max} characters"),
    ("users.validation.emailRequired", "Email is required"),
    ("users.validation.emailTooLong", "Email must be at most {max} characters"),
    ("users.validation.phoneRequired", "Phone is required"),
    ("users.validation.phoneTooLong", "Phone must be at most {max} characters"),
    ("users.validation.bankRequired", "Bank is required"),
    ("users.validation.bankTooLong", "Bank must be at most {max} characters"),
    ("users.validation.ibanRequired", "IBAN is required"),
    ("users.validation.ibanTooLong", "IBAN must be at most {max} characters"),
    ("users.validation.swiftRequired", "SWIFT is required"),
    ("users.validation.swiftTooLong", "SWIFT must be at most {max} characters"),
    ("users.toasts.updated", "Profile updated"),
    ("users.errors.load", "Unable to load profile."),
    ("users.errors.save", "Unable to save profile."),
];

/// Locale selected when nothing else is chosen
pub const DEFAULT_LOCALE: &str = "en";

type Table = HashMap<String, String>;

/// Message tables keyed by locale, plus the locale currently in use
#[derive(Debug)]
pub struct Messages {
    tables: HashMap<String, Table>,
    locale: RwLock<String>,
}

impl Default for Messages {
    fn default() -> Self {
        Self::english()
    }
}

impl Messages {
    /// The built-in English table
    #[must_use]
    pub fn english() -> Self {
        Self::from_pairs(ENGLISH.iter().copied())
    }

    /// Single-locale table registered under [`DEFAULT_LOCALE`].
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self::single(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    /// Builds a table from a nested JSON tree with string leaves, as translation files
    /// are usually written. Non-string leaves are ignored.
    #[must_use]
    pub fn from_value(tree: &Value) -> Self {
        Self::single(flatten_tree(tree))
    }

    fn single(table: Table) -> Self {
        Self {
            tables: HashMap::from([(DEFAULT_LOCALE.to_string(), table)]),
            locale: RwLock::new(DEFAULT_LOCALE.to_string()),
        }
    }

    /// Registers (or replaces) the table for `locale`. The current locale is unchanged.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>, tree: &Value) -> Self {
        self.tables.insert(locale.into(), flatten_tree(tree));
        self
    }

    /// Switches to `locale` if a table is registered for it.
    /// Unknown locales are ignored and `false` is returned.
    pub fn set_locale(&self, locale: &str) -> bool {
        if !self.tables.contains_key(locale) {
            warn!("Ignoring unknown locale: {}", locale);
            return false;
        }
        *self.locale.write().unwrap_or_else(PoisonError::into_inner) = locale.to_string();
        true
    }

    /// The locale messages are currently resolved from
    #[must_use]
    pub fn locale(&self) -> String {
        self.locale
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Resolves `key` in the current locale and substitutes `{token}` placeholders
    /// from `params`.
    #[must_use]
    pub fn t(&self, key: &str, params: &[(&str, &str)]) -> String {
        let template = {
            let locale = self.locale.read().unwrap_or_else(PoisonError::into_inner);
            self.tables
                .get(locale.as_str())
                .and_then(|table| table.get(key))
                .cloned()
        };
        let Some(template) = template else {
            warn!("Missing translation for key: {}", key);
            return key.to_string();
        };

        params.iter().fold(template, |text, (token, value)| {
            text.replace(&format!("{{{token}}}"), value)
        })
    }

    /// User-facing message for a field error, e.g. `catalog.validation.unitPriceInvalid`.
    #[must_use]
    pub fn field_error(&self, section: &str, field: &str, error: FieldError) -> String {
        let key = format!(
            "{section}.validation.{}{}",
            camel_case(field),
            error.key_suffix()
        );
        match error {
            FieldError::TooLong { max } => self.t(&key, &[("max", &max.to_string())]),
            FieldError::Required | FieldError::Invalid => self.t(&key, &[]),
        }
    }
}

fn flatten_tree(tree: &Value) -> Table {
    let mut table = HashMap::new();
    flatten(tree, String::new(), &mut table);
    table
}

fn flatten(node: &Value, prefix: String, table: &mut Table) {
    match node {
        Value::Object(map) => {
            for (segment, child) in map {
                let key = if prefix.is_empty() {
                    segment.clone()
                } else {
                    format!("{prefix}.{segment}")
                };
                flatten(child, key, table);
            }
        }
        Value::String(text) => {
            table.insert(prefix, text.clone());
        }
        _ => {}
    }
}
