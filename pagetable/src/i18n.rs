//! Label translation.
//!
//! The table never hard-codes user-facing text; it asks a [`Translate`]
//! implementation for every label. Without one, [`Identity`] echoes the key
//! back so the table stays usable, just untranslated.

use std::collections::HashMap;

/// Translation keys used by the table.
pub mod keys {
    pub const EMPTY_MESSAGE: &str = "dataTable.emptyMessage";
    pub const GO_TO_PAGE: &str = "dataTable.goToPage";
    pub const ITEMS_PER_PAGE: &str = "dataTable.itemsPerPage";
    pub const LIST_ITEMS_PER_PAGE: &str = "dataTable.list.itemsPerPage";
    pub const LIST_NEXT: &str = "dataTable.list.next";
    pub const LIST_PREVIOUS: &str = "dataTable.list.previous";
    pub const LIST_SHOW_ALL: &str = "dataTable.list.showAll";
    pub const LIST_TOTAL: &str = "dataTable.list.total";
    pub const SORT_BY: &str = "dataTable.sortBy";
}

/// Turns a translation key plus named parameters into display text.
pub trait Translate: Send + Sync {
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String;
}

/// Returns every key unchanged, ignoring parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl Translate for Identity {
    fn translate(&self, key: &str, _params: &[(&str, &str)]) -> String {
        key.to_string()
    }
}

/// A flat key to template map.
///
/// Templates may contain `{{name}}` placeholders that are replaced by the
/// matching parameter. Unknown keys translate to themselves.
///
/// # Example
///
/// ```
/// use pagetable::i18n::{Catalog, Translate, keys};
///
/// let catalog = Catalog::english();
/// assert_eq!(catalog.translate(keys::LIST_TOTAL, &[("count", "3")]), "3 Items");
/// ```
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The table's built-in English strings.
    pub fn english() -> Self {
        Self::new()
            .with(keys::EMPTY_MESSAGE, "No data found.")
            .with(keys::GO_TO_PAGE, "Go to page")
            .with(keys::ITEMS_PER_PAGE, "Items per page")
            .with(keys::LIST_ITEMS_PER_PAGE, "Items per page:")
            .with(keys::LIST_NEXT, "Next")
            .with(keys::LIST_PREVIOUS, "Previous")
            .with(keys::LIST_SHOW_ALL, "All")
            .with(keys::LIST_TOTAL, "{{count}} Items")
            .with(keys::SORT_BY, "Sort by {{label}}")
    }

    /// Add or replace a template.
    pub fn with(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.insert(key, template);
        self
    }

    /// Add or replace a template in place.
    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.entries.insert(key.into(), template.into());
    }
}

impl Translate for Catalog {
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
        match self.entries.get(key) {
            Some(template) => interpolate(template, params),
            None => key.to_string(),
        }
    }
}

/// Replace `{{name}}` placeholders. Placeholders without a parameter are kept.
fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in params {
        out = out.replace(&format!("{{{{{name}}}}}"), value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_returns_key() {
        assert_eq!(
            Identity.translate(keys::SORT_BY, &[("label", "Name")]),
            keys::SORT_BY
        );
    }

    #[test]
    fn test_catalog_interpolates() {
        let catalog = Catalog::english();
        assert_eq!(
            catalog.translate(keys::SORT_BY, &[("label", "Age")]),
            "Sort by Age"
        );
        assert_eq!(catalog.translate(keys::EMPTY_MESSAGE, &[]), "No data found.");
    }

    #[test]
    fn test_catalog_unknown_key_falls_back() {
        assert_eq!(Catalog::new().translate("x.y", &[]), "x.y");
    }

    #[test]
    fn test_missing_parameter_is_left_in_place() {
        assert_eq!(interpolate("{{a}} and {{b}}", &[("a", "1")]), "1 and {{b}}");
    }
}
