//! Table configuration

use std::time::Duration;

use crate::debounce::DEFAULT_DELAY;

/// Namespace used when no persistence key is configured.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Configuration for a [`DataTable`](super::DataTable).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use pagetable::table::TableConfig;
///
/// let config = TableConfig::default()
///     .with_persistence_key("orders")
///     .with_initial_page_size(50)
///     .with_loading_indicator_delay(Duration::from_millis(600));
/// assert_eq!(config.settings_key("sort"), "orders-table-sort");
/// ```
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Namespace for persisted settings, so tables don't share them.
    ///
    /// Default: none (uses [`DEFAULT_NAMESPACE`])
    pub persistence_key: Option<String>,

    /// Page size used until the user picks one.
    ///
    /// Default: 20
    pub initial_page_size: usize,

    /// How long page number and page size edits wait before settling.
    ///
    /// Default: 400ms
    pub debounce_delay: Duration,

    /// How long loading must last before the overlay appears.
    ///
    /// Default: 200ms
    pub loading_indicator_delay: Duration,

    /// Message for an empty table. Translated default when unset.
    pub empty_message: Option<String>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            persistence_key: None,
            initial_page_size: 20,
            debounce_delay: DEFAULT_DELAY,
            loading_indicator_delay: Duration::from_millis(200),
            empty_message: None,
        }
    }
}

impl TableConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the persistence namespace.
    pub fn with_persistence_key(mut self, key: impl Into<String>) -> Self {
        self.persistence_key = Some(key.into());
        self
    }

    /// Sets the initial page size. Zero is raised to one.
    pub fn with_initial_page_size(mut self, size: usize) -> Self {
        self.initial_page_size = size.max(1);
        self
    }

    /// Sets the edit debounce delay.
    pub fn with_debounce_delay(mut self, delay: Duration) -> Self {
        self.debounce_delay = delay;
        self
    }

    /// Sets the loading overlay delay.
    pub fn with_loading_indicator_delay(mut self, delay: Duration) -> Self {
        self.loading_indicator_delay = delay;
        self
    }

    /// Sets a custom empty-table message.
    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = Some(message.into());
        self
    }

    /// The persistence namespace in effect.
    pub fn namespace(&self) -> &str {
        self.persistence_key.as_deref().unwrap_or(DEFAULT_NAMESPACE)
    }

    /// Backend key for one settings area, e.g. `"orders-table-pagination"`.
    pub fn settings_key(&self, area: &str) -> String {
        format!("{}-table-{}", self.namespace(), area)
    }
}
