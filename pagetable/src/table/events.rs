//! Event handling for the DataTable.

use log::debug;

use super::item::Column;
use super::request::{PaginationSettings, SortSettings};
use super::state::DataTable;

/// Whether an event changed the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Consumed,
    Ignored,
}

impl EventResult {
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}

/// Keys the table reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Tab,
    Escape,
    Char(char),
}

impl Key {
    fn activates(self) -> bool {
        matches!(self, Key::Enter | Key::Space | Key::Char(' '))
    }
}

impl<N> DataTable<N> {
    /// Handle a click on the header cell at `index`.
    ///
    /// Activating the sort column flips its direction; any other sortable
    /// column becomes the sort column, ascending. Either way the table goes
    /// back to page one without waiting for the debounce.
    pub fn on_header_click(&mut self, index: usize) -> EventResult {
        match self.columns.get(index) {
            Some(Column {
                key,
                sortable: true,
                ..
            }) => {
                let key = key.clone();
                self.toggle_sort(key)
            }
            _ => EventResult::Ignored,
        }
    }

    /// Handle a key press on the focused header cell at `index`.
    pub fn on_header_key(&mut self, index: usize, key: Key) -> EventResult {
        if !key.activates() {
            return EventResult::Ignored;
        }
        self.on_header_click(index)
    }

    /// Activate the sortable column with the given key.
    pub fn sort_by(&mut self, key: &str) -> EventResult {
        match self.columns.iter().position(|c| c.sortable && c.key == key) {
            Some(index) => self.on_header_click(index),
            None => EventResult::Ignored,
        }
    }

    fn toggle_sort(&mut self, key: String) -> EventResult {
        if self.torn_down {
            return EventResult::Ignored;
        }
        let current = self.sort.get();
        let next = if current.sort_by == key {
            SortSettings {
                sort_by: key,
                sort_ascending: !current.sort_ascending,
            }
        } else {
            SortSettings {
                sort_by: key,
                sort_ascending: true,
            }
        };
        debug!(
            "table {}: sort by {} {}",
            self.config.namespace(),
            next.sort_by,
            if next.sort_ascending { "asc" } else { "desc" }
        );
        self.sort.set(next);

        let now = self.now();
        self.current_page.set_bypass(1, now);
        self.reconcile();
        EventResult::Consumed
    }

    /// Handle text typed into the page size field.
    ///
    /// The value takes effect once typing pauses. Text that isn't a whole
    /// number of at least one is remembered for display but never applied.
    pub fn on_page_size_input(&mut self, text: &str) -> EventResult {
        self.on_page_size_change(text.trim().parse::<i64>().ok())
    }

    /// Handle a numeric page size edit; `None` stands for an unparsable value.
    pub fn on_page_size_change(&mut self, size: Option<i64>) -> EventResult {
        if self.torn_down {
            return EventResult::Ignored;
        }
        let now = self.now();
        self.page_size_input.set(size, now);
        self.reconcile();
        EventResult::Consumed
    }

    /// Handle the show-all toggle.
    pub fn on_show_all_change(&mut self, show_all: bool) -> EventResult {
        if self.torn_down {
            return EventResult::Ignored;
        }
        let now = self.now();
        self.current_page.set_bypass(1, now);
        self.pagination.update(|prev| PaginationSettings {
            show_all,
            ..*prev
        });
        self.reconcile();
        EventResult::Consumed
    }

    /// Go to the next page immediately. Ignored while loading or on the
    /// last page.
    pub fn next_page(&mut self) -> EventResult {
        let page = self.current_page();
        if self.torn_down || self.is_loading || page >= self.total_pages() {
            return EventResult::Ignored;
        }
        let now = self.now();
        self.current_page.set_bypass(page + 1, now);
        self.reconcile();
        EventResult::Consumed
    }

    /// Go to the previous page immediately. Ignored on the first page.
    pub fn previous_page(&mut self) -> EventResult {
        let page = self.current_page();
        if self.torn_down || page <= 1 {
            return EventResult::Ignored;
        }
        let now = self.now();
        self.current_page.set_bypass(page - 1, now);
        self.reconcile();
        EventResult::Consumed
    }

    /// Jump to a page, clamped to the valid range. Settles after the debounce
    /// so typing a number doesn't load every intermediate page.
    pub fn go_to_page(&mut self, page: i64) -> EventResult {
        if self.torn_down {
            return EventResult::Ignored;
        }
        let last = self.total_pages() as i64;
        let page = page.clamp(1, last) as usize;
        let now = self.now();
        self.current_page.set(page, now);
        self.reconcile();
        EventResult::Consumed
    }

    /// Handle text typed into the page number field. Unparsable text is
    /// ignored.
    pub fn on_page_input(&mut self, text: &str) -> EventResult {
        match text.trim().parse::<i64>() {
            Ok(page) => self.go_to_page(page),
            Err(_) => EventResult::Ignored,
        }
    }

    /// Handle a click on the data row at `index` in the table data.
    pub fn on_row_click(&mut self, index: usize) -> EventResult {
        if self.torn_down || index >= self.data.len() {
            return EventResult::Ignored;
        }
        match self.on_row_click.as_mut() {
            Some(handler) => {
                handler(index);
                EventResult::Consumed
            }
            None => EventResult::Ignored,
        }
    }
}
