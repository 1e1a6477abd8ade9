//! Projection of table state into a display structure.
//!
//! [`DataTable::view`] produces a [`TableView`] borrowing the table's
//! content. Hosts walk the view to draw markup, widgets or terminal text;
//! every decision about *what* is shown lives here.

use crate::i18n::keys;

use super::item::{Alignment, Column, ColumnSize, Content};
use super::state::DataTable;

/// Direction arrow shown on the active sort column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    /// Ascending
    Up,
    /// Descending
    Down,
}

/// One header cell.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell<'a, N> {
    pub key: &'a str,
    pub label: &'a Content<N>,
    pub align: Alignment,
    pub size: ColumnSize,
    pub sortable: bool,
    /// Sortable headers take keyboard focus and activate on Enter/Space.
    pub focusable: bool,
    /// "Sort by ..." for sortable columns with text labels.
    pub accessible_label: Option<String>,
    pub indicator: Option<SortIndicator>,
}

/// One body cell.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyCell<'a, N> {
    pub content: &'a Content<N>,
    pub align: Alignment,
    pub size: ColumnSize,
}

/// One body row.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyRow<'a, N> {
    /// Placeholder for a table without rows.
    Empty { message: String, span: usize },
    /// Header introducing a group.
    Group {
        key: &'a str,
        header: &'a Content<N>,
        actions: Option<&'a Content<N>>,
        span: usize,
    },
    /// A data row. `index` is its position in the table data.
    Data {
        index: usize,
        cells: Vec<BodyCell<'a, N>>,
        clickable: bool,
    },
}

/// Previous/next buttons and page number field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    pub current_page: usize,
    pub total_pages: usize,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    pub previous_label: String,
    pub next_label: String,
    pub go_to_page_label: String,
}

/// Page size field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSizeField {
    /// What the field shows; `None` when the typed text isn't a number.
    pub value: Option<i64>,
    pub label: String,
    pub accessible_label: String,
}

/// Show-all checkbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowAllToggle {
    pub checked: bool,
    pub label: String,
}

/// Footer below the table body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footer {
    pub total_label: String,
    /// Hidden while showing everything.
    pub pager: Option<Pager>,
    /// Hidden while showing everything.
    pub page_size: Option<PageSizeField>,
    pub show_all: ShowAllToggle,
}

/// Everything a host needs to draw the table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView<'a, N> {
    pub header: Option<&'a Content<N>>,
    pub columns: Vec<HeaderCell<'a, N>>,
    pub body: Vec<BodyRow<'a, N>>,
    pub footer: Footer,
    pub loading_overlay: bool,
}

impl<'a, N> TableView<'a, N> {
    /// Data rows in display order.
    pub fn data_rows(&self) -> impl Iterator<Item = (usize, &[BodyCell<'a, N>])> {
        self.body.iter().filter_map(|row| match row {
            BodyRow::Data { index, cells, .. } => Some((*index, cells.as_slice())),
            _ => None,
        })
    }
}

impl<N> DataTable<N> {
    /// Project the current state for display.
    pub fn view(&self) -> TableView<'_, N> {
        TableView {
            header: self.header.as_ref(),
            columns: self.columns.iter().map(|c| self.header_cell(c)).collect(),
            body: self.body_rows(),
            footer: self.footer(),
            loading_overlay: self.loading_indicator_visible(),
        }
    }

    fn t(&self, key: &str) -> String {
        self.translator.translate(key, &[])
    }

    fn header_cell<'a>(&self, column: &'a Column<N>) -> HeaderCell<'a, N> {
        let sort = self.sort();
        let indicator = (column.sortable && column.key == sort.sort_by).then_some(
            if sort.sort_ascending {
                SortIndicator::Up
            } else {
                SortIndicator::Down
            },
        );
        let accessible_label = match column.label.as_text() {
            Some(label) if column.sortable => Some(
                self.translator
                    .translate(keys::SORT_BY, &[("label", label)]),
            ),
            _ => None,
        };

        HeaderCell {
            key: &column.key,
            label: &column.label,
            align: column.align,
            size: column.size,
            sortable: column.sortable,
            focusable: column.sortable,
            accessible_label,
            indicator,
        }
    }

    fn body_rows(&self) -> Vec<BodyRow<'_, N>> {
        let span = self.columns.len();

        if self.data.is_empty() {
            let message = match &self.config.empty_message {
                Some(message) => message.clone(),
                None => self.t(keys::EMPTY_MESSAGE),
            };
            return vec![BodyRow::Empty { message, span }];
        }

        match &self.groups {
            Some(groups) => {
                let mut rows = Vec::new();
                for group in groups {
                    rows.push(BodyRow::Group {
                        key: &group.key,
                        header: &group.header,
                        actions: group.actions.as_ref(),
                        span,
                    });
                    rows.extend(group.rows.iter().filter_map(|&index| self.data_row(index)));
                }
                rows
            }
            None => (0..self.data.len())
                .filter_map(|index| self.data_row(index))
                .collect(),
        }
    }

    /// `None` for indices past the end of the data.
    fn data_row(&self, index: usize) -> Option<BodyRow<'_, N>> {
        let row = self.data.get(index)?;
        let cells = row
            .iter()
            .enumerate()
            .map(|(position, content)| {
                let column = self.columns.get(position);
                BodyCell {
                    content,
                    align: column.map(|c| c.align).unwrap_or_default(),
                    size: column.map(|c| c.size).unwrap_or_default(),
                }
            })
            .collect();

        Some(BodyRow::Data {
            index,
            cells,
            clickable: self.on_row_click.is_some(),
        })
    }

    fn footer(&self) -> Footer {
        let show_all = self.show_all();
        let count = self.total_count.to_string();
        let total_label = self
            .translator
            .translate(keys::LIST_TOTAL, &[("count", count.as_str())]);

        let pager = (!show_all).then(|| {
            let current_page = self.current_page();
            let total_pages = self.total_pages();
            Pager {
                current_page,
                total_pages,
                previous_enabled: !self.is_loading && current_page > 1,
                next_enabled: !self.is_loading && current_page < total_pages,
                previous_label: self.t(keys::LIST_PREVIOUS),
                next_label: self.t(keys::LIST_NEXT),
                go_to_page_label: self.t(keys::GO_TO_PAGE),
            }
        });

        let page_size = (!show_all).then(|| PageSizeField {
            value: self.page_size_input(),
            label: self.t(keys::LIST_ITEMS_PER_PAGE),
            accessible_label: self.t(keys::ITEMS_PER_PAGE),
        });

        Footer {
            total_label,
            pager,
            page_size,
            show_all: ShowAllToggle {
                checked: show_all,
                label: self.t(keys::LIST_SHOW_ALL),
            },
        }
    }
}
