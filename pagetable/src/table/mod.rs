//! DataTable - a headless paginated, sortable table.
//!
//! The table provides:
//! - Sortable columns with persisted sort column and direction
//! - Pagination with persisted page size and show-all mode
//! - Debounced page number and page size edits
//! - A single load request per settled state change
//! - Grouped rows, empty-state message and a delayed loading overlay
//!
//! # Example
//!
//! ```
//! use pagetable::table::{BodyRow, Column, DataTable, TableConfig};
//!
//! let columns: Vec<Column> = vec![
//!     Column::sortable("name", "Name"),
//!     Column::sortable("age", "Age"),
//! ];
//! let mut table = DataTable::builder(columns, |request| {
//!     println!("load page {} sorted by {}", request.current_page, request.sort_by);
//! })
//! .config(TableConfig::default().with_persistence_key("people"))
//! .build();
//!
//! table.set_data(vec![vec!["John".into(), "30".into()]]);
//! table.set_total_count(1);
//! assert!(matches!(table.view().body[0], BodyRow::Data { index: 0, .. }));
//! ```

mod config;
mod events;
mod item;
mod render;
mod request;
mod state;

pub use config::{DEFAULT_NAMESPACE, TableConfig};
pub use events::{EventResult, Key};
pub use item::{Alignment, Column, ColumnSize, Content, Group, Row};
pub use render::{
    BodyCell, BodyRow, Footer, HeaderCell, PageSizeField, Pager, ShowAllToggle, SortIndicator,
    TableView,
};
pub use request::{LoadRequest, PaginationSettings, SortSettings, total_pages};
pub use state::{DataTable, DataTableBuilder, Loader, RowClickHandler};
