pub mod api;
pub mod debounce;
pub mod i18n;
pub mod settings;
pub mod table;
pub mod timer;

pub mod prelude {
    pub use crate::api::{ApiAction, ApiError, ApiResponse, HttpStatus};
    pub use crate::debounce::Debounced;
    pub use crate::i18n::{Catalog, Identity, Translate};
    pub use crate::settings::{
        MemoryBackend, Persisted, SettingsBackend, SettingsError, SettingsProvider, SqliteBackend,
    };
    pub use crate::table::{
        Alignment, BodyRow, Column, ColumnSize, Content, DataTable, EventResult, Group, Key,
        LoadRequest, TableConfig, TableView,
    };
    pub use crate::timer::{Clock, ManualClock, SystemClock};
}
