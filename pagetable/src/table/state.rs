//! Table state: inputs, persisted settings, debounced edits and load emission.

use std::sync::Arc;
use std::time::Instant;

use log::{debug, warn};

use crate::debounce::Debounced;
use crate::i18n::{Identity, Translate};
use crate::settings::{Persisted, SettingsProvider};
use crate::timer::{Clock, SystemClock};

use super::config::TableConfig;
use super::item::{Column, Content, Group, Row};
use super::request::{LoadRequest, PaginationSettings, SortSettings, total_pages};

/// Sort column used when the table has no columns.
const FALLBACK_SORT_KEY: &str = "id";

/// Callback that asks the data source for a page.
pub type Loader = Box<dyn FnMut(&LoadRequest)>;

/// Callback receiving the index of a clicked row in the table data.
pub type RowClickHandler = Box<dyn FnMut(usize)>;

/// Headless paginated, sortable data table.
///
/// The table owns paging and sorting state and tells the data source what
/// to load; the host owns the rows. Whenever the settled page, page size,
/// show-all flag or sort changes, the loader runs exactly once with the new
/// [`LoadRequest`]. The host answers by feeding rows, the total count and
/// the loading flag back in through the `set_*` methods.
///
/// Time only moves when the host calls [`tick`](Self::tick); the
/// [`next_deadline`](Self::next_deadline) says when that is next needed.
///
/// # Example
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use pagetable::table::{Column, DataTable};
///
/// let requests = Rc::new(RefCell::new(Vec::new()));
/// let sink = requests.clone();
/// let columns: Vec<Column> = vec![Column::sortable("name", "Name")];
/// let mut table = DataTable::builder(columns, move |request| {
///     sink.borrow_mut().push(request.clone())
/// })
/// .total_count(40)
/// .build();
///
/// table.next_page();
/// assert_eq!(requests.borrow().last().unwrap().current_page, 2);
/// ```
pub struct DataTable<N = String> {
    pub(super) columns: Vec<Column<N>>,
    pub(super) data: Vec<Row<N>>,
    pub(super) total_count: usize,
    pub(super) groups: Option<Vec<Group<N>>>,
    pub(super) header: Option<Content<N>>,
    pub(super) is_loading: bool,
    pub(super) config: TableConfig,
    pub(super) translator: Arc<dyn Translate>,
    pub(super) on_row_click: Option<RowClickHandler>,
    pub(super) pagination: Persisted<PaginationSettings>,
    pub(super) sort: Persisted<SortSettings>,
    pub(super) current_page: Debounced<usize>,
    pub(super) page_size_input: Debounced<Option<i64>>,
    pub(super) loading_indicator: Debounced<bool>,
    pub(super) torn_down: bool,
    clock: Arc<dyn Clock>,
    loader: Loader,
    last_request: Option<LoadRequest>,
}

/// Builder for [`DataTable`].
pub struct DataTableBuilder<N = String> {
    columns: Vec<Column<N>>,
    loader: Loader,
    data: Vec<Row<N>>,
    total_count: usize,
    groups: Option<Vec<Group<N>>>,
    header: Option<Content<N>>,
    is_loading: bool,
    config: TableConfig,
    settings: Option<SettingsProvider>,
    clock: Option<Arc<dyn Clock>>,
    translator: Option<Arc<dyn Translate>>,
    on_row_click: Option<RowClickHandler>,
}

impl<N> DataTableBuilder<N> {
    /// Initial rows.
    pub fn data(mut self, rows: Vec<Row<N>>) -> Self {
        self.data = rows;
        self
    }

    /// Initial total row count across all pages.
    pub fn total_count(mut self, total_count: usize) -> Self {
        self.total_count = total_count;
        self
    }

    /// Render rows in groups.
    pub fn groups(mut self, groups: Vec<Group<N>>) -> Self {
        self.groups = Some(groups);
        self
    }

    /// Content shown above the table.
    pub fn header(mut self, header: impl Into<Content<N>>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Initial loading flag.
    pub fn loading(mut self, is_loading: bool) -> Self {
        self.is_loading = is_loading;
        self
    }

    /// Table configuration.
    pub fn config(mut self, config: TableConfig) -> Self {
        self.config = config;
        self
    }

    /// Where settings persist. Defaults to a private in-memory store.
    pub fn settings(mut self, settings: SettingsProvider) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Time source. Defaults to [`SystemClock`].
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Label translator. Defaults to [`Identity`].
    pub fn translator(mut self, translator: impl Translate + 'static) -> Self {
        self.translator = Some(Arc::new(translator));
        self
    }

    /// Row click callback.
    pub fn on_row_click(mut self, handler: impl FnMut(usize) + 'static) -> Self {
        self.on_row_click = Some(Box::new(handler));
        self
    }

    /// Build the table and emit the initial load request.
    pub fn build(self) -> DataTable<N> {
        let config = self.config;
        let settings = self.settings.unwrap_or_default();
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        let pagination = Persisted::load(
            &settings,
            config.settings_key("pagination"),
            PaginationSettings {
                page_size: config.initial_page_size,
                show_all: false,
            },
        );

        let default_sort = self
            .columns
            .first()
            .map(|column| column.key.clone())
            .unwrap_or_else(|| FALLBACK_SORT_KEY.to_string());
        let sort = Persisted::load(
            &settings,
            config.settings_key("sort"),
            SortSettings {
                sort_by: default_sort,
                sort_ascending: true,
            },
        );

        let mut table = DataTable {
            columns: self.columns,
            data: self.data,
            total_count: self.total_count,
            groups: self.groups,
            header: self.header,
            is_loading: false,
            translator: self.translator.unwrap_or_else(|| Arc::new(Identity)),
            on_row_click: self.on_row_click,
            current_page: Debounced::with_delay(1, config.debounce_delay),
            page_size_input: Debounced::with_delay(
                Some(pagination.get().page_size as i64),
                config.debounce_delay,
            ),
            loading_indicator: Debounced::with_delay(false, config.loading_indicator_delay),
            pagination,
            sort,
            config,
            torn_down: false,
            clock,
            loader: self.loader,
            last_request: None,
        };

        table.repair_page_size();
        table.set_loading(self.is_loading);
        table.reconcile();
        table
    }
}

impl<N> DataTable<N> {
    /// Start building a table from its columns and loader.
    pub fn builder(
        columns: Vec<Column<N>>,
        loader: impl FnMut(&LoadRequest) + 'static,
    ) -> DataTableBuilder<N> {
        DataTableBuilder {
            columns,
            loader: Box::new(loader),
            data: Vec::new(),
            total_count: 0,
            groups: None,
            header: None,
            is_loading: false,
            config: TableConfig::default(),
            settings: None,
            clock: None,
            translator: None,
            on_row_click: None,
        }
    }

    // -------------------------------------------------------------------------
    // Inputs
    // -------------------------------------------------------------------------

    /// Replace the displayed rows.
    pub fn set_data(&mut self, rows: Vec<Row<N>>) {
        self.data = rows;
    }

    /// Replace the total row count across all pages.
    pub fn set_total_count(&mut self, total_count: usize) {
        self.total_count = total_count;
    }

    /// Replace or clear the row groups.
    pub fn set_groups(&mut self, groups: Option<Vec<Group<N>>>) {
        self.groups = groups;
    }

    /// Replace or clear the content shown above the table.
    pub fn set_header(&mut self, header: Option<Content<N>>) {
        self.header = header;
    }

    /// Replace the columns. The current sort is kept.
    pub fn set_columns(&mut self, columns: Vec<Column<N>>) {
        self.columns = columns;
    }

    /// Report whether the data source is loading.
    ///
    /// The overlay appears once loading has lasted the configured delay and
    /// disappears as soon as loading stops.
    pub fn set_loading(&mut self, is_loading: bool) {
        if self.torn_down {
            return;
        }
        self.is_loading = is_loading;
        let now = self.now();
        if is_loading {
            self.loading_indicator.set(true, now);
        } else {
            self.loading_indicator.set_bypass(false, now);
        }
        self.reconcile();
    }

    /// Switch the persistence namespace, re-read the settings stored there
    /// and go back to page one.
    pub fn set_persistence_key(&mut self, key: Option<String>) {
        if self.torn_down || key == self.config.persistence_key {
            return;
        }
        self.config.persistence_key = key;
        self.pagination.set_key(self.config.settings_key("pagination"));
        self.sort.set_key(self.config.settings_key("sort"));
        self.repair_page_size();

        let page_size = self.pagination.get().page_size as i64;
        let now = self.now();
        self.page_size_input.set_bypass(Some(page_size), now);
        self.current_page.set_bypass(1, now);
        self.reconcile();
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn columns(&self) -> &[Column<N>] {
        &self.columns
    }

    pub fn data(&self) -> &[Row<N>] {
        &self.data
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn groups(&self) -> Option<&[Group<N>]> {
        self.groups.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Page number shown in the pager, possibly not yet settled.
    pub fn current_page(&self) -> usize {
        *self.current_page.immediate()
    }

    /// Page number the data source was asked for.
    pub fn settled_page(&self) -> usize {
        *self.current_page.settled()
    }

    pub fn page_size(&self) -> usize {
        self.pagination.get().page_size
    }

    /// Page size shown in the page size field; `None` for unparsable text.
    pub fn page_size_input(&self) -> Option<i64> {
        *self.page_size_input.immediate()
    }

    pub fn show_all(&self) -> bool {
        self.pagination.get().show_all
    }

    pub fn sort(&self) -> &SortSettings {
        self.sort.get()
    }

    /// Whether the loading overlay is showing.
    pub fn loading_indicator_visible(&self) -> bool {
        *self.loading_indicator.settled()
    }

    /// Number of pages, recomputed from the current inputs.
    pub fn total_pages(&self) -> usize {
        let settings = self.pagination.get();
        total_pages(self.total_count, settings.page_size, settings.show_all)
    }

    /// The request built from the current settled state.
    pub fn load_request(&self) -> LoadRequest {
        let pagination = self.pagination.get();
        let sort = self.sort.get();
        LoadRequest {
            current_page: *self.current_page.settled(),
            page_size: pagination.page_size,
            show_all: pagination.show_all,
            sort_by: sort.sort_by.clone(),
            sort_ascending: sort.sort_ascending,
        }
    }

    /// The request most recently handed to the loader.
    pub fn last_request(&self) -> Option<&LoadRequest> {
        self.last_request.as_ref()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// When [`tick`](Self::tick) next has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.torn_down {
            return None;
        }
        [
            self.current_page.deadline(),
            self.page_size_input.deadline(),
            self.loading_indicator.deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Settle due edits and emit a load request if needed.
    ///
    /// Returns `true` if anything visible changed.
    pub fn tick(&mut self) -> bool {
        self.reconcile()
    }

    /// Cancel all pending timers. Afterwards the table ignores every input
    /// and never calls back again.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        debug!("table {}: teardown", self.config.namespace());
        self.current_page.cancel();
        self.page_size_input.cancel();
        self.loading_indicator.cancel();
        self.torn_down = true;
    }

    pub(super) fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Bring settled values up to date, then emit at most one request
    /// reflecting all of them.
    pub(super) fn reconcile(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        let now = self.now();
        let mut changed = self.loading_indicator.poll(now);

        if self.page_size_input.poll(now) {
            changed = true;
            match *self.page_size_input.settled() {
                Some(size) if size >= 1 => self.apply_page_size(size as usize, now),
                other => debug!("table {}: ignoring page size {:?}", self.config.namespace(), other),
            }
        }

        changed |= self.current_page.poll(now);
        changed | self.emit_if_changed()
    }

    fn apply_page_size(&mut self, size: usize, now: Instant) {
        self.current_page.set_bypass(1, now);
        self.pagination.update(|prev| PaginationSettings {
            page_size: size,
            ..*prev
        });
    }

    fn emit_if_changed(&mut self) -> bool {
        let request = self.load_request();
        if self.last_request.as_ref() == Some(&request) {
            return false;
        }
        debug!("table {}: load {:?}", self.config.namespace(), request);
        (self.loader)(&request);
        self.last_request = Some(request);
        true
    }

    fn repair_page_size(&mut self) {
        if self.pagination.get().page_size == 0 {
            warn!(
                "table {}: stored page size 0, using {}",
                self.config.namespace(),
                self.config.initial_page_size
            );
            let size = self.config.initial_page_size;
            self.pagination.update(|prev| PaginationSettings {
                page_size: size,
                ..*prev
            });
        }
    }
}

impl<N> std::fmt::Debug for DataTable<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataTable")
            .field("namespace", &self.config.namespace())
            .field("rows", &self.data.len())
            .field("total_count", &self.total_count)
            .field("request", &self.load_request())
            .field("is_loading", &self.is_loading)
            .field("torn_down", &self.torn_down)
            .finish_non_exhaustive()
    }
}
