//! Tests for pagination, sorting and load request emission.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use pagetable::settings::SettingsProvider;
use pagetable::table::{Column, DataTable, EventResult, Key, LoadRequest, TableConfig};
use pagetable::timer::{Clock, ManualClock};

const DEBOUNCE: Duration = Duration::from_millis(400);

struct Harness {
    clock: ManualClock,
    settings: SettingsProvider,
    requests: Rc<RefCell<Vec<LoadRequest>>>,
}

impl Harness {
    fn new() -> Self {
        Self {
            clock: ManualClock::new(),
            settings: SettingsProvider::in_memory(),
            requests: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn build(&self, config: TableConfig, total_count: usize) -> DataTable {
        let sink = self.requests.clone();
        DataTable::builder(columns(), move |request: &LoadRequest| {
            sink.borrow_mut().push(request.clone())
        })
        .data(vec![
            vec!["John".into(), "30".into()],
            vec!["Jane".into(), "25".into()],
        ])
        .total_count(total_count)
        .config(config)
        .settings(self.settings.clone())
        .clock(self.clock.clone())
        .build()
    }

    fn count(&self) -> usize {
        self.requests.borrow().len()
    }

    fn last(&self) -> LoadRequest {
        self.requests
            .borrow()
            .last()
            .cloned()
            .expect("no load request emitted")
    }
}

fn columns() -> Vec<Column> {
    vec![
        Column::sortable("name", "Name"),
        Column::sortable("age", "Age"),
        Column::plain("actions", "Actions"),
    ]
}

fn request(page: usize, size: usize, show_all: bool, sort_by: &str, asc: bool) -> LoadRequest {
    LoadRequest {
        current_page: page,
        page_size: size,
        show_all,
        sort_by: sort_by.to_string(),
        sort_ascending: asc,
    }
}

#[test]
fn test_initial_load_request() {
    let h = Harness::new();
    let _table = h.build(TableConfig::default().with_initial_page_size(10), 2);

    assert_eq!(*h.requests.borrow(), vec![request(1, 10, false, "name", true)]);
}

#[test]
fn test_click_other_column_sorts_ascending() {
    let h = Harness::new();
    let mut table = h.build(TableConfig::default(), 2);

    assert_eq!(table.on_header_click(1), EventResult::Consumed);
    assert_eq!(h.count(), 2);
    assert_eq!(h.last(), request(1, 20, false, "age", true));
}

#[test]
fn test_click_sort_column_toggles_direction() {
    let h = Harness::new();
    let mut table = h.build(TableConfig::default(), 2);

    table.on_header_click(0);
    assert_eq!(h.last(), request(1, 20, false, "name", false));

    table.on_header_click(0);
    assert_eq!(h.last(), request(1, 20, false, "name", true));
    assert_eq!(h.count(), 3);
}

#[test]
fn test_sort_by_key() {
    let h = Harness::new();
    let mut table = h.build(TableConfig::default(), 2);

    assert_eq!(table.sort_by("age"), EventResult::Consumed);
    assert_eq!(table.sort().sort_by, "age");
    assert_eq!(table.sort_by("actions"), EventResult::Ignored);
    assert_eq!(table.sort_by("missing"), EventResult::Ignored);
}

#[test]
fn test_non_sortable_column_is_ignored() {
    let h = Harness::new();
    let mut table = h.build(TableConfig::default(), 2);

    assert_eq!(table.on_header_click(2), EventResult::Ignored);
    assert_eq!(table.on_header_click(42), EventResult::Ignored);
    assert_eq!(h.count(), 1);
}

#[test]
fn test_header_keyboard_activation() {
    let h = Harness::new();
    let mut table = h.build(TableConfig::default(), 2);

    assert_eq!(table.on_header_key(1, Key::Tab), EventResult::Ignored);
    assert_eq!(table.on_header_key(1, Key::Char('a')), EventResult::Ignored);
    assert_eq!(h.count(), 1);

    assert_eq!(table.on_header_key(1, Key::Enter), EventResult::Consumed);
    assert_eq!(h.last(), request(1, 20, false, "age", true));

    assert_eq!(table.on_header_key(1, Key::Space), EventResult::Consumed);
    assert_eq!(h.last(), request(1, 20, false, "age", false));
}

#[test]
fn test_sort_resets_page_in_single_request() {
    let h = Harness::new();
    let mut table = h.build(TableConfig::default(), 100);

    table.next_page();
    table.next_page();
    assert_eq!(h.last().current_page, 3);
    let before = h.count();

    table.on_header_click(1);
    assert_eq!(h.count(), before + 1);
    assert_eq!(h.last(), request(1, 20, false, "age", true));
    assert_eq!(table.current_page(), 1);
}

#[test]
fn test_page_size_typing_emits_once_after_settling() {
    let h = Harness::new();
    let mut table = h.build(TableConfig::default(), 500);

    table.next_page();
    assert_eq!(h.count(), 2);

    table.on_page_size_input("2");
    h.clock.advance(Duration::from_millis(100));
    table.tick();
    table.on_page_size_input("25");
    assert_eq!(table.page_size_input(), Some(25));
    assert_eq!(table.page_size(), 20);

    h.clock.advance(DEBOUNCE - Duration::from_millis(1));
    table.tick();
    assert_eq!(h.count(), 2);

    h.clock.advance(Duration::from_millis(1));
    table.tick();
    assert_eq!(h.count(), 3);
    assert_eq!(h.last(), request(1, 25, false, "name", true));

    h.clock.advance(Duration::from_secs(5));
    table.tick();
    assert_eq!(h.count(), 3);
    assert_eq!(table.page_size(), 25);
}

#[test]
fn test_invalid_page_size_is_ignored() {
    let h = Harness::new();
    let mut table = h.build(TableConfig::default(), 100);
    table.next_page();
    let before = h.count();

    for text in ["abc", "0", "-4", ""] {
        table.on_page_size_input(text);
        h.clock.advance(DEBOUNCE);
        table.tick();
    }

    assert_eq!(h.count(), before);
    assert_eq!(table.page_size(), 20);
    assert_eq!(table.current_page(), 2);
    assert_eq!(table.page_size_input(), None);
}

#[test]
fn test_show_all_resets_page_and_collapses_pages() {
    let h = Harness::new();
    let mut table = h.build(TableConfig::default(), 100);
    table.next_page();
    let before = h.count();

    assert_eq!(table.on_show_all_change(true), EventResult::Consumed);
    assert_eq!(h.count(), before + 1);
    assert_eq!(h.last(), request(1, 20, true, "name", true));
    assert_eq!(table.total_pages(), 1);

    table.on_show_all_change(false);
    assert_eq!(h.last(), request(1, 20, false, "name", true));
    assert_eq!(table.total_pages(), 5);
}

#[test]
fn test_total_pages_follows_inputs() {
    let h = Harness::new();
    let mut table = h.build(TableConfig::default().with_initial_page_size(10), 150);
    assert_eq!(table.total_pages(), 15);

    table.set_total_count(0);
    assert_eq!(table.total_pages(), 1);

    table.set_total_count(151);
    assert_eq!(table.total_pages(), 16);

    table.on_show_all_change(true);
    assert_eq!(table.total_pages(), 1);
}

#[test]
fn test_next_page_is_blocked_while_loading() {
    let h = Harness::new();
    let mut table = h.build(TableConfig::default(), 100);

    table.set_loading(true);
    assert_eq!(table.next_page(), EventResult::Ignored);
    assert_eq!(h.count(), 1);

    table.set_loading(false);
    assert_eq!(table.next_page(), EventResult::Consumed);
    assert_eq!(h.last().current_page, 2);
}

#[test]
fn test_page_bounds() {
    let h = Harness::new();
    let mut table = h.build(TableConfig::default(), 40);

    assert_eq!(table.previous_page(), EventResult::Ignored);
    assert_eq!(table.next_page(), EventResult::Consumed);
    assert_eq!(table.next_page(), EventResult::Ignored);
    assert_eq!(table.previous_page(), EventResult::Consumed);
    assert_eq!(h.last().current_page, 1);
    assert_eq!(h.count(), 3);
}

#[test]
fn test_previous_page_works_while_loading() {
    let h = Harness::new();
    let mut table = h.build(TableConfig::default(), 100);
    table.next_page();

    table.set_loading(true);
    assert_eq!(table.previous_page(), EventResult::Consumed);
    assert_eq!(h.last().current_page, 1);
}

#[test]
fn test_go_to_page_is_debounced_and_clamped() {
    let h = Harness::new();
    let mut table = h.build(TableConfig::default(), 150);
    assert_eq!(table.total_pages(), 8);

    table.go_to_page(5);
    assert_eq!(table.current_page(), 5);
    assert_eq!(table.settled_page(), 1);
    assert_eq!(h.count(), 1);

    h.clock.advance(DEBOUNCE);
    table.tick();
    assert_eq!(h.last().current_page, 5);

    table.go_to_page(99);
    assert_eq!(table.current_page(), 8);
    table.go_to_page(-3);
    assert_eq!(table.current_page(), 1);
}

#[test]
fn test_typed_page_numbers_coalesce() {
    let h = Harness::new();
    let mut table = h.build(TableConfig::default(), 300);

    table.on_page_input("1");
    table.on_page_input("12");
    assert_eq!(table.on_page_input("1x"), EventResult::Ignored);
    assert_eq!(table.current_page(), 12);

    h.clock.advance(DEBOUNCE);
    table.tick();
    h.clock.advance(DEBOUNCE);
    table.tick();

    assert_eq!(h.count(), 2);
    assert_eq!(h.last().current_page, 12);
}

#[test]
fn test_next_deadline_tracks_pending_edits() {
    let h = Harness::new();
    let mut table = h.build(TableConfig::default(), 100);
    assert_eq!(table.next_deadline(), None);

    let start = h.clock.now();
    table.go_to_page(3);
    assert_eq!(table.next_deadline(), Some(start + DEBOUNCE));

    h.clock.advance(DEBOUNCE);
    assert!(table.tick());
    assert_eq!(table.next_deadline(), None);
}

#[test]
fn test_teardown_cancels_everything() {
    let h = Harness::new();
    let calls = Rc::new(RefCell::new(Vec::new()));
    let clicks = calls.clone();
    let sink = h.requests.clone();
    let mut table: DataTable = DataTable::builder(columns(), move |request: &LoadRequest| {
        sink.borrow_mut().push(request.clone())
    })
    .data(vec![vec!["John".into()]])
    .total_count(100)
    .clock(h.clock.clone())
    .on_row_click(move |index| clicks.borrow_mut().push(index))
    .build();

    table.go_to_page(3);
    table.on_page_size_input("50");
    table.set_loading(true);
    table.teardown();
    assert!(table.is_torn_down());
    assert_eq!(table.next_deadline(), None);

    h.clock.advance(Duration::from_secs(10));
    assert!(!table.tick());
    assert_eq!(table.next_page(), EventResult::Ignored);
    assert_eq!(table.on_header_click(1), EventResult::Ignored);
    assert_eq!(table.on_show_all_change(true), EventResult::Ignored);
    assert_eq!(table.on_row_click(0), EventResult::Ignored);

    assert_eq!(h.count(), 1);
    assert!(calls.borrow().is_empty());
    assert!(!table.loading_indicator_visible());
}

#[test]
fn test_loading_overlay_waits_for_delay() {
    let h = Harness::new();
    let mut table = h.build(TableConfig::default(), 2);

    table.set_loading(true);
    assert!(!table.loading_indicator_visible());

    h.clock.advance(Duration::from_millis(199));
    table.tick();
    assert!(!table.loading_indicator_visible());

    h.clock.advance(Duration::from_millis(1));
    table.tick();
    assert!(table.loading_indicator_visible());

    table.set_loading(false);
    assert!(!table.loading_indicator_visible());
}

#[test]
fn test_fast_load_never_shows_overlay() {
    let h = Harness::new();
    let mut table = h.build(
        TableConfig::default().with_loading_indicator_delay(Duration::from_millis(600)),
        2,
    );

    table.set_loading(true);
    h.clock.advance(Duration::from_millis(300));
    table.tick();
    table.set_loading(false);

    h.clock.advance(Duration::from_secs(1));
    table.tick();
    assert!(!table.loading_indicator_visible());
    assert_eq!(table.next_deadline(), None);
}

#[test]
fn test_row_click_reports_data_index() {
    let h = Harness::new();
    let clicks = Rc::new(RefCell::new(Vec::new()));
    let sink = clicks.clone();
    let mut table: DataTable = DataTable::builder(columns(), |_: &LoadRequest| {})
        .data(vec![vec!["a".into()], vec!["b".into()]])
        .clock(h.clock.clone())
        .on_row_click(move |index| sink.borrow_mut().push(index))
        .build();

    assert_eq!(table.on_row_click(1), EventResult::Consumed);
    assert_eq!(table.on_row_click(2), EventResult::Ignored);
    assert_eq!(*clicks.borrow(), vec![1]);
}

#[test]
fn test_row_click_without_handler_is_ignored() {
    let h = Harness::new();
    let mut table = h.build(TableConfig::default(), 2);
    assert_eq!(table.on_row_click(0), EventResult::Ignored);
}

#[test]
fn test_empty_columns_fall_back_to_id_sort() {
    let requests = Rc::new(RefCell::new(Vec::new()));
    let sink = requests.clone();
    let _table: DataTable = DataTable::builder(Vec::new(), move |request: &LoadRequest| {
        sink.borrow_mut().push(request.clone())
    })
    .build();

    assert_eq!(requests.borrow()[0].sort_by, "id");
}
