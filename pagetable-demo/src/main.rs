mod dataset;
mod draw;
mod paths;

use std::cell::RefCell;
use std::fs::{self, File};
use std::future::{Future, pending};
use std::pin::Pin;
use std::rc::Rc;
use std::time::Instant;

use log::{info, warn};
use pagetable::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};
use tokio::io::{AsyncBufReadExt, BufReader};

use dataset::Dataset;

const HELP: &str = "\
commands: n(ext)  p(rev)  g <page>  z <size>  a(ll)  s <column>  c <row>  k <key>  q(uit)";

type InFlight<'a> = Pin<Box<dyn Future<Output = ()> + 'a>>;

/// Shared between the table's callbacks and the main loop.
#[derive(Default)]
struct Host {
    pending: Option<LoadRequest>,
    error: Option<String>,
    status: String,
}

fn init_logging() {
    let path = paths::log_file().unwrap_or_else(|| "pagetable-demo.log".into());
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let log_file = File::create(&path).expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");
}

fn open_settings() -> SettingsProvider {
    let Some(path) = paths::settings_db() else {
        warn!("No home directory, table settings won't be kept");
        return SettingsProvider::in_memory();
    };
    match SqliteBackend::open(&path) {
        Ok(backend) => {
            info!("Table settings at {}", path.display());
            SettingsProvider::new(backend)
        }
        Err(e) => {
            warn!("Failed to open {}: {}", path.display(), e);
            SettingsProvider::in_memory()
        }
    }
}

fn build_table(host: &Rc<RefCell<Host>>, settings: SettingsProvider) -> DataTable {
    let columns = vec![
        Column::sortable("id", "#").align(Alignment::Right),
        Column::sortable("name", "Name").size(ColumnSize::Fill),
        Column::sortable("age", "Age").align(Alignment::Right),
        Column::plain("city", "City"),
    ];

    let loads = host.clone();
    let clicks = host.clone();
    DataTable::builder(columns, move |request| {
        info!("Load requested: {:?}", request);
        loads.borrow_mut().pending = Some(request.clone());
    })
    .header("People")
    .loading(true)
    .config(TableConfig::new().with_persistence_key("people"))
    .settings(settings)
    .translator(Catalog::english())
    .on_row_click(move |index| {
        clicks.borrow_mut().status = format!("Selected row {index}");
    })
    .build()
}

/// Fetch one page and feed it back into the table.
async fn load(table: &RefCell<DataTable>, host: &RefCell<Host>, dataset: &Dataset, request: LoadRequest) {
    let mut action = ApiAction::new(
        |error| host.borrow_mut().error = error,
        |loading| table.borrow_mut().set_loading(loading),
    );
    action
        .execute(
            dataset.fetch(request),
            |page| {
                let mut table = table.borrow_mut();
                table.set_total_count(page.total);
                table.set_data(page.rows);
            },
            "Failed to load people",
        )
        .await;
}

async fn until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline.into()).await,
        None => pending().await,
    }
}

async fn finish(in_flight: &mut Option<InFlight<'_>>) {
    match in_flight {
        Some(future) => future.await,
        None => pending().await,
    }
}

/// Apply one command line. Returns false to quit.
fn handle(table: &mut DataTable, line: &str) -> bool {
    let (command, argument) = line.split_once(' ').unwrap_or((line, ""));
    let argument = argument.trim();
    let result = match command {
        "q" | "quit" => return false,
        "n" | "next" => table.next_page(),
        "p" | "prev" => table.previous_page(),
        "g" | "page" => table.on_page_input(argument),
        "z" | "size" => table.on_page_size_input(argument),
        "a" | "all" => {
            let show_all = !table.show_all();
            table.on_show_all_change(show_all)
        }
        "s" | "sort" => match argument.parse() {
            Ok(index) => table.on_header_click(index),
            Err(_) => table.sort_by(argument),
        },
        "c" | "click" => match argument.parse() {
            Ok(index) => table.on_row_click(index),
            Err(_) => EventResult::Ignored,
        },
        "k" | "key" => {
            let key = (!argument.is_empty()).then(|| argument.to_string());
            table.set_persistence_key(key);
            EventResult::Consumed
        }
        _ => {
            println!("{HELP}");
            EventResult::Ignored
        }
    };
    if !result.is_consumed() {
        info!("Ignored command: {line}");
    }
    true
}

fn redraw(table: &RefCell<DataTable>, host: &RefCell<Host>) {
    let host = host.borrow();
    let status = match &host.error {
        Some(error) => format!("error: {error}"),
        None => host.status.clone(),
    };
    print!("\x1b[2J\x1b[H{}", draw::render(&table.borrow().view(), &status));
    println!("{HELP}");
}

#[tokio::main]
async fn main() {
    init_logging();

    let dataset = Dataset::generate(137);
    let host = Rc::new(RefCell::new(Host::default()));
    let table = RefCell::new(build_table(&host, open_settings()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight: Option<InFlight<'_>> = None;

    loop {
        if in_flight.is_none() {
            let request = host.borrow_mut().pending.take();
            if let Some(request) = request {
                in_flight = Some(Box::pin(load(&table, &host, &dataset, request)));
            }
        }
        redraw(&table, &host);

        let deadline = table.borrow().next_deadline();
        let mut settled = false;
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if !handle(&mut table.borrow_mut(), line.trim()) {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    break;
                }
            },
            _ = until(deadline) => {
                table.borrow_mut().tick();
            }
            _ = finish(&mut in_flight) => {
                settled = true;
            }
        }
        if settled {
            in_flight = None;
        }
    }

    drop(in_flight);
    table.borrow_mut().teardown();
    info!("Bye");
}
