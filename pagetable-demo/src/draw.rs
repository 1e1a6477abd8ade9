//! Plain-text rendering of a table view.

use std::fmt::Write;

use pagetable::table::{Alignment, BodyRow, Content, SortIndicator, TableView};
use unicode_width::UnicodeWidthStr;

const SEPARATOR: &str = " │ ";

fn text(content: &Content) -> &str {
    match content {
        Content::Text(text) => text,
        Content::Node(node) => node,
    }
}

fn pad(cell: &str, width: usize, align: Alignment) -> String {
    let gap = width.saturating_sub(cell.width());
    match align {
        Alignment::Left => format!("{cell}{}", " ".repeat(gap)),
        Alignment::Right => format!("{}{cell}", " ".repeat(gap)),
        Alignment::Center => {
            let left = gap / 2;
            format!("{}{cell}{}", " ".repeat(left), " ".repeat(gap - left))
        }
    }
}

fn header_label(label: &str, indicator: Option<SortIndicator>) -> String {
    match indicator {
        Some(SortIndicator::Up) => format!("{label} ▲"),
        Some(SortIndicator::Down) => format!("{label} ▼"),
        None => label.to_string(),
    }
}

/// Render the view to a string, one terminal line per table line.
pub fn render(view: &TableView<'_, String>, status: &str) -> String {
    let labels: Vec<String> = view
        .columns
        .iter()
        .map(|cell| header_label(text(cell.label), cell.indicator))
        .collect();

    let mut widths: Vec<usize> = labels.iter().map(|label| label.width()).collect();
    for (_, cells) in view.data_rows() {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(text(cell.content).width());
        }
    }
    let full = widths.iter().sum::<usize>() + SEPARATOR.width() * widths.len().saturating_sub(1);

    let mut out = String::new();
    if let Some(header) = view.header {
        let _ = writeln!(out, "{}", text(header));
    }

    let heading: Vec<String> = labels
        .iter()
        .zip(&widths)
        .zip(&view.columns)
        .map(|((label, width), cell)| pad(label, *width, cell.align))
        .collect();
    let _ = writeln!(out, "{}", heading.join(SEPARATOR));
    let _ = writeln!(out, "{}", "─".repeat(full));

    for row in &view.body {
        match row {
            BodyRow::Empty { message, .. } => {
                let _ = writeln!(out, "{}", pad(message, full, Alignment::Center));
            }
            BodyRow::Group { header, actions, .. } => {
                let actions = actions.map(text).unwrap_or_default();
                let _ = writeln!(out, "» {} {actions}", text(header));
            }
            BodyRow::Data { index, cells, .. } => {
                let line: Vec<String> = cells
                    .iter()
                    .zip(&widths)
                    .map(|(cell, width)| pad(text(cell.content), *width, cell.align))
                    .collect();
                let _ = writeln!(out, "{}  [{index}]", line.join(SEPARATOR));
            }
        }
    }
    let _ = writeln!(out, "{}", "─".repeat(full));

    let footer = &view.footer;
    let mut controls = vec![footer.total_label.clone()];
    if let Some(pager) = &footer.pager {
        let previous = if pager.previous_enabled { "‹" } else { " " };
        let next = if pager.next_enabled { "›" } else { " " };
        controls.push(format!(
            "{previous} {} {}/{} {next}",
            pager.go_to_page_label, pager.current_page, pager.total_pages
        ));
    }
    if let Some(field) = &footer.page_size {
        let value = field.value.map(|v| v.to_string()).unwrap_or_default();
        controls.push(format!("{} [{value}]", field.label));
    }
    let checkbox = if footer.show_all.checked { "[x]" } else { "[ ]" };
    controls.push(format!("{checkbox} {}", footer.show_all.label));
    let _ = writeln!(out, "{}", controls.join("   "));

    if view.loading_overlay {
        let _ = writeln!(out, "{}", pad("… loading …", full, Alignment::Center));
    }
    if !status.is_empty() {
        let _ = writeln!(out, "{status}");
    }
    out
}
