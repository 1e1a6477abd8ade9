//! Load requests and the persisted table settings they are built from.

use serde::{Deserialize, Serialize};

/// What the data source should deliver next.
///
/// `current_page` is one-based. With `show_all` set the source should
/// return every row as a single page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadRequest {
    pub current_page: usize,
    pub page_size: usize,
    pub show_all: bool,
    pub sort_by: String,
    pub sort_ascending: bool,
}

impl LoadRequest {
    /// Zero-based offset of the first requested row.
    pub fn offset(&self) -> usize {
        if self.show_all {
            0
        } else {
            self.current_page.saturating_sub(1) * self.page_size
        }
    }

    /// Maximum number of rows requested, `None` when showing everything.
    pub fn limit(&self) -> Option<usize> {
        (!self.show_all).then_some(self.page_size)
    }
}

/// Persisted page size and show-all flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationSettings {
    pub page_size: usize,
    pub show_all: bool,
}

/// Persisted sort column and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortSettings {
    pub sort_by: String,
    pub sort_ascending: bool,
}

/// Number of pages for a row count: one when showing everything, and never
/// less than one.
pub fn total_pages(total_count: usize, page_size: usize, show_all: bool) -> usize {
    if show_all {
        return 1;
    }
    total_count.div_ceil(page_size.max(1)).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(150, 10, false), 15);
        assert_eq!(total_pages(151, 10, false), 16);
        assert_eq!(total_pages(0, 10, false), 1);
        assert_eq!(total_pages(5, 0, false), 5);
        assert_eq!(total_pages(10_000, 10, true), 1);
    }

    #[test]
    fn test_offset_and_limit() {
        let request = LoadRequest {
            current_page: 3,
            page_size: 25,
            show_all: false,
            sort_by: "name".into(),
            sort_ascending: true,
        };
        assert_eq!(request.offset(), 50);
        assert_eq!(request.limit(), Some(25));

        let all = LoadRequest {
            show_all: true,
            ..request
        };
        assert_eq!(all.offset(), 0);
        assert_eq!(all.limit(), None);
    }

    #[test]
    fn test_settings_use_camel_case_json() {
        let json = serde_json::to_string(&PaginationSettings {
            page_size: 20,
            show_all: false,
        })
        .unwrap();
        assert_eq!(json, r#"{"pageSize":20,"showAll":false}"#);

        let sort: SortSettings =
            serde_json::from_str(r#"{"sortBy":"age","sortAscending":false}"#).unwrap();
        assert_eq!(sort.sort_by, "age");
        assert!(!sort.sort_ascending);
    }
}
