//! Page-number navigation controls
//!
//! Builds the compact list of page links shown by browsable front ends:
//! the first and last pages, the neighbours of the current page, and gaps
//! between them.

use super::types::{PageInfo, PageRequest};
use serde::Serialize;
use std::collections::BTreeSet;

/// One entry of a page navigation bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageControl {
    /// Link to a page
    Page {
        /// Page number
        number: usize,
        /// Link to the page
        href: String,
        /// Whether this is the current page
        active: bool,
    },
    /// Gap between non-adjacent page numbers
    Break,
}

/// Page numbers to display around `current`, `None` marking a gap
///
/// Returns an empty list when `current` is not within `1..=last`.
///
/// ```
/// use solidafy_pager::pagination::displayed_page_numbers;
///
/// assert_eq!(
///     displayed_page_numbers(6, 12),
///     vec![Some(1), None, Some(5), Some(6), Some(7), None, Some(12)]
/// );
/// ```
pub fn displayed_page_numbers(current: usize, last: usize) -> Vec<Option<usize>> {
    if current == 0 || current > last {
        return Vec::new();
    }

    if last <= 5 {
        return (1..=last).map(Some).collect();
    }

    let mut included = BTreeSet::from([1, current - 1, current, current + 1, last]);

    // Keep the head and tail contiguous when the current page is near them
    if current <= 4 {
        included.extend([2, 3]);
    }
    if current + 3 >= last {
        included.extend([last - 1, last - 2]);
    }

    let mut numbers: Vec<Option<usize>> = included
        .into_iter()
        .filter(|&n| n > 0 && n <= last)
        .map(Some)
        .collect();

    if current > 4 {
        numbers.insert(1, None);
    }
    if current + 3 < last {
        numbers.insert(numbers.len() - 1, None);
    }

    numbers
}

/// Navigation controls for a page-number result
pub fn page_controls(info: &PageInfo, request: &PageRequest, page_param: &str) -> Vec<PageControl> {
    displayed_page_numbers(info.number, info.num_pages)
        .into_iter()
        .map(|entry| match entry {
            Some(number) => PageControl::Page {
                number,
                href: request.link([(page_param, number)]).href(),
                active: number == info.number,
            },
            None => PageControl::Break,
        })
        .collect()
}
