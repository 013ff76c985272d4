//! Fixed-size pagination of the record history

use serde::{Deserialize, Serialize};

use crate::error::{ProcessorError, Result};

/// Records per history page unless configured otherwise
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// One page of items
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page<T> {
    /// Items in current page
    pub items: Vec<T>,
    /// Total number of items across all pages
    pub total: usize,
    /// Current page number, 1-based
    pub page: usize,
    /// Page size
    pub page_size: usize,
    /// Total number of pages, at least 1
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Slices sorted sequences into pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(ProcessorError::Configuration(
                "page_size must be greater than 0".to_string(),
            ));
        }
        Ok(Self { page_size })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `max(1, ceil(len / page_size))`
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size).max(1)
    }

    /// Clamp a requested page into `1..=total_pages`
    pub fn clamp_page(&self, page: usize, len: usize) -> usize {
        page.clamp(1, self.total_pages(len))
    }

    /// Items `[(page-1)*size, page*size)` after clamping `page`
    pub fn page<T: Clone>(&self, items: &[T], page: usize) -> Page<T> {
        let page = self.clamp_page(page, items.len());
        let start = (page - 1) * self.page_size;
        let end = (start + self.page_size).min(items.len());

        Page {
            items: items.get(start..end).map(<[T]>::to_vec).unwrap_or_default(),
            total: items.len(),
            page,
            page_size: self.page_size,
            total_pages: self.total_pages(items.len()),
        }
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_page_size_rejected() {
        assert!(matches!(Paginator::new(0), Err(ProcessorError::Configuration(_))));
    }

    #[test]
    fn test_total_pages() {
        let paginator = Paginator::default();
        assert_eq!(paginator.total_pages(0), 1);
        assert_eq!(paginator.total_pages(1), 1);
        assert_eq!(paginator.total_pages(20), 1);
        assert_eq!(paginator.total_pages(21), 2);
        assert_eq!(paginator.total_pages(45), 3);
    }

    #[test]
    fn test_pages_of_45() {
        let items: Vec<u32> = (0..45).collect();
        let paginator = Paginator::default();

        let third = paginator.page(&items, 3);
        assert_eq!(third.items, (40..45).collect::<Vec<_>>());
        assert_eq!(third.total_pages, 3);
        assert!(third.has_previous());
        assert!(!third.has_next());

        let clamped = paginator.page(&items, 4);
        assert_eq!(clamped.page, 3);
        assert_eq!(clamped.items, third.items);

        let first = paginator.page(&items, 0);
        assert_eq!(first.page, 1);
        assert_eq!(first.items.len(), 20);
    }

    #[test]
    fn test_concatenated_pages_reproduce_input() {
        for len in [0usize, 1, 19, 20, 21, 40, 59, 60, 61] {
            let items: Vec<usize> = (0..len).collect();
            let paginator = Paginator::default();
            let total_pages = paginator.total_pages(len);

            let joined: Vec<usize> = (1..=total_pages)
                .flat_map(|page| paginator.page(&items, page).items)
                .collect();
            assert_eq!(joined, items, "len {len}");
        }
    }

    #[test]
    fn test_empty_page() {
        let page = Paginator::new(5).unwrap().page::<u8>(&[], 2);
        assert!(page.items.is_empty());
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
    }
}
