//! Pagination primitives for listing queries

use crate::domain::DomainError;

/// Zero-based page window for a listing query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Create a page request. The size must be at least 1.
    pub fn new(page: u32, size: u32) -> Result<Self, DomainError> {
        if size < 1 {
            return Err(DomainError::validation("Page size must be at least 1"));
        }

        Ok(Self { page, size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of records skipped before this page
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// One page of results plus the total count across the whole result set
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    items: Vec<T>,
    page: u32,
    size: u32,
    total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        Self {
            items,
            page: request.page,
            size: request.size,
            total_elements,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    /// Total number of pages, rounding up
    pub fn total_pages(&self) -> u64 {
        self.total_elements.div_ceil(u64::from(self.size))
    }

    /// Map the page contents, keeping the pagination metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
        }
    }

    /// Build a page by slicing an already ordered complete result set
    pub fn from_complete(items: Vec<T>, request: &PageRequest) -> Self {
        let total_elements = items.len() as u64;
        let start = (request.offset() as usize).min(items.len());
        let items: Vec<T> = items
            .into_iter()
            .skip(start)
            .take(request.size() as usize)
            .collect();

        Self {
            items,
            page: request.page(),
            size: request.size(),
            total_elements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_rejects_zero_size() {
        let result = PageRequest::new(0, 0);
        assert!(result.is_err());
    }

    #[test]
    fn test_page_request_offset() {
        let request = PageRequest::new(2, 10).unwrap();
        assert_eq!(request.offset(), 20);

        let first = PageRequest::new(0, 25).unwrap();
        assert_eq!(first.offset(), 0);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let request = PageRequest::new(0, 10).unwrap();
        let page = Page::new(vec![1, 2, 3], &request, 25);
        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn test_total_pages_exact_division() {
        let request = PageRequest::new(0, 10).unwrap();
        let page = Page::new(vec![1, 2], &request, 20);
        assert_eq!(page.total_pages(), 2);
    }

    #[test]
    fn test_total_pages_empty() {
        let request = PageRequest::new(0, 10).unwrap();
        let page: Page<i32> = Page::new(vec![], &request, 0);
        assert_eq!(page.total_pages(), 0);
        assert!(page.items().is_empty());
    }

    #[test]
    fn test_from_complete_slices_requested_window() {
        let all: Vec<i32> = (1..=25).collect();

        let request = PageRequest::new(1, 10).unwrap();
        let page = Page::from_complete(all.clone(), &request);
        assert_eq!(page.items(), &(11..=20).collect::<Vec<i32>>()[..]);
        assert_eq!(page.total_elements(), 25);
        assert_eq!(page.total_pages(), 3);

        // Window past the end comes back empty, total unchanged
        let request = PageRequest::new(5, 10).unwrap();
        let page = Page::from_complete(all, &request);
        assert!(page.items().is_empty());
        assert_eq!(page.total_elements(), 25);
    }

    #[test]
    fn test_map_keeps_metadata() {
        let request = PageRequest::new(1, 2).unwrap();
        let page = Page::new(vec![1, 2], &request, 5);

        let mapped = page.map(|n| n.to_string());
        assert_eq!(mapped.items(), &["1".to_string(), "2".to_string()]);
        assert_eq!(mapped.page(), 1);
        assert_eq!(mapped.size(), 2);
        assert_eq!(mapped.total_elements(), 5);
        assert_eq!(mapped.total_pages(), 3);
    }
}
