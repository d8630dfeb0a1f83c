use std::ops::Range;

/// Page window over a list of rendered rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// 1-based, always within `1..=total_pages`
    pub current_page: usize,
    pub page_size: usize,
    pub total_items: usize,
}

impl Page {
    /// Create a page window, clamping `requested` into range
    pub fn new(total_items: usize, page_size: usize, requested: usize) -> Self {
        let page_size = page_size.max(1);
        let mut page = Page {
            current_page: 1,
            page_size,
            total_items,
        };
        page.current_page = requested.clamp(1, page.total_pages());
        page
    }

    /// Get total number of pages (an empty list still has one page)
    pub fn total_pages(&self) -> usize {
        ((self.total_items + self.page_size - 1) / self.page_size).max(1)
    }

    /// Index range of the rows on the current page
    pub fn range(&self) -> Range<usize> {
        let start = (self.current_page - 1) * self.page_size;
        let end = (start + self.page_size).min(self.total_items);
        start.min(end)..end
    }

    /// Check if on first page
    pub fn is_first(&self) -> bool {
        self.current_page == 1
    }

    /// Check if on last page
    pub fn is_last(&self) -> bool {
        self.current_page == self.total_pages()
    }

    /// Footer line, e.g. `Page 2/5 (93 total)`
    pub fn footer(&self, noun: &str) -> String {
        format!(
            "Page {}/{} ({} {})",
            self.current_page,
            self.total_pages(),
            self.total_items,
            noun
        )
    }
}
