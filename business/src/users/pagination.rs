use crate::config::DEFAULT_PAGE_SIZE;
use crate::users::model::PageResult;

/// Window over the user list.
///
/// `cur_page` is 1-based as shown to people; requests use the 0-based
/// [`Pagination::request_page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub cur_page: u32,
    pub page_size: u32,
    pub total_count: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            cur_page: 1,
            page_size: page_size.max(1),
            total_count: 0,
        }
    }

    /// Zero-based page index to send to the service.
    pub fn request_page(&self) -> u32 {
        self.cur_page.saturating_sub(1)
    }

    /// Take page metadata from a completed fetch.
    #[must_use]
    pub fn apply<T>(self, page: &PageResult<T>) -> Self {
        Self {
            cur_page: page.current_page.saturating_add(1),
            page_size: page.page_size,
            total_count: page.total_count,
        }
    }

    pub fn total_pages(&self) -> u32 {
        if self.page_size == 0 || self.total_count == 0 {
            return 0;
        }
        let pages = self.total_count.div_ceil(u64::from(self.page_size));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn has_next(&self) -> bool {
        self.cur_page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.cur_page > 1
    }

    /// Move to `page`, never below 1.
    #[must_use]
    pub fn go_to(self, page: u32) -> Self {
        Self {
            cur_page: page.max(1),
            ..self
        }
    }

    /// `None` when already on the last page.
    pub fn next_page(self) -> Option<Self> {
        self.has_next().then(|| self.go_to(self.cur_page + 1))
    }

    /// `None` when already on the first page.
    pub fn prev_page(self) -> Option<Self> {
        self.has_prev().then(|| self.go_to(self.cur_page - 1))
    }
}
