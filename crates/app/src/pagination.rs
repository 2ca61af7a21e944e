//! Page requests and paginated results.

/// Number of items per page when the client does not ask for one.
pub const DEFAULT_LIMIT: u32 = 10;

/// Upper bound for a single page.
pub const MAX_LIMIT: u32 = 100;

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Build a page request, clamping out-of-range values.
    #[must_use]
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        }
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of results plus the paginator describing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub data_count: u64,
    pub limit: u32,
    pub page: u32,
    pub page_count: u64,
    pub offset: u64,
    pub paging_counter: u64,
    pub has_prev_page: bool,
    pub has_next_page: bool,
    pub prev_page: Option<u32>,
    pub next_page: Option<u32>,
}

impl<T> Paginated<T> {
    #[must_use]
    pub fn new(data: Vec<T>, data_count: u64, request: PageRequest) -> Self {
        let limit = u64::from(request.limit());
        let page = request.page();
        let page_count = data_count.div_ceil(limit);
        let has_prev_page = page > 1;
        let has_next_page = u64::from(page) < page_count;

        Self {
            data,
            data_count,
            limit: request.limit(),
            page,
            page_count,
            offset: request.offset(),
            paging_counter: request.offset() + 1,
            has_prev_page,
            has_next_page,
            prev_page: has_prev_page.then(|| page - 1),
            next_page: has_next_page.then(|| page + 1),
        }
    }

    /// Convert the items of the page, keeping the paginator.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            data_count: self.data_count,
            limit: self.limit,
            page: self.page,
            page_count: self.page_count,
            offset: self.offset,
            paging_counter: self.paging_counter,
            has_prev_page: self.has_prev_page,
            has_next_page: self.has_next_page,
            prev_page: self.prev_page,
            next_page: self.next_page,
        }
    }
}
