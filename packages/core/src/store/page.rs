/// A validated, zero-based page request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    page_number: u64,
    limit: u64,
}

impl PageRequest {
    /// Returns `None` when the page number is negative or the limit is not
    /// positive. Such requests address no rows at all.
    pub fn new(page_number: i64, limit: i64) -> Option<Self> {
        if page_number < 0 || limit <= 0 {
            return None;
        }
        Some(Self {
            page_number: page_number as u64,
            limit: limit as u64,
        })
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Number of rows preceding this page. Saturates for absurd page numbers.
    pub fn offset(&self) -> u64 {
        self.page_number.saturating_mul(self.limit)
    }
}
