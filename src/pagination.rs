use serde::Deserialize;

use crate::error::AppError;

pub const MAX_PER_PAGE: u64 = 20;

/// Raw query parameters; bounds are checked by [`PageParams::validate`].
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

fn default_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    10
}

impl Default for PageParams {
    fn default() -> Self {
        Self { page: default_page(), per_page: default_per_page() }
    }
}

impl PageParams {
    pub fn validate(self) -> Result<PageRequest, AppError> {
        if self.page < 1 {
            return Err(AppError::Validation("page must be greater than or equal to 1".into()));
        }
        if self.per_page < 1 || self.per_page > MAX_PER_PAGE {
            return Err(AppError::Validation(format!(
                "per_page must be between 1 and {MAX_PER_PAGE}"
            )));
        }
        Ok(PageRequest { page: self.page, per_page: self.per_page })
    }
}

/// A page window that has passed validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PageRequest {
    page: u64,
    per_page: u64,
}

impl PageRequest {
    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    /// Rows to skip, or `None` when the window starts beyond what SQLite can
    /// address (a signed 64-bit offset).
    pub fn offset(&self) -> Option<u64> {
        (self.page - 1).checked_mul(self.per_page).filter(|offset| *offset <= i64::MAX as u64)
    }

    pub fn total_pages(&self, total_items: u64) -> u64 {
        total_items.div_ceil(self.per_page)
    }

    pub fn prev_link(&self, base: &str) -> Option<String> {
        (self.page > 1).then(|| page_link(base, self.page - 1, self.per_page))
    }

    pub fn next_link(&self, base: &str, total_pages: u64) -> Option<String> {
        (self.page < total_pages).then(|| page_link(base, self.page + 1, self.per_page))
    }
}

fn page_link(base: &str, page: u64, per_page: u64) -> String {
    format!("{base}?page={page}&per_page={per_page}")
}
