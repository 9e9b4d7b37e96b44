pub mod catalog;
pub mod evaluation;
pub mod interview;
pub mod submission;
pub mod task;
pub mod user;

use serde::{Deserialize, Serialize};

/// One page of a list endpoint.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

/// Common pagination query parameters.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    20
}

impl PageQuery {
    /// Clamps to sane bounds and returns (limit, offset).
    pub fn limits(&self) -> (i64, i64) {
        let page = self.page.max(1);
        let page_size = self.page_size.clamp(1, 100);
        (page_size, (page - 1) * page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_limits() {
        let q = PageQuery { page: 3, page_size: 20 };
        assert_eq!(q.limits(), (20, 40));
    }

    #[test]
    fn test_page_query_clamps() {
        let q = PageQuery { page: 0, page_size: 1000 };
        assert_eq!(q.limits(), (100, 0));
    }
}
