use serde::{Deserialize, Serialize};

use super::model::Task;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Deserialize)]
pub struct CreateTask {
    pub title: Option<String>,
}

/// Raw query-string inputs. Pagination values arrive as text so anything
/// non-numeric can fall back to the defaults instead of rejecting.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListTasksParams {
    pub q: Option<String>,
    pub page: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
}

impl ListTasksParams {
    pub fn window(&self) -> PageWindow {
        PageWindow::resolve(self.page.as_deref(), self.page_size.as_deref())
    }
}

/// The (offset, limit) pair derived from page/pageSize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub page_size: i64,
}

impl PageWindow {
    pub fn resolve(page: Option<&str>, page_size: Option<&str>) -> Self {
        let page = page
            .and_then(|raw| raw.parse::<i64>().ok())
            .unwrap_or(DEFAULT_PAGE)
            .max(1);

        let page_size = page_size
            .and_then(|raw| raw.parse::<i64>().ok())
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        Self { page, page_size }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }

    pub fn total_pages(&self, total: i64) -> i64 {
        (total + self.page_size - 1) / self.page_size
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPage {
    pub items: Vec<Task>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_params_use_defaults() {
        let window = PageWindow::resolve(None, None);

        assert_eq!(window.page, 1);
        assert_eq!(window.page_size, 10);
    }

    #[test]
    fn non_numeric_params_fall_back_to_defaults() {
        let window = PageWindow::resolve(Some("abc"), Some("lots"));

        assert_eq!(window.page, 1);
        assert_eq!(window.page_size, 10);
    }

    #[test]
    fn page_is_floored_at_one() {
        assert_eq!(PageWindow::resolve(Some("0"), None).page, 1);
        assert_eq!(PageWindow::resolve(Some("-3"), None).page, 1);
    }

    #[test]
    fn page_size_is_clamped() {
        assert_eq!(PageWindow::resolve(None, Some("500")).page_size, 100);
        assert_eq!(PageWindow::resolve(None, Some("0")).page_size, 1);
        assert_eq!(PageWindow::resolve(None, Some("37")).page_size, 37);
    }

    #[test]
    fn offset_skips_earlier_pages() {
        let window = PageWindow::resolve(Some("3"), Some("5"));

        assert_eq!(window.offset(), 10);
    }

    #[test]
    fn total_pages_rounds_up() {
        let window = PageWindow::resolve(None, Some("5"));

        assert_eq!(window.total_pages(12), 3);
        assert_eq!(window.total_pages(10), 2);
        assert_eq!(window.total_pages(1), 1);
        assert_eq!(window.total_pages(0), 0);
    }
}
