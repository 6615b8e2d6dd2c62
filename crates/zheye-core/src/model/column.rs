use serde::{Deserialize, Serialize};

use super::{EntityId, Image};

/// Default page size used when listing columns.
pub const DEFAULT_PAGE_SIZE: u32 = 6;

/// A column: a publication grouping posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Image>,
    #[serde(default)]
    pub description: String,
}

/// One page of `GET /columns`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPage {
    #[serde(default)]
    pub list: Vec<Column>,
    /// Total number of columns on the server, across all pages.
    #[serde(default)]
    pub count: u64,
}

/// Pagination parameters for `GET /columns`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    pub current_page: u32,
    pub page_size: u32,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageParams {
    pub fn new(current_page: u32, page_size: u32) -> Self {
        Self {
            current_page,
            page_size,
        }
    }

    /// Query string in the server's parameter names.
    pub fn query(self) -> String {
        format!(
            "currentPage={}&pageSize={}",
            self.current_page, self.page_size
        )
    }
}
