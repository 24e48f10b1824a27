use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::TodoResponse;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// Query parameters accepted by `GET /todos`.
///
/// Bounds are checked when the query is turned into a [`PageRequest`].
#[derive(Debug, Clone, Deserialize)]
pub struct TodoListQuery {
    /// 1-based page number.
    #[serde(default = "default_page")]
    pub page: i64,

    #[serde(default = "default_limit")]
    pub limit: i64,

    /// Restrict the listing to completed (or open) todos.
    #[serde(default)]
    pub completed: Option<bool>,
}

impl Default for TodoListQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            completed: None,
        }
    }
}

/// A validated, 0-based window over a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Converts a 1-based page number into a row offset.
    pub fn new(page: i64, limit: i64) -> Result<Self, AppError> {
        if page < 1 {
            return Err(AppError::ValidationError("page must be at least 1".into()));
        }
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(AppError::ValidationError(format!(
                "limit must be between 1 and {}",
                MAX_LIMIT
            )));
        }
        let offset = (page - 1)
            .checked_mul(limit)
            .ok_or_else(|| AppError::ValidationError("page is out of range".into()))?;
        Ok(Self { offset, limit })
    }
}

/// One page of the caller's todos plus the size of the full set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedTodoResponse {
    pub data: Vec<TodoResponse>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
}
