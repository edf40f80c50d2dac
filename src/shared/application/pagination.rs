/// Cursor pagination shared by list queries
///
/// The cursor is an opaque string to callers; internally it is the decimal
/// offset of the next item. An empty cursor means "start" on input and
/// "done" on output.
use serde::{Deserialize, Serialize};

use crate::shared::errors::{AppError, AppResult};

/// Pagination parameters for cursor-based queries
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub cursor: Option<String>,
    pub num_items: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            cursor: None,
            num_items: 20,
        }
    }
}

impl PageRequest {
    pub fn first(num_items: usize) -> Self {
        Self {
            cursor: None,
            num_items,
        }
    }

    pub fn after(cursor: impl Into<String>, num_items: usize) -> Self {
        Self {
            cursor: Some(cursor.into()),
            num_items,
        }
    }

    /// Offset encoded in the cursor; missing or empty cursor starts at 0
    pub fn offset(&self) -> AppResult<usize> {
        match self.cursor.as_deref() {
            None | Some("") => Ok(0),
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|_| AppError::InvalidInput(format!("Invalid page cursor '{}'", raw))),
        }
    }
}

/// One page of results plus the cursor to continue from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorPage<T> {
    pub page: Vec<T>,
    pub is_done: bool,
    pub continue_cursor: String,
}

impl<T> CursorPage<T> {
    pub fn empty() -> Self {
        Self {
            page: Vec::new(),
            is_done: true,
            continue_cursor: String::new(),
        }
    }

    /// Slice an already ordered list according to the request
    pub fn slice(all: Vec<T>, request: &PageRequest) -> AppResult<Self> {
        let start = request.offset()?;
        let end = start.saturating_add(request.num_items);
        let total = all.len();

        let page: Vec<T> = all
            .into_iter()
            .skip(start)
            .take(request.num_items)
            .collect();

        let is_done = end >= total;
        let continue_cursor = if is_done {
            String::new()
        } else {
            end.to_string()
        };

        Ok(Self {
            page,
            is_done,
            continue_cursor,
        })
    }
}
