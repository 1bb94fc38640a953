//! State of the user administration screen.
//!
//! Every transition consumes the current value and returns the next one;
//! nothing here performs IO. The controller stores the result and publishes
//! it to the renderer.

use techops_states::State;

use crate::error::ApiResult;
use crate::users::model::{ApiResponse, PageResult, UserItem};
use crate::users::pagination::Pagination;

/// What the list area should show besides the rows themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// Nothing special: show the rows.
    #[default]
    None,
    Loading,
    Error,
    Empty,
}

impl LoadStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Loading => "loading",
            Self::Error => "error",
            Self::Empty => "empty",
        }
    }
}

impl std::fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one list fetch as the state layer consumes it.
pub type QueryOutcome = ApiResult<ApiResponse<PageResult<UserItem>>>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UsersState {
    pub users: Vec<UserItem>,
    pub pagination: Pagination,
    pub status: LoadStatus,
}

impl State for UsersState {
    const TYPE: &'static str = "users";
}

impl UsersState {
    pub fn new(page_size: u32) -> Self {
        Self {
            users: Vec::new(),
            pagination: Pagination::with_page_size(page_size),
            status: LoadStatus::None,
        }
    }

    /// A fetch was issued: rows are cleared until it completes.
    #[must_use]
    pub fn begin_query(self) -> Self {
        Self {
            users: Vec::new(),
            status: LoadStatus::Loading,
            ..self
        }
    }

    /// Fold a completed fetch into the state.
    #[must_use]
    pub fn apply_query(self, outcome: QueryOutcome) -> Self {
        match outcome {
            Err(_) => Self {
                users: Vec::new(),
                status: LoadStatus::Error,
                ..self
            },
            Ok(response) if response.is_error() => Self {
                users: Vec::new(),
                status: LoadStatus::Error,
                ..self
            },
            Ok(ApiResponse { data: None, .. }) => Self {
                users: Vec::new(),
                status: LoadStatus::Empty,
                ..self
            },
            Ok(ApiResponse {
                data: Some(page), ..
            }) => Self {
                pagination: self.pagination.apply(&page),
                users: page.data,
                status: LoadStatus::None,
            },
        }
    }

    /// Change the requested page without fetching.
    #[must_use]
    pub fn with_pagination(self, pagination: Pagination) -> Self {
        Self { pagination, ..self }
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }
}
