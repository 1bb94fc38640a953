//! Business layer of the techops user administration screen.
//!
//! Front ends construct a [`UsersController`] with a [`UserService`] and a
//! [`Dialogs`] implementation, then render the [`UsersState`] values it
//! publishes.

mod config;
mod error;
pub mod http;
pub mod users;

pub use config::{BusinessConfig, DEFAULT_PAGE_SIZE};
pub use error::{ApiError, ApiResult};
pub use users::{
    ActionError, ApiInfo, ApiResponse, ConfirmDialog, DialogOutcome, Dialogs, HttpUserService,
    LaunchOutcome, LoadStatus, NewUser, PageResult, Pagination, StatusChange, UnlockRequest,
    UserAction, UserItem, UserListParams, UserQuery, UserService, UserStatus, UsersController,
    UsersState,
};
