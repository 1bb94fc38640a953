//! User administration screen.
//!
//! - [`model`]: wire types of the techops user endpoints
//! - [`pagination`] / [`state`]: the screen state and its pure transitions
//! - [`api`]: the service contract and its HTTP implementation
//! - [`dialog`]: the modal contract the controller awaits
//! - [`action`]: operator actions and their dialog texts
//! - [`controller`]: ties the above together

pub mod action;
pub mod api;
pub mod controller;
pub mod dialog;
pub mod model;
pub mod pagination;
pub mod state;

pub use action::{ActionError, UserAction};
pub use api::{HttpUserService, UserService};
pub use controller::{LaunchOutcome, UsersController};
pub use dialog::{ConfirmDialog, DialogOutcome, Dialogs};
pub use model::{
    ApiInfo, ApiResponse, NewUser, PageResult, StatusChange, UnlockRequest, UserItem,
    UserListParams, UserQuery, UserStatus,
};
pub use pagination::Pagination;
pub use state::{LoadStatus, QueryOutcome, UsersState};
