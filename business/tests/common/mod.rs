//! In-memory collaborators for controller tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use techops_business::{
    ApiError, ApiResponse, ApiResult, ConfirmDialog, DialogOutcome, Dialogs, NewUser, PageResult,
    StatusChange, UnlockRequest, UserItem, UserListParams, UserService, UserStatus,
};

/// One call received by [`FakeUserService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetUsers(UserListParams),
    EnableDisable(StatusChange),
    Unlock(UnlockRequest),
    AddUser(NewUser),
}

/// Records every call and answers list queries from a queue.
#[derive(Debug, Default)]
pub struct FakeUserService {
    calls: Mutex<Vec<Call>>,
    pages: Mutex<VecDeque<ApiResult<ApiResponse<PageResult<UserItem>>>>>,
    mutation_error: Mutex<Option<ApiError>>,
}

impl FakeUserService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the answer of the next `get_users` call.
    pub fn push_page(&self, outcome: ApiResult<ApiResponse<PageResult<UserItem>>>) -> &Self {
        self.pages.lock().unwrap().push_back(outcome);
        self
    }

    /// Make every mutation fail with `err`.
    pub fn fail_mutations(&self, err: ApiError) {
        *self.mutation_error.lock().unwrap() = Some(err);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn query_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::GetUsers(_)))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn mutation_result<T>(&self, data: T) -> ApiResult<ApiResponse<T>> {
        match self.mutation_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(ApiResponse::success(data)),
        }
    }
}

#[async_trait]
impl UserService for FakeUserService {
    async fn get_users(
        &self,
        params: UserListParams,
    ) -> ApiResult<ApiResponse<PageResult<UserItem>>> {
        self.record(Call::GetUsers(params));
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ApiResponse::empty()))
    }

    async fn enable_disable_user(&self, change: StatusChange) -> ApiResult<ApiResponse<Value>> {
        self.record(Call::EnableDisable(change));
        self.mutation_result(Value::Null)
    }

    async fn unlock(&self, request: UnlockRequest) -> ApiResult<ApiResponse<Value>> {
        self.record(Call::Unlock(request));
        self.mutation_result(Value::Null)
    }

    async fn add_user(&self, user: NewUser) -> ApiResult<ApiResponse<UserItem>> {
        self.record(Call::AddUser(user.clone()));
        self.mutation_result(UserItem::new(100, user.email, UserStatus::Enabled))
    }
}

/// Answers dialogs from a queue; an empty queue cancels.
#[derive(Debug, Default)]
pub struct ScriptedDialogs {
    outcomes: Mutex<VecDeque<DialogOutcome>>,
    confirms: Mutex<Vec<ConfirmDialog>>,
    add_user_opened: Mutex<usize>,
    add_user_error: Mutex<Option<ApiError>>,
}

impl ScriptedDialogs {
    pub fn answering(outcomes: impl IntoIterator<Item = DialogOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Make the next add-user form fail its submission with `err`.
    pub fn fail_add_user(self, err: ApiError) -> Self {
        *self.add_user_error.lock().unwrap() = Some(err);
        self
    }

    pub fn confirms(&self) -> Vec<ConfirmDialog> {
        self.confirms.lock().unwrap().clone()
    }

    pub fn add_user_opened(&self) -> usize {
        *self.add_user_opened.lock().unwrap()
    }

    fn next_outcome(&self) -> DialogOutcome {
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(DialogOutcome::Cancelled)
    }
}

#[async_trait]
impl Dialogs for ScriptedDialogs {
    async fn confirm(&self, dialog: ConfirmDialog) -> DialogOutcome {
        self.confirms.lock().unwrap().push(dialog);
        self.next_outcome()
    }

    async fn add_user(&self) -> Result<DialogOutcome, ApiError> {
        *self.add_user_opened.lock().unwrap() += 1;
        match self.add_user_error.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(self.next_outcome()),
        }
    }
}

pub fn sample_users(range: std::ops::RangeInclusive<i64>) -> Vec<UserItem> {
    range
        .map(|id| UserItem::new(id, format!("u{id}@example.com"), UserStatus::Enabled))
        .collect()
}

pub fn page(
    data: Vec<UserItem>,
    current_page: u32,
    total_count: u64,
    page_size: u32,
) -> ApiResult<ApiResponse<PageResult<UserItem>>> {
    Ok(ApiResponse::success(PageResult {
        data,
        current_page,
        total_count,
        page_size,
    }))
}
