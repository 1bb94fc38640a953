//! Controller of the user administration screen.
//!
//! Owns the [`UsersState`] value, runs list queries against a
//! [`UserService`] and drives the modal flow of each [`UserAction`]:
//! open dialog, await the decision, perform the mutation, refresh on success.
//!
//! Every state transition is published to the attached
//! [`StateUpdater`] (if any) so a renderer can follow along.

use log::{debug, error, info, warn};
use serde_json::Value;
use techops_states::StateUpdater;

use crate::config::BusinessConfig;
use crate::error::ApiError;
use crate::users::action::{ActionError, UserAction};
use crate::users::api::UserService;
use crate::users::dialog::{DialogOutcome, Dialogs};
use crate::users::model::{UserListParams, UserQuery};
use crate::users::state::UsersState;

/// What a launched action ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// The dialog was dismissed; nothing was called.
    Cancelled,
    /// The mutation succeeded and the list was fetched again.
    Refreshed,
    /// The mutation failed. It has been logged; the list is untouched.
    Failed(ApiError),
}

pub struct UsersController<S, D> {
    service: S,
    dialogs: D,
    filter: Option<UserQuery>,
    state: UsersState,
    updater: Option<StateUpdater<UsersState>>,
}

impl<S, D> std::fmt::Debug for UsersController<S, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsersController")
            .field("filter", &self.filter)
            .field("state", &self.state)
            .field("updater", &self.updater.is_some())
            .finish_non_exhaustive()
    }
}

impl<S, D> UsersController<S, D>
where
    S: UserService,
    D: Dialogs,
{
    pub fn new(service: S, dialogs: D, config: &BusinessConfig) -> Self {
        Self {
            service,
            dialogs,
            filter: None,
            state: UsersState::new(config.page_size),
            updater: None,
        }
    }

    /// Build the controller and run the first list query.
    pub async fn start(service: S, dialogs: D, config: &BusinessConfig) -> Self {
        let mut controller = Self::new(service, dialogs, config);
        controller.query_users().await;
        controller
    }

    /// Publish every state transition to `updater`.
    #[must_use]
    pub fn with_updater(mut self, updater: StateUpdater<UsersState>) -> Self {
        self.updater = Some(updater);
        self
    }

    /// Set the initial filter without fetching.
    #[must_use]
    pub fn with_filter(mut self, filter: Option<UserQuery>) -> Self {
        self.filter = filter.filter(|query| !query.is_empty());
        self
    }

    pub fn state(&self) -> &UsersState {
        &self.state
    }

    pub fn filter(&self) -> Option<&UserQuery> {
        self.filter.as_ref()
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn dialogs(&self) -> &D {
        &self.dialogs
    }

    /// Parameters the next list query will send.
    pub fn list_params(&self) -> UserListParams {
        UserListParams {
            query: self.filter.clone().unwrap_or_default(),
            page_number: self.state.pagination.request_page(),
            page_size: self.state.pagination.page_size,
        }
    }

    /// Fetch the current page with the current filter.
    pub async fn query_users(&mut self) {
        let params = self.list_params();
        info!(
            "query_users: page {} (size {})",
            params.page_number, params.page_size
        );

        self.transition(UsersState::begin_query);
        let outcome = self.service.get_users(params).await;

        match &outcome {
            Ok(response) if response.is_error() => {
                warn!("query_users: service flagged error: {:?}", response.info_messages());
            }
            Ok(_) => {}
            Err(err) => error!("query_users: {err}"),
        }

        self.transition(|state| state.apply_query(outcome));
        debug!("query_users: status={:?}", self.state.status);
    }

    /// Replace the filter, go back to the first page and fetch.
    pub async fn set_filter(&mut self, filter: Option<UserQuery>) {
        self.filter = filter.filter(|query| !query.is_empty());
        self.transition(|state| {
            let pagination = state.pagination.go_to(1);
            state.with_pagination(pagination)
        });
        self.query_users().await;
    }

    pub async fn go_to_page(&mut self, page: u32) {
        self.transition(|state| {
            let pagination = state.pagination.go_to(page);
            state.with_pagination(pagination)
        });
        self.query_users().await;
    }

    /// Returns `false` without fetching when already on the last page.
    pub async fn next_page(&mut self) -> bool {
        let Some(pagination) = self.state.pagination.next_page() else {
            return false;
        };
        self.transition(|state| state.with_pagination(pagination));
        self.query_users().await;
        true
    }

    /// Returns `false` without fetching when already on the first page.
    pub async fn prev_page(&mut self) -> bool {
        let Some(pagination) = self.state.pagination.prev_page() else {
            return false;
        };
        self.transition(|state| state.with_pagination(pagination));
        self.query_users().await;
        true
    }

    /// Parse `tag` and `params` into an action and run it.
    pub async fn launch_tag(
        &mut self,
        tag: &str,
        params: &Value,
    ) -> Result<LaunchOutcome, ActionError> {
        let action = UserAction::from_tag(tag, params)?;
        Ok(self.launch(action).await)
    }

    /// Run an action through its dialog and, when accepted, its mutation.
    pub async fn launch(&mut self, action: UserAction) -> LaunchOutcome {
        info!("launch: {}", action.tag());

        match &action {
            UserAction::Add => match self.dialogs.add_user().await {
                Ok(DialogOutcome::Accepted) => {
                    self.query_users().await;
                    LaunchOutcome::Refreshed
                }
                Ok(DialogOutcome::Cancelled) => LaunchOutcome::Cancelled,
                Err(err) => {
                    error!("launch: add failed: {err}");
                    LaunchOutcome::Failed(err)
                }
            },
            UserAction::Status { .. } | UserAction::Unlock { .. } => {
                if !self.confirm(&action).await.is_accepted() {
                    debug!("launch: {} cancelled", action.tag());
                    return LaunchOutcome::Cancelled;
                }

                let result = match (action.status_change(), action.unlock_request()) {
                    (Some(change), _) => self.service.enable_disable_user(change).await.map(drop),
                    (None, Some(request)) => self.service.unlock(request).await.map(drop),
                    (None, None) => return LaunchOutcome::Cancelled,
                };

                match result {
                    Ok(()) => {
                        self.query_users().await;
                        LaunchOutcome::Refreshed
                    }
                    Err(err) => {
                        error!("launch: {} failed: {err}", action.tag());
                        LaunchOutcome::Failed(err)
                    }
                }
            }
        }
    }

    async fn confirm(&self, action: &UserAction) -> DialogOutcome {
        match action.confirm_dialog() {
            Some(dialog) => self.dialogs.confirm(dialog).await,
            None => DialogOutcome::Accepted,
        }
    }

    fn transition(&mut self, f: impl FnOnce(UsersState) -> UsersState) {
        self.state = f(std::mem::take(&mut self.state));

        if let Some(updater) = &self.updater
            && let Err(err) = updater.set(self.state.clone())
        {
            debug!("no renderer attached: {err}");
            self.updater = None;
        }
    }
}
