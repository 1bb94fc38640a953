//! Techops user service: the contract the controller consumes and the HTTP
//! client that implements it.
//!
//! Endpoints (relative to `BusinessConfig::api_base_url`):
//! - `GET  /user/query` with the list parameters as a query string
//! - `POST /user/enable-disable` body `{ "id", "status" }`
//! - `POST /user/unlock` body `{ "id" }`
//! - `POST /user/add` body `{ "email", "name"?, "phone"? }`
//!
//! Every endpoint answers with an [`ApiResponse`] envelope.

use async_trait::async_trait;
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::BusinessConfig;
use crate::error::{ApiError, ApiResult};
use crate::http::{Client, RequestBuilder};
use crate::users::model::{
    ApiResponse, NewUser, PageResult, StatusChange, UnlockRequest, UserItem, UserListParams,
};

/// Data access used by the user administration screen.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Fetch one page of users. An `info` flag in the envelope is returned as-is.
    async fn get_users(
        &self,
        params: UserListParams,
    ) -> ApiResult<ApiResponse<PageResult<UserItem>>>;

    /// Set a user's status.
    async fn enable_disable_user(&self, change: StatusChange) -> ApiResult<ApiResponse<Value>>;

    /// Clear a user's lock.
    async fn unlock(&self, request: UnlockRequest) -> ApiResult<ApiResponse<Value>>;

    /// Create a user.
    async fn add_user(&self, user: NewUser) -> ApiResult<ApiResponse<UserItem>>;
}

/// [`UserService`] over JSON/HTTP.
#[derive(Debug, Clone)]
pub struct HttpUserService {
    config: BusinessConfig,
    client: Client,
}

impl HttpUserService {
    pub fn new(config: BusinessConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    async fn fetch<T: DeserializeOwned>(
        request: RequestBuilder,
        what: &'static str,
    ) -> ApiResult<ApiResponse<T>> {
        request.send().await?.error_for_status()?.json(what)
    }

    /// POST a mutation and turn an `info` flag into [`ApiError::Rejected`].
    async fn mutate<B, T>(
        &self,
        path: &str,
        body: &B,
        what: &'static str,
    ) -> ApiResult<ApiResponse<T>>
    where
        B: serde::Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        let request = self.client.post(&url).json(body)?;
        let response: ApiResponse<T> = Self::fetch(request, what).await?;

        if response.is_error() {
            return Err(ApiError::Rejected {
                messages: response.info_messages(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl UserService for HttpUserService {
    async fn get_users(
        &self,
        params: UserListParams,
    ) -> ApiResult<ApiResponse<PageResult<UserItem>>> {
        let url = self.config.endpoint("user/query");
        debug!(
            "get_users page={} size={}",
            params.page_number, params.page_size
        );

        let request = params
            .to_query_pairs()
            .into_iter()
            .fold(self.client.get(&url), |request, (key, value)| {
                request.query(key, value)
            });

        let response: ApiResponse<PageResult<UserItem>> =
            Self::fetch(request, "ApiResponse<PageResult<UserItem>>").await?;

        if let Some(page) = &response.data {
            info!(
                "get_users: {} rows (page {}, total {})",
                page.data.len(),
                page.current_page,
                page.total_count
            );
        }
        Ok(response)
    }

    async fn enable_disable_user(&self, change: StatusChange) -> ApiResult<ApiResponse<Value>> {
        info!(
            "enable_disable_user id={} status={}",
            change.id,
            change.status.label()
        );
        self.mutate("user/enable-disable", &change, "ApiResponse<Value>")
            .await
    }

    async fn unlock(&self, request: UnlockRequest) -> ApiResult<ApiResponse<Value>> {
        info!("unlock id={}", request.id);
        self.mutate("user/unlock", &request, "ApiResponse<Value>")
            .await
    }

    async fn add_user(&self, user: NewUser) -> ApiResult<ApiResponse<UserItem>> {
        info!("add_user email={}", user.email);
        self.mutate("user/add", &user, "ApiResponse<UserItem>").await
    }
}
