//! Wire types for the techops user endpoints.
//!
//! Field names follow the service's camelCase JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Account status as the service encodes it: `0` enabled, `1` disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum UserStatus {
    #[default]
    Enabled,
    Disabled,
}

impl UserStatus {
    pub fn is_disabled(self) -> bool {
        matches!(self, Self::Disabled)
    }

    /// The status a toggle would move to.
    pub fn toggled(self) -> Self {
        match self {
            Self::Enabled => Self::Disabled,
            Self::Disabled => Self::Enabled,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
        }
    }
}

impl From<u8> for UserStatus {
    fn from(value: u8) -> Self {
        if value == 0 {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }
}

impl From<UserStatus> for u8 {
    fn from(status: UserStatus) -> Self {
        match status {
            UserStatus::Enabled => 0,
            UserStatus::Disabled => 1,
        }
    }
}

/// One row of the user list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserItem {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime<Utc>>,
    /// Consecutive failed logins; a locked account has a non-zero count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_count: Option<u32>,
}

impl UserItem {
    pub fn new(id: i64, email: impl Into<String>, status: UserStatus) -> Self {
        Self {
            id,
            email: email.into(),
            status,
            name: None,
            phone: None,
            created_at: None,
            last_login_at: None,
            fail_count: None,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.fail_count.is_some_and(|count| count > 0)
    }
}

/// Optional list filter. Every `None` field is left out of the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
}

impl UserQuery {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Parameters of one list request: the filter plus the requested window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListParams {
    #[serde(flatten)]
    pub query: UserQuery,
    /// Zero-based page index.
    pub page_number: u32,
    pub page_size: u32,
}

impl UserListParams {
    /// Flatten into `key=value` pairs for a query string.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let Ok(serde_json::Value::Object(map)) = serde_json::to_value(self) else {
            return Vec::new();
        };

        map.into_iter()
            .filter_map(|(key, value)| match value {
                serde_json::Value::Null => None,
                serde_json::Value::String(s) => Some((key, s)),
                other => Some((key, other.to_string())),
            })
            .collect()
    }
}

/// A window of records plus the metadata describing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    /// Zero-based page index the service actually returned.
    pub current_page: u32,
    pub total_count: u64,
    pub page_size: u32,
}

/// One diagnostic entry attached to a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
}

impl ApiInfo {
    pub fn message(&self) -> String {
        self.msg
            .clone()
            .or_else(|| self.name.clone())
            .unwrap_or_else(|| "unknown error".to_owned())
    }
}

/// Response envelope shared by every endpoint.
///
/// A truthy `info` is the error indicator, even when `data` is also set.
/// `null`, `false`, `0` and `""` count as absent; an empty array does not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default = "Option::default", deserialize_with = "lenient_info")]
    pub info: Option<Vec<ApiInfo>>,
}

fn lenient_info<'de, D>(deserializer: D) -> Result<Option<Vec<ApiInfo>>, D::Error>
where
    D: Deserializer<'de>,
{
    let info = match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64().is_some_and(|f| f == 0.0) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Array(entries) => Some(entries.into_iter().map(info_entry).collect()),
        other => Some(vec![info_entry(other)]),
    };
    Ok(info)
}

/// One `info` entry; anything that is not an `{ name, msg }` object becomes the message.
fn info_entry(value: Value) -> ApiInfo {
    match value {
        Value::Object(_) => serde_json::from_value(value.clone()).unwrap_or_else(|_| ApiInfo {
            name: None,
            msg: Some(value.to_string()),
        }),
        Value::String(msg) => ApiInfo {
            name: None,
            msg: Some(msg),
        },
        other => ApiInfo {
            name: None,
            msg: Some(other.to_string()),
        },
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            info: None,
        }
    }

    pub fn empty() -> Self {
        Self {
            data: None,
            info: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.info.is_some()
    }

    pub fn info_messages(&self) -> Vec<String> {
        self.info
            .iter()
            .flatten()
            .map(ApiInfo::message)
            .collect()
    }
}

/// Body of the enable/disable call. `status` is the target status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub id: i64,
    pub status: UserStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockRequest {
    pub id: i64,
}

/// Fields collected by the add-user form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}
