use serde_json::Value;
use thiserror::Error;

use crate::users::dialog::ConfirmDialog;
use crate::users::model::{StatusChange, UnlockRequest, UserItem, UserStatus};

/// An operator action on the user screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// Flip a user between enabled and disabled. `disabled` is the current state.
    Status {
        id: i64,
        disabled: bool,
        email: String,
    },
    /// Open the add-user form.
    Add,
    /// Clear a user's lock.
    Unlock { id: i64, email: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("unknown action `{0}`")]
    UnknownAction(String),
    #[error("action `{action}` requires parameter `{field}`")]
    MissingParam {
        action: &'static str,
        field: &'static str,
    },
}

impl UserAction {
    /// Build an action from a tag and a loose parameter object.
    ///
    /// `status` reads `id`, `status` (truthy = currently disabled) and `email`;
    /// `unlock` reads `id` and `email`; `add` takes no parameters.
    pub fn from_tag(tag: &str, params: &Value) -> Result<Self, ActionError> {
        match tag {
            "status" => Ok(Self::Status {
                id: param_id("status", params)?,
                disabled: truthy(params.get("status")),
                email: param_email(params),
            }),
            "add" => Ok(Self::Add),
            "unlock" => Ok(Self::Unlock {
                id: param_id("unlock", params)?,
                email: param_email(params),
            }),
            other => Err(ActionError::UnknownAction(other.to_owned())),
        }
    }

    /// Toggle action for a row of the list.
    pub fn toggle_status(user: &UserItem) -> Self {
        Self::Status {
            id: user.id,
            disabled: user.status.is_disabled(),
            email: user.email.clone(),
        }
    }

    pub fn unlock(user: &UserItem) -> Self {
        Self::Unlock {
            id: user.id,
            email: user.email.clone(),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Status { .. } => "status",
            Self::Add => "add",
            Self::Unlock { .. } => "unlock",
        }
    }

    /// Confirmation shown before the mutation; `Add` uses its own form instead.
    pub fn confirm_dialog(&self) -> Option<ConfirmDialog> {
        match self {
            Self::Status {
                disabled, email, ..
            } => {
                let (header, verb) = if *disabled {
                    ("User - enable", "enable")
                } else {
                    ("User - disable", "disable")
                };
                Some(ConfirmDialog::new(
                    header,
                    format!("Are you sure you want to {verb} user: {email}?"),
                ))
            }
            Self::Unlock { email, .. } => Some(ConfirmDialog::new(
                "Unlock user",
                format!("Are you sure you want to unlock user: {email}?"),
            )),
            Self::Add => None,
        }
    }

    /// Request body of the status call: a disabled user is enabled and vice versa.
    pub fn status_change(&self) -> Option<StatusChange> {
        match self {
            Self::Status { id, disabled, .. } => {
                let current = if *disabled {
                    UserStatus::Disabled
                } else {
                    UserStatus::Enabled
                };
                Some(StatusChange {
                    id: *id,
                    status: current.toggled(),
                })
            }
            Self::Add | Self::Unlock { .. } => None,
        }
    }

    pub fn unlock_request(&self) -> Option<UnlockRequest> {
        match self {
            Self::Unlock { id, .. } => Some(UnlockRequest { id: *id }),
            Self::Add | Self::Status { .. } => None,
        }
    }
}

fn param_id(action: &'static str, params: &Value) -> Result<i64, ActionError> {
    let id = params.get("id").and_then(|v| match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    });
    id.ok_or(ActionError::MissingParam { action, field: "id" })
}

fn param_email(params: &Value) -> String {
    params
        .get("email")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

/// Loose truthiness: `true`, non-zero numbers and non-empty strings.
fn truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
        Some(Value::Null) | None => false,
    }
}
