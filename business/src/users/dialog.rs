//! Modal dialogs the controller opens.
//!
//! A dialog is awaited like any other call and resolves to a
//! [`DialogOutcome`]; the controller branches on it directly.

use async_trait::async_trait;

use crate::error::ApiError;

/// How a dialog was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    Accepted,
    Cancelled,
}

impl DialogOutcome {
    pub fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl From<bool> for DialogOutcome {
    fn from(accepted: bool) -> Self {
        if accepted {
            Self::Accepted
        } else {
            Self::Cancelled
        }
    }
}

/// A yes/no confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub header: String,
    pub message: String,
}

impl ConfirmDialog {
    pub fn new(header: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            message: message.into(),
        }
    }
}

/// Factory for the dialogs of the user screen.
#[async_trait]
pub trait Dialogs: Send + Sync {
    /// Ask the operator to confirm.
    async fn confirm(&self, dialog: ConfirmDialog) -> DialogOutcome;

    /// Run the add-user form.
    ///
    /// The form submits the new user itself. It resolves `Accepted` once the
    /// user has been created and `Cancelled` when closed without submitting;
    /// a submission the server refuses is the `Err`.
    async fn add_user(&self) -> Result<DialogOutcome, ApiError>;
}
