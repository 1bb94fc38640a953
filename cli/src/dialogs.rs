//! Terminal implementation of the controller's dialogs.
//!
//! Confirmations are `inquire` yes/no prompts. The add-user form asks for the
//! fields that were not given on the command line and submits them through the
//! user service. A refused submission surfaces as the service error.

use async_trait::async_trait;
use inquire::{Confirm, Text};
use techops_business::{ApiError, ConfirmDialog, DialogOutcome, Dialogs, NewUser, UserService};
use tracing::{error, info, warn};

use crate::output::Output;

/// Dialogs backed by interactive prompts.
pub struct TerminalDialogs<S> {
    service: S,
    assume_yes: bool,
    preset: NewUser,
}

impl<S: UserService> TerminalDialogs<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            assume_yes: false,
            preset: NewUser::default(),
        }
    }

    /// Accept every confirmation without prompting.
    #[must_use]
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    /// Pre-fill the add-user form; fields left empty are prompted for.
    #[must_use]
    pub fn with_new_user(mut self, preset: NewUser) -> Self {
        self.preset = preset;
        self
    }

    fn prompt_form(&self) -> Option<NewUser> {
        let email = match non_empty(&self.preset.email) {
            Some(email) => email,
            None => optional_text("Email:", "Press Esc to cancel")?,
        };
        let name = match &self.preset.name {
            Some(name) => Some(name.clone()),
            None => optional_text("Name:", "Press Enter to skip"),
        };
        let phone = match &self.preset.phone {
            Some(phone) => Some(phone.clone()),
            None => optional_text("Phone:", "Press Enter to skip"),
        };

        Some(NewUser {
            email,
            name,
            phone,
        })
    }
}

fn optional_text(label: &str, help: &str) -> Option<String> {
    match Text::new(label).with_help_message(help).prompt_skippable() {
        Ok(answer) => answer,
        Err(err) => {
            warn!(%err, label, "prompt failed");
            None
        }
    }
}

#[async_trait]
impl<S: UserService> Dialogs for TerminalDialogs<S> {
    async fn confirm(&self, dialog: ConfirmDialog) -> DialogOutcome {
        if self.assume_yes {
            info!(header = %dialog.header, "confirmation skipped");
            return DialogOutcome::Accepted;
        }

        Output::new().header(&dialog.header);
        match Confirm::new(&dialog.message).with_default(false).prompt() {
            Ok(answer) => answer.into(),
            Err(err) => {
                warn!(%err, header = %dialog.header, "confirmation prompt failed");
                DialogOutcome::Cancelled
            }
        }
    }

    async fn add_user(&self) -> Result<DialogOutcome, ApiError> {
        let out = Output::new();
        out.header("Add user");

        let Some(form) = self.prompt_form() else {
            return Ok(DialogOutcome::Cancelled);
        };
        let user = match validate_new_user(form) {
            Ok(user) => user,
            Err(reason) => {
                out.error(reason);
                return Ok(DialogOutcome::Cancelled);
            }
        };

        let response = self
            .service
            .add_user(user)
            .await
            .inspect_err(|err| error!(%err, "add_user failed"))?;
        match response.data {
            Some(created) => {
                out.success(format!("Created user {} ({})", created.email, created.id));
            }
            None => out.success("User created"),
        }
        Ok(DialogOutcome::Accepted)
    }
}

/// Trim the form and check the email before it is submitted.
pub fn validate_new_user(form: NewUser) -> Result<NewUser, String> {
    let email = form.email.trim().to_owned();
    if email.is_empty() {
        return Err("Email is required".to_owned());
    }
    let Some((local, domain)) = email.split_once('@') else {
        warn!(%email, "rejected email");
        return Err(format!("`{email}` is not an email address"));
    };
    if local.is_empty() || domain.is_empty() {
        return Err(format!("`{email}` is not an email address"));
    }

    Ok(NewUser {
        email,
        name: form.name.as_deref().and_then(non_empty),
        phone: form.phone.as_deref().and_then(non_empty),
    })
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}
