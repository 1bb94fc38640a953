//! Interactive user browser.
//!
//! Shows the current page, then offers the actions that make sense for it
//! until the operator quits.

use std::fmt;

use anyhow::{Context as _, Result};
use inquire::{Select, Text};
use techops_business::{BusinessConfig, UserAction, UserItem, UserQuery, UsersState};
use tracing::{instrument, warn};

use crate::context::{TerminalController, build_controller, refresh};
use crate::output::Output;
use crate::render::Renderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    NextPage,
    PrevPage,
    ToggleStatus,
    Unlock,
    Add,
    Filter,
    Refresh,
    Quit,
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NextPage => "→ Next page",
            Self::PrevPage => "← Previous page",
            Self::ToggleStatus => "Enable / disable a user",
            Self::Unlock => "Unlock a user",
            Self::Add => "Add a user",
            Self::Filter => "Filter by email",
            Self::Refresh => "Refresh",
            Self::Quit => "Quit",
        })
    }
}

/// Entries offered for `state`: paging only where a page exists, row
/// actions only when there are rows.
pub fn menu_items(state: &UsersState) -> Vec<MenuItem> {
    let mut items = Vec::new();
    if state.pagination.has_next() {
        items.push(MenuItem::NextPage);
    }
    if state.pagination.has_prev() {
        items.push(MenuItem::PrevPage);
    }
    if !state.users.is_empty() {
        items.push(MenuItem::ToggleStatus);
        items.push(MenuItem::Unlock);
    }
    items.extend([
        MenuItem::Add,
        MenuItem::Filter,
        MenuItem::Refresh,
        MenuItem::Quit,
    ]);
    items
}

/// A row as a selectable option.
struct UserChoice(UserItem);

impl fmt::Display for UserChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} [{}]", self.0.id, self.0.email, self.0.status.label())?;
        if self.0.is_locked() {
            f.write_str(" locked")?;
        }
        Ok(())
    }
}

#[instrument(skip_all, name = "browse")]
pub async fn run_browse(config: &BusinessConfig, filter: Option<UserQuery>) -> Result<()> {
    let (controller, renderer) = build_controller(config, |dialogs| dialogs);
    let mut controller = controller.with_filter(filter);
    let out = Output::new();

    out.header(format!("techops users @ {}", config.api_base_url));
    refresh(&mut controller, &renderer).await;

    loop {
        let items = menu_items(controller.state());
        let Some(choice) = Select::new("Action:", items)
            .with_help_message("Use arrow keys to navigate, Enter to select, Esc to quit")
            .prompt_skippable()
            .context("Failed to read action")?
        else {
            break;
        };

        match choice {
            MenuItem::NextPage => {
                controller.next_page().await;
            }
            MenuItem::PrevPage => {
                controller.prev_page().await;
            }
            MenuItem::ToggleStatus => {
                if let Some(user) = pick_user(&controller, "Enable / disable which user?")? {
                    controller.launch(UserAction::toggle_status(&user)).await;
                }
            }
            MenuItem::Unlock => {
                if let Some(user) = pick_user(&controller, "Unlock which user?")? {
                    controller.launch(UserAction::unlock(&user)).await;
                }
            }
            MenuItem::Add => {
                controller.launch(UserAction::Add).await;
            }
            MenuItem::Filter => {
                let email = Text::new("Email contains:")
                    .with_help_message("Leave empty to clear the filter")
                    .prompt_skippable()
                    .context("Failed to read filter")?;
                if let Some(email) = email {
                    controller.set_filter(email_filter(&email)).await;
                }
            }
            MenuItem::Refresh => {
                controller.query_users().await;
            }
            MenuItem::Quit => break,
        }

        redraw(&renderer, &out);
    }

    Ok(())
}

fn redraw(renderer: &Renderer, out: &Output) {
    if !renderer.flush() {
        out.dim("Nothing changed.");
    }
}

fn pick_user(controller: &TerminalController, prompt: &str) -> Result<Option<UserItem>> {
    let choices: Vec<UserChoice> = controller
        .state()
        .users
        .iter()
        .cloned()
        .map(UserChoice)
        .collect();

    if choices.is_empty() {
        warn!("no rows to pick from");
        return Ok(None);
    }

    let picked = Select::new(prompt, choices)
        .prompt_skippable()
        .context("Failed to select user")?;
    Ok(picked.map(|choice| choice.0))
}

/// `None` clears the filter.
fn email_filter(input: &str) -> Option<UserQuery> {
    let email = input.trim();
    (!email.is_empty()).then(|| UserQuery {
        email: Some(email.to_owned()),
        ..UserQuery::default()
    })
}
