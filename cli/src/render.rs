//! Renders [`UsersState`] values published by the controller.

use tabled::settings::Style;
use tabled::{Table, Tabled};
use techops_business::{LoadStatus, Pagination, UserItem, UsersState};
use techops_states::StateReader;
use tracing::debug;

use crate::output::Output;

#[derive(Tabled)]
pub struct UserRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Email")]
    pub email: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Phone")]
    pub phone: String,
    #[tabled(rename = "Status")]
    pub status: &'static str,
    #[tabled(rename = "Locked")]
    pub locked: &'static str,
    #[tabled(rename = "Last login")]
    pub last_login: String,
}

impl From<&UserItem> for UserRow {
    fn from(user: &UserItem) -> Self {
        Self {
            id: user.id,
            email: truncate_str(&user.email, 32),
            name: user
                .name
                .as_deref()
                .map(|n| truncate_str(n, 24))
                .unwrap_or_default(),
            phone: user.phone.clone().unwrap_or_default(),
            status: user.status.label(),
            locked: if user.is_locked() { "yes" } else { "" },
            last_login: user
                .last_login_at
                .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        }
    }
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{truncated}...")
    } else {
        s.to_owned()
    }
}

/// Message shown in place of the table, if any.
pub fn status_message(status: LoadStatus) -> Option<&'static str> {
    match status {
        LoadStatus::None => None,
        LoadStatus::Loading => Some("Loading users..."),
        LoadStatus::Error => Some("Could not load users."),
        LoadStatus::Empty => Some("No users found."),
    }
}

/// `Page 2 of 5`; an empty result is page 1 of 1.
pub fn page_position(pagination: &Pagination) -> String {
    format!(
        "Page {} of {}",
        pagination.cur_page,
        pagination.total_pages().max(1)
    )
}

pub fn users_table(users: &[UserItem]) -> String {
    let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
    let mut table = Table::new(&rows);
    table.with(Style::rounded());
    table.to_string()
}

pub fn render_state(out: &Output, state: &UsersState) {
    match (state.status, status_message(state.status)) {
        (LoadStatus::Error, Some(message)) => out.error(message),
        (_, Some(message)) => out.dim(message),
        (_, None) if state.users.is_empty() => out.dim("No users on this page."),
        (_, None) => {
            out.newline();
            out.print(users_table(&state.users));
            out.page_footer(
                page_position(&state.pagination),
                state.pagination.total_count,
            );
        }
    }
}

/// Pulls published states and draws the newest settled one.
pub struct Renderer {
    reader: StateReader<UsersState>,
    out: Output,
}

impl Renderer {
    pub fn new(reader: StateReader<UsersState>) -> Self {
        Self {
            reader,
            out: Output::new(),
        }
    }

    /// Drain pending transitions and draw the last one that is not `Loading`.
    ///
    /// Returns `false` when nothing new was published.
    pub fn flush(&self) -> bool {
        let mut settled = None;
        while let Some(state) = self.reader.read() {
            debug!(status = %state.status, rows = state.users.len(), "state published");
            if !state.is_loading() {
                settled = Some(state);
            }
        }

        match settled {
            Some(state) => {
                render_state(&self.out, &state);
                true
            }
            None => false,
        }
    }
}
