//! List users command.

use anyhow::{Result, bail};
use techops_business::{BusinessConfig, LoadStatus, UserQuery};
use tracing::instrument;

use crate::context::build_controller;

/// Print one page of users. Fails when the list could not be loaded.
#[instrument(skip_all, name = "list", fields(page = page, filtered = filter.is_some()))]
pub async fn run_list(config: &BusinessConfig, page: u32, filter: Option<UserQuery>) -> Result<()> {
    let (controller, renderer) = build_controller(config, |dialogs| dialogs);
    let mut controller = controller.with_filter(filter);

    controller.go_to_page(page.max(1)).await;
    renderer.flush();

    if controller.state().status == LoadStatus::Error {
        bail!("Failed to load users from {}", config.api_base_url);
    }
    Ok(())
}
