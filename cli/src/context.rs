//! Wires the business controller to terminal dialogs and the renderer.

use techops_business::{BusinessConfig, HttpUserService, UsersController, UsersState};
use techops_states::channel;
use tracing::instrument;

use crate::dialogs::TerminalDialogs;
use crate::render::Renderer;

pub type TerminalController = UsersController<HttpUserService, TerminalDialogs<HttpUserService>>;

/// Build a controller over HTTP whose transitions feed a [`Renderer`].
///
/// `configure` adjusts the dialogs before they are handed over.
pub fn build_controller(
    config: &BusinessConfig,
    configure: impl FnOnce(TerminalDialogs<HttpUserService>) -> TerminalDialogs<HttpUserService>,
) -> (TerminalController, Renderer) {
    let service = HttpUserService::new(config.clone());
    let dialogs = configure(TerminalDialogs::new(service.clone()));
    let (updater, reader) = channel::<UsersState>();

    let controller = UsersController::new(service, dialogs, config).with_updater(updater);
    (controller, Renderer::new(reader))
}

/// Fetch the current page and draw it.
#[instrument(skip_all, name = "refresh")]
pub async fn refresh(controller: &mut TerminalController, renderer: &Renderer) {
    controller.query_users().await;
    renderer.flush();
}
