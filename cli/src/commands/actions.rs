//! One-shot user actions: status toggle, unlock and add.
//!
//! Each command runs a single [`UserAction`] through the controller; on
//! success the refreshed first page is printed.

use anyhow::{Result, bail};
use techops_business::{BusinessConfig, LaunchOutcome, NewUser, UserAction};
use tracing::instrument;

use crate::context::{TerminalController, build_controller};
use crate::output::Output;
use crate::render::Renderer;

#[instrument(skip_all, name = "status", fields(id = id, disabled = disabled))]
pub async fn run_status(
    config: &BusinessConfig,
    id: i64,
    email: String,
    disabled: bool,
    yes: bool,
) -> Result<()> {
    let (mut controller, renderer) = build_controller(config, |dialogs| dialogs.assume_yes(yes));
    let verb = if disabled { "Enabled" } else { "Disabled" };
    let label = user_label(id, &email);

    let action = UserAction::Status {
        id,
        disabled,
        email,
    };
    finish(&mut controller, &renderer, action, &format!("{verb} {label}")).await
}

#[instrument(skip_all, name = "unlock", fields(id = id))]
pub async fn run_unlock(config: &BusinessConfig, id: i64, email: String, yes: bool) -> Result<()> {
    let (mut controller, renderer) = build_controller(config, |dialogs| dialogs.assume_yes(yes));
    let label = user_label(id, &email);

    let action = UserAction::Unlock { id, email };
    finish(&mut controller, &renderer, action, &format!("Unlocked {label}")).await
}

#[instrument(skip_all, name = "add")]
pub async fn run_add(config: &BusinessConfig, preset: NewUser) -> Result<()> {
    let (mut controller, renderer) =
        build_controller(config, |dialogs| dialogs.with_new_user(preset));

    match controller.launch(UserAction::Add).await {
        LaunchOutcome::Refreshed => {
            renderer.flush();
            Ok(())
        }
        LaunchOutcome::Cancelled => {
            Output::new().dim("No user added.");
            Ok(())
        }
        LaunchOutcome::Failed(err) => bail!("Failed to add user: {err}"),
    }
}

async fn finish(
    controller: &mut TerminalController,
    renderer: &Renderer,
    action: UserAction,
    done: &str,
) -> Result<()> {
    let out = Output::new();
    let tag = action.tag();

    match controller.launch(action).await {
        LaunchOutcome::Refreshed => {
            out.success(done);
            renderer.flush();
            Ok(())
        }
        LaunchOutcome::Cancelled => {
            out.dim("Cancelled.");
            Ok(())
        }
        LaunchOutcome::Failed(err) => bail!("`{tag}` failed: {err}"),
    }
}

fn user_label(id: i64, email: &str) -> String {
    if email.is_empty() {
        format!("user #{id}")
    } else {
        format!("{email} (#{id})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn preset() -> NewUser {
        NewUser {
            email: "a@b.com".to_owned(),
            name: Some("Ann".to_owned()),
            phone: Some("555-0100".to_owned()),
        }
    }

    async fn received(server: &MockServer, route: &str) -> usize {
        server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.url.path() == route)
            .count()
    }

    #[tokio::test]
    async fn add_fails_when_server_refuses_the_user() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/add"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let result = run_add(&BusinessConfig::new(server.uri()), preset()).await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to add user"), "got {err}");
        assert_eq!(received(&server, "/user/query").await, 0);
    }

    #[tokio::test]
    async fn add_refreshes_the_list_once_created() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/add"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"id": 7, "email": "a@b.com"}
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/user/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "data": [{"id": 7, "email": "a@b.com"}],
                    "currentPage": 0,
                    "totalCount": 1,
                    "pageSize": 10
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        run_add(&BusinessConfig::new(server.uri()), preset()).await.unwrap();
    }

    #[test]
    fn label_falls_back_to_id() {
        assert_eq!(user_label(3, ""), "user #3");
        assert_eq!(user_label(3, "a@b.com"), "a@b.com (#3)");
    }
}
