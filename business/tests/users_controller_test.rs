//! Controller behaviour against in-memory service and dialog fakes.

mod common;

use common::{Call, FakeUserService, ScriptedDialogs, page, sample_users};
use serde_json::json;
use techops_business::{
    ActionError, ApiError, ApiInfo, ApiResponse, BusinessConfig, DialogOutcome, LaunchOutcome,
    LoadStatus, PageResult, StatusChange, UnlockRequest, UserAction, UserQuery, UserStatus,
    UsersController, UsersState,
};
use techops_states::channel;

fn config() -> BusinessConfig {
    BusinessConfig::new("http://unused").with_page_size(10)
}

fn controller(
    service: FakeUserService,
    dialogs: ScriptedDialogs,
) -> UsersController<FakeUserService, ScriptedDialogs> {
    UsersController::new(service, dialogs, &config())
}

#[tokio::test]
async fn initial_load_fills_list_and_pagination() {
    let service = FakeUserService::new();
    service.push_page(page(sample_users(1..=10), 0, 42, 10));

    let controller = UsersController::start(service, ScriptedDialogs::default(), &config()).await;

    let state = controller.state();
    assert_eq!(state.users, sample_users(1..=10));
    assert_eq!(state.pagination.cur_page, 1);
    assert_eq!(state.pagination.total_count, 42);
    assert_eq!(state.pagination.page_size, 10);
    assert_eq!(state.status, LoadStatus::None);

    let calls = controller.service().calls();
    let Call::GetUsers(params) = &calls[0] else {
        panic!("expected a list query, got {calls:?}");
    };
    assert_eq!(params.page_number, 0);
    assert_eq!(params.page_size, 10);
    assert_eq!(params.query, UserQuery::default());
}

#[tokio::test]
async fn info_flag_sets_error_and_keeps_list_empty() {
    let service = FakeUserService::new();
    service.push_page(Ok(ApiResponse {
        data: Some(PageResult {
            data: sample_users(1..=3),
            current_page: 0,
            total_count: 3,
            page_size: 10,
        }),
        info: Some(vec![ApiInfo {
            name: Some("PERMISSION".to_owned()),
            msg: None,
        }]),
    }));

    let controller = UsersController::start(service, ScriptedDialogs::default(), &config()).await;

    assert!(controller.state().users.is_empty());
    assert_eq!(controller.state().status, LoadStatus::Error);
}

#[tokio::test]
async fn missing_payload_sets_empty() {
    let service = FakeUserService::new();
    service.push_page(Ok(ApiResponse::empty()));

    let controller = UsersController::start(service, ScriptedDialogs::default(), &config()).await;

    assert_eq!(controller.state().status, LoadStatus::Empty);
}

#[tokio::test]
async fn transport_failure_clears_list() {
    let service = FakeUserService::new();
    service
        .push_page(page(sample_users(1..=2), 0, 2, 10))
        .push_page(Err(ApiError::transport("connection reset")));

    let mut controller =
        UsersController::start(service, ScriptedDialogs::default(), &config()).await;
    assert_eq!(controller.state().users.len(), 2);

    controller.query_users().await;

    assert!(controller.state().users.is_empty());
    assert_eq!(controller.state().status, LoadStatus::Error);
}

#[tokio::test]
async fn confirmed_status_toggle_calls_service_then_refreshes() {
    let service = FakeUserService::new();
    service.push_page(page(sample_users(1..=3), 0, 3, 10));
    let dialogs = ScriptedDialogs::answering([DialogOutcome::Accepted]);
    let mut controller = controller(service, dialogs);

    let outcome = controller
        .launch_tag("status", &json!({"id": 5, "status": true, "email": "a@b.com"}))
        .await
        .unwrap();

    assert_eq!(outcome, LaunchOutcome::Refreshed);
    let calls = controller.service().calls();
    assert_eq!(
        calls[0],
        Call::EnableDisable(StatusChange {
            id: 5,
            status: UserStatus::Enabled
        })
    );
    assert!(matches!(calls[1], Call::GetUsers(_)));
    assert_eq!(calls.len(), 2);

    let confirms = controller.dialogs().confirms();
    assert_eq!(confirms.len(), 1);
    assert_eq!(confirms[0].header, "User - enable");
    assert!(confirms[0].message.contains("a@b.com"));

    assert_eq!(controller.state().users, sample_users(1..=3));
}

#[test]
fn status_wire_body_matches_service_contract() {
    let change = UserAction::from_tag("status", &json!({"id": 5, "status": true, "email": "a@b.com"}))
        .unwrap()
        .status_change()
        .unwrap();

    assert_eq!(serde_json::to_value(change).unwrap(), json!({"id": 5, "status": 0}));
}

#[tokio::test]
async fn cancelled_unlock_makes_no_calls() {
    let dialogs = ScriptedDialogs::answering([DialogOutcome::Cancelled]);
    let mut controller = controller(FakeUserService::new(), dialogs);

    let outcome = controller
        .launch(UserAction::Unlock {
            id: 7,
            email: "locked@example.com".to_owned(),
        })
        .await;

    assert_eq!(outcome, LaunchOutcome::Cancelled);
    assert!(controller.service().calls().is_empty());
    assert_eq!(controller.dialogs().confirms().len(), 1);
}

#[tokio::test]
async fn confirmed_unlock_refreshes() {
    let dialogs = ScriptedDialogs::answering([DialogOutcome::Accepted]);
    let mut controller = controller(FakeUserService::new(), dialogs);

    let outcome = controller
        .launch_tag("unlock", &json!({"id": 7, "email": "locked@example.com"}))
        .await
        .unwrap();

    assert_eq!(outcome, LaunchOutcome::Refreshed);
    assert_eq!(
        controller.service().calls()[0],
        Call::Unlock(UnlockRequest { id: 7 })
    );
    assert_eq!(controller.service().query_count(), 1);
}

#[tokio::test]
async fn failed_mutation_is_not_followed_by_refresh() {
    let service = FakeUserService::new();
    service.push_page(page(sample_users(1..=4), 0, 4, 10));
    service.fail_mutations(ApiError::Status { status: 500 });
    let dialogs = ScriptedDialogs::answering([DialogOutcome::Accepted]);

    let mut controller = UsersController::start(service, dialogs, &config()).await;
    let before = controller.state().clone();

    let outcome = controller
        .launch(UserAction::Unlock {
            id: 2,
            email: "u2@example.com".to_owned(),
        })
        .await;

    assert_eq!(outcome, LaunchOutcome::Failed(ApiError::Status { status: 500 }));
    assert_eq!(controller.service().query_count(), 1);
    assert_eq!(controller.state(), &before);
}

#[tokio::test]
async fn accepted_add_dialog_refreshes_and_dismissed_does_not() {
    let dialogs = ScriptedDialogs::answering([DialogOutcome::Accepted, DialogOutcome::Cancelled]);
    let mut controller = controller(FakeUserService::new(), dialogs);

    assert_eq!(controller.launch(UserAction::Add).await, LaunchOutcome::Refreshed);
    assert_eq!(controller.service().query_count(), 1);

    assert_eq!(controller.launch(UserAction::Add).await, LaunchOutcome::Cancelled);
    assert_eq!(controller.service().query_count(), 1);

    assert_eq!(controller.dialogs().add_user_opened(), 2);
    assert!(controller.dialogs().confirms().is_empty());
    assert!(
        !controller
            .service()
            .calls()
            .iter()
            .any(|call| matches!(call, Call::AddUser(_))),
        "the add form submits on its own"
    );
}

#[tokio::test]
async fn failed_add_submission_is_reported_without_refresh() {
    let dialogs = ScriptedDialogs::default().fail_add_user(ApiError::Status { status: 500 });
    let mut controller = controller(FakeUserService::new(), dialogs);
    let before = controller.state().clone();

    let outcome = controller.launch(UserAction::Add).await;

    assert_eq!(outcome, LaunchOutcome::Failed(ApiError::Status { status: 500 }));
    assert_eq!(controller.service().query_count(), 0);
    assert_eq!(controller.state(), &before);
}

#[tokio::test]
async fn unknown_tag_is_rejected_before_any_dialog() {
    let mut controller = controller(FakeUserService::new(), ScriptedDialogs::default());

    let err = controller.launch_tag("purge", &json!({})).await.unwrap_err();

    assert_eq!(err, ActionError::UnknownAction("purge".to_owned()));
    assert!(controller.dialogs().confirms().is_empty());
}

#[tokio::test]
async fn paging_requests_zero_based_page_and_stops_at_edges() {
    let service = FakeUserService::new();
    service
        .push_page(page(sample_users(1..=10), 0, 25, 10))
        .push_page(page(sample_users(11..=20), 1, 25, 10))
        .push_page(page(sample_users(21..=25), 2, 25, 10));

    let mut controller =
        UsersController::start(service, ScriptedDialogs::default(), &config()).await;

    assert!(!controller.prev_page().await);
    assert!(controller.next_page().await);
    assert!(controller.next_page().await);
    assert_eq!(controller.state().pagination.cur_page, 3);
    assert_eq!(controller.state().users, sample_users(21..=25));
    assert!(!controller.next_page().await);

    let pages: Vec<u32> = controller
        .service()
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            Call::GetUsers(params) => Some(params.page_number),
            _ => None,
        })
        .collect();
    assert_eq!(pages, vec![0, 1, 2]);
}

#[tokio::test]
async fn filter_is_sent_and_resets_to_first_page() {
    let service = FakeUserService::new();
    service
        .push_page(page(sample_users(1..=10), 0, 30, 10))
        .push_page(page(sample_users(11..=20), 1, 30, 10))
        .push_page(page(sample_users(1..=1), 0, 1, 10));

    let mut controller =
        UsersController::start(service, ScriptedDialogs::default(), &config()).await;
    controller.next_page().await;

    let filter = UserQuery {
        email: Some("u1@".to_owned()),
        ..UserQuery::default()
    };
    controller.set_filter(Some(filter.clone())).await;

    let calls = controller.service().calls();
    let Some(Call::GetUsers(last)) = calls.last() else {
        panic!("expected a list query last, got {calls:?}");
    };
    assert_eq!(last.query, filter);
    assert_eq!(last.page_number, 0);
    assert_eq!(controller.filter(), Some(&filter));

    controller.set_filter(Some(UserQuery::default())).await;
    assert_eq!(controller.filter(), None);
}

#[tokio::test]
async fn every_transition_is_published() {
    let service = FakeUserService::new();
    service.push_page(page(sample_users(1..=2), 0, 2, 10));
    let (updater, reader) = channel::<UsersState>();

    let mut controller = controller(service, ScriptedDialogs::default()).with_updater(updater);
    controller.query_users().await;

    let loading = reader.read().unwrap();
    assert_eq!(loading.status, LoadStatus::Loading);
    assert!(loading.users.is_empty());

    let loaded = reader.read().unwrap();
    assert_eq!(loaded.status, LoadStatus::None);
    assert_eq!(loaded.users.len(), 2);
    assert!(reader.read().is_none());
}

#[tokio::test]
async fn dropped_reader_does_not_break_the_controller() {
    let (updater, reader) = channel::<UsersState>();
    drop(reader);

    let mut controller =
        controller(FakeUserService::new(), ScriptedDialogs::default()).with_updater(updater);
    controller.query_users().await;
    controller.query_users().await;

    assert_eq!(controller.state().status, LoadStatus::Empty);
}
