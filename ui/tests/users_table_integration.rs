//! The users table after the application's initial fetch.

mod common;

use common::{TestCtx, mock_list_users, mock_list_users_error, start_mock_server};
use kittest::Queryable;
use rgw_business::{RgwUsersListCompute, USER_COLUMNS};

#[tokio::test]
async fn test_initial_fetch_is_triggered_once() {
    let mock_server = start_mock_server().await;
    mock_list_users(&mock_server, Some(1)).await;

    let mut ctx = TestCtx::new_app(mock_server);
    ctx.settle().await;

    // The mock server verifies the single call when dropped.
}

#[tokio::test]
async fn test_users_are_displayed_with_derived_cells() {
    let mock_server = start_mock_server().await;
    mock_list_users(&mock_server, None).await;

    let mut ctx = TestCtx::new_app(mock_server);
    ctx.settle().await;
    let harness = ctx.harness_mut();

    for column in &USER_COLUMNS {
        assert!(
            harness.query_by_label(column.name).is_some(),
            "missing column header {}",
            column.name
        );
    }

    assert!(harness.query_by_label("alice").is_some());
    assert!(harness.query_by_label("Bob Builder").is_some());
    assert!(harness.query_by_label("Unlimited").is_some());
    assert!(harness.query_by_label("Disabled").is_some());
    // alice has no quota at all, bob only lacks an object quota.
    assert_eq!(harness.query_all_by_label("No Limit").count(), 3);
    assert!(harness.query_by_label("Loading...").is_none());

    let list = harness.state().state().ctx.compute::<RgwUsersListCompute>();
    let bob = list.row("bob").expect("bob is listed");
    assert_eq!(bob.usage.user_size, 512);
    assert_eq!(bob.usage.size_usage, Some(0.5));
}

#[tokio::test]
async fn test_failed_fetch_shows_error_banner() {
    let mock_server = start_mock_server().await;
    mock_list_users_error(&mock_server, 503).await;

    let mut ctx = TestCtx::new_app(mock_server);
    ctx.settle().await;
    let harness = ctx.harness_mut();

    assert!(harness.query_by_label_contains("Error:").is_some());
    assert!(harness.query_by_label("No users.").is_some());
}

#[tokio::test]
async fn test_refresh_button_fetches_again() {
    let mock_server = start_mock_server().await;
    mock_list_users(&mock_server, Some(2)).await;

    let mut ctx = TestCtx::new_app(mock_server);
    ctx.settle().await;

    ctx.harness_mut().get_by_label("Refresh").click();
    ctx.settle().await;

    assert!(ctx.harness_mut().query_by_label("alice").is_some());
}
