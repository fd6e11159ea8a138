//! CLI workflow tests against a mock dashboard.
//!
//! These don't spawn the binary. They drive the same `StateCtx` wiring the
//! `users list` and `users delete` commands use.

use std::time::Duration;

use rgw_business::{
    BusinessConfig, DeleteRgwUsersCommand, RefreshRgwUsersCommand, RgwUsersDeleteCompute,
    RgwUsersDeleteInput, RgwUsersDeleteState, RgwUsersListCompute, RgwUsersListStatus,
    register_rgw_users,
};
use rgw_states::StateCtx;
use ustr::Ustr;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

struct CliTestContext {
    mock_server: MockServer,
    ctx: StateCtx,
}

impl CliTestContext {
    async fn new() -> Self {
        let mock_server = MockServer::start().await;
        let config = BusinessConfig::new(mock_server.uri()).with_auth_token("cli-token");

        let mut ctx = StateCtx::new();
        register_rgw_users(&mut ctx, config);

        Self { mock_server, ctx }
    }

    async fn flush_and_wait(&mut self) {
        self.ctx.sync_computes();
        self.ctx.flush_commands();

        let timeout = Duration::from_secs(5);
        let start = std::time::Instant::now();
        while self.ctx.task_count() > 0 {
            assert!(
                start.elapsed() <= timeout,
                "Timed out waiting for pending tasks ({} still in JoinSet)",
                self.ctx.task_count()
            );
            if self.ctx.task_set_mut().join_next().await.is_some() {
                self.ctx.sync_computes();
            }
        }
        self.ctx.sync_computes();
    }

    async fn mock_list(&self, expected_calls: u64) {
        Mock::given(method("GET"))
            .and(path("/api/rgw/user"))
            .and(header("authorization", "Bearer cli-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "uid": "alice", "display_name": "Alice", "max_buckets": 1000 },
                { "uid": "bob", "display_name": "Bob", "max_buckets": 1000 }
            ])))
            .expect(expected_calls)
            .mount(&self.mock_server)
            .await;
    }
}

#[tokio::test]
async fn test_list_loads_users_with_token() {
    let mut test_ctx = CliTestContext::new().await;
    test_ctx.mock_list(1).await;

    test_ctx.ctx.enqueue_command::<RefreshRgwUsersCommand>();
    test_ctx.flush_and_wait().await;

    let list = test_ctx.ctx.compute::<RgwUsersListCompute>();
    assert_eq!(list.status, RgwUsersListStatus::Loaded);
    assert_eq!(list.rows().len(), 2);
    test_ctx.ctx.shutdown().await;
}

#[tokio::test]
async fn test_list_reports_http_error() {
    let mut test_ctx = CliTestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/api/rgw/user"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&test_ctx.mock_server)
        .await;

    test_ctx.ctx.enqueue_command::<RefreshRgwUsersCommand>();
    test_ctx.flush_and_wait().await;

    let list = test_ctx.ctx.compute::<RgwUsersListCompute>();
    assert!(
        matches!(&list.status, RgwUsersListStatus::Error(message) if message.contains("401")),
        "unexpected status: {:?}",
        list.status
    );
    test_ctx.ctx.shutdown().await;
}

#[tokio::test]
async fn test_delete_fans_out_then_lists_once() {
    let mut test_ctx = CliTestContext::new().await;
    for uid in ["alice", "bob"] {
        Mock::given(method("DELETE"))
            .and(path(format!("/api/rgw/user/{uid}")))
            .and(header("authorization", "Bearer cli-token"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&test_ctx.mock_server)
            .await;
    }
    test_ctx.mock_list(1).await;

    test_ctx.ctx.update::<RgwUsersDeleteInput>(|input| {
        input.uids = vec![Ustr::from("alice"), Ustr::from("bob")];
    });
    test_ctx.ctx.enqueue_command::<DeleteRgwUsersCommand>();
    test_ctx.flush_and_wait().await;

    assert_eq!(
        test_ctx.ctx.compute::<RgwUsersDeleteCompute>().state,
        RgwUsersDeleteState::Done {
            deleted: vec![Ustr::from("alice"), Ustr::from("bob")],
        }
    );
    test_ctx.ctx.shutdown().await;
}
