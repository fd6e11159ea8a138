//! Helpers to drive the users screen against a wiremock server.
//!
//! ```ignore
//! let mut test_ctx = TestContext::new().await;
//! test_ctx.mock_list_users(vec![sample_user("alice")]).await;
//!
//! test_ctx.ctx.enqueue_command::<RefreshRgwUsersCommand>();
//! test_ctx.flush_and_wait().await;
//!
//! assert_eq!(test_ctx.ctx.compute::<RgwUsersListCompute>().rows().len(), 1);
//! ```

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use rgw_states::{StateCtx, Time};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::{BucketUsage, BusinessConfig, RgwUser, UserQuota, register_rgw_users};

pub const TEST_TOKEN: &str = "test_token";

pub fn test_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

pub struct TestContext {
    pub mock_server: MockServer,
    pub ctx: StateCtx,
}

impl TestContext {
    /// Fresh mock server, a context wired to it and the clock frozen at [`test_epoch`].
    pub async fn new() -> Self {
        let mock_server = MockServer::start().await;
        let config = BusinessConfig::new(mock_server.uri()).with_auth_token(TEST_TOKEN);

        let mut ctx = StateCtx::new();
        ctx.add_state(Time::new(test_epoch()));
        register_rgw_users(&mut ctx, config);

        Self { mock_server, ctx }
    }

    pub fn set_now(&mut self, now: DateTime<Utc>) {
        self.ctx.update::<Time>(|t| *t.as_mut() = now);
    }

    pub fn advance(&mut self, by: Duration) {
        let now = self.ctx.state::<Time>().now()
            + chrono::TimeDelta::from_std(by).unwrap_or_default();
        self.set_now(now);
    }

    /// Applies published values and reruns dirty computes.
    pub fn settle(&mut self) {
        self.ctx.sync_computes();
        self.ctx.run_computed();
        self.ctx.sync_computes();
    }

    /// Flushes queued commands and waits for every spawned task, syncing as they finish.
    pub async fn flush_and_wait(&mut self) {
        self.ctx.sync_computes();
        self.ctx.flush_commands();

        let timeout = Duration::from_secs(5);
        let start = std::time::Instant::now();
        while self.ctx.task_count() > 0 {
            assert!(
                start.elapsed() < timeout,
                "Timed out waiting for pending tasks ({} still in JoinSet)",
                self.ctx.task_count()
            );
            if self.ctx.task_set_mut().join_next().await.is_some() {
                self.ctx.sync_computes();
            }
        }
        self.settle();
    }

    pub async fn mock_list_users(&self, users: Vec<RgwUser>) {
        self.mock_list_users_expect(users, None).await;
    }

    /// Same as [`Self::mock_list_users`], verifying the call count when the server drops.
    pub async fn mock_list_users_expect(&self, users: Vec<RgwUser>, calls: Option<u64>) {
        let mock = Mock::given(method("GET"))
            .and(path("/api/rgw/user"))
            .and(header("Authorization", format!("Bearer {TEST_TOKEN}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(users));
        let mock = match calls {
            Some(n) => mock.expect(n),
            None => mock,
        };
        mock.mount(&self.mock_server).await;
    }

    /// Answers only the first list request, after `delay`. Later requests fall through
    /// to mocks mounted afterwards.
    pub async fn mock_list_users_slow_once(&self, users: Vec<RgwUser>, delay: Duration) {
        Mock::given(method("GET"))
            .and(path("/api/rgw/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(users).set_delay(delay))
            .up_to_n_times(1)
            .expect(1)
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_list_users_error(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path("/api/rgw/user"))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_json(serde_json::json!({"detail": "gateway unavailable"})),
            )
            .mount(&self.mock_server)
            .await;
    }

    /// Expects exactly one DELETE for `encoded_uid`, answering with `status`.
    pub async fn mock_delete_user(&self, encoded_uid: &str, status: u16) {
        Mock::given(method("DELETE"))
            .and(path(format!("/api/rgw/user/{encoded_uid}")))
            .and(header("Authorization", format!("Bearer {TEST_TOKEN}").as_str()))
            .respond_with(ResponseTemplate::new(status))
            .expect(1)
            .mount(&self.mock_server)
            .await;
    }
}

pub fn sample_user(uid: &str) -> RgwUser {
    RgwUser {
        uid: uid.to_owned(),
        tenant: String::new(),
        display_name: format!("{uid} display"),
        email: format!("{uid}@example.com"),
        suspended: false,
        max_buckets: 1000,
        user_quota: UserQuota::default(),
        usage: Vec::new(),
    }
}

pub fn sample_user_with_quota(uid: &str, max_size: i64, sizes: &[u64]) -> RgwUser {
    RgwUser {
        user_quota: UserQuota {
            enabled: true,
            max_size,
            max_objects: -1,
        },
        usage: sizes
            .iter()
            .enumerate()
            .map(|(i, &size_actual)| BucketUsage {
                bucket: format!("{uid}-bucket-{i}"),
                size_actual,
                num_objects: 1,
            })
            .collect(),
        ..sample_user(uid)
    }
}
