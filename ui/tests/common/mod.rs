use chrono::{DateTime, TimeZone, Utc};
use egui_kittest::Harness;
use rgw_states::Time;
use rgw_ui::RgwConsoleApp;
use rgw_ui::state::State;
use rgw_ui::widgets::rgw_users_panel;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// State driven by a bare panel harness, with a clock the test controls.
pub struct PanelState {
    pub state: State,
    pub now: DateTime<Utc>,
}

pub struct TestCtx<'a, T> {
    mock_server: MockServer,
    harness: Harness<'a, T>,
}

impl<'a, T> TestCtx<'a, T> {
    pub fn harness_mut(&mut self) -> &mut Harness<'a, T> {
        &mut self.harness
    }

    #[allow(unused)]
    pub fn harness(&self) -> &Harness<'a, T> {
        &self.harness
    }

    #[allow(unused)]
    pub fn mock_server(&self) -> &MockServer {
        &self.mock_server
    }

    /// Lets spawned commands finish, then runs enough frames to show their results.
    #[allow(unused)]
    pub async fn settle(&mut self) {
        self.harness.step();
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        for _ in 0..5 {
            self.harness.step();
        }
    }
}

impl<'a> TestCtx<'a, RgwConsoleApp> {
    /// Full application against `mock_server`; the first frame dispatches the initial fetch.
    #[allow(unused)]
    pub fn new_app(mock_server: MockServer) -> Self {
        let state = State::test(mock_server.uri());
        let app = RgwConsoleApp::new(state);
        let harness = Harness::new_eframe(|_| app);

        Self {
            mock_server,
            harness,
        }
    }
}

impl TestCtx<'static, PanelState> {
    /// Only the users panel, without the initial fetch.
    #[allow(unused)]
    pub fn new_panel(mock_server: MockServer) -> Self {
        let mut state = PanelState {
            state: State::test(mock_server.uri()),
            now: test_epoch(),
        };
        state.state.ctx.update::<Time>(|t| *t.as_mut() = test_epoch());
        let harness = Harness::new_ui_state(
            |ui, panel: &mut PanelState| {
                panel.state.begin_frame(panel.now);
                rgw_users_panel(&mut panel.state.ctx, ui);
                panel.state.end_frame();
            },
            state,
        );

        Self {
            mock_server,
            harness,
        }
    }
}

pub fn test_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

pub async fn start_mock_server() -> MockServer {
    let _ = env_logger::builder().is_test(true).try_init();
    MockServer::start().await
}

/// Two users: `alice` without quota and unlimited buckets, `bob` at half of a 1 KiB quota.
#[allow(unused)]
pub fn users_json() -> serde_json::Value {
    serde_json::json!([
        {
            "uid": "alice",
            "display_name": "Alice Liddell",
            "email": "alice@example.com",
            "suspended": false,
            "max_buckets": 0,
            "user_quota": { "enabled": false, "max_size": -1, "max_objects": -1 },
            "usage": []
        },
        {
            "uid": "bob",
            "display_name": "Bob Builder",
            "email": "bob@example.com",
            "suspended": true,
            "max_buckets": -1,
            "user_quota": { "enabled": true, "max_size": 1024, "max_objects": -1 },
            "usage": [
                { "bucket": "bob-photos", "size_actual": 512, "num_objects": 3 }
            ]
        }
    ])
}

#[allow(unused)]
pub async fn mock_list_users(mock_server: &MockServer, expected_calls: Option<u64>) {
    let mock = Mock::given(method("GET"))
        .and(path("/api/rgw/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users_json()));
    match expected_calls {
        Some(n) => mock.expect(n).mount(mock_server).await,
        None => mock.mount(mock_server).await,
    }
}

#[allow(unused)]
pub async fn mock_list_users_error(mock_server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path("/api/rgw/user"))
        .respond_with(ResponseTemplate::new(status).set_body_string("gateway unavailable"))
        .mount(mock_server)
        .await;
}
