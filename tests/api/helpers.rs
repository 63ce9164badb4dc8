//! Shared setup: a mock provider and an `AppState` pointed at it.
use std::sync::OnceLock;

use anyhow::Result;
use lambda_runtime::{Context, LambdaEvent};
use listomat::{config::Settings, AppState, InvocationResponse};
use secrecy::SecretString;
use serde_json::Value;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "0123456789abcdef-us21";
pub const TEST_AUDIENCE_ID: &str = "a1b2c3d4e5";
pub const TEST_ORIGIN: &str = "https://example.com";

pub struct TestApp {
    pub app_state: AppState,
    pub provider_server: MockServer,
}

fn init_test_subscriber() {
    static SUBSCRIBER: OnceLock<()> = OnceLock::new();
    SUBSCRIBER.get_or_init(|| {
        if std::env::var("TEST_LOG").is_ok() {
            listomat::init_dbg_tracing("debug");
        }
    });
}

/// Settings that point the client at the mock server.
pub fn test_settings(provider_uri: String) -> Settings {
    Settings {
        api_key: Some(SecretString::from(TEST_API_KEY.to_string())),
        audience_id: Some(TEST_AUDIENCE_ID.to_string()),
        base_url: Some(provider_uri),
        timeout_millis: 200,
        allowed_origin: TEST_ORIGIN.to_string(),
        ..Default::default()
    }
}

impl TestApp {
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(|settings| settings).await
    }

    /// Lets a test tweak the settings before the state gets built.
    pub async fn spawn_with<F>(configure: F) -> Result<Self>
    where
        F: FnOnce(Settings) -> Settings,
    {
        init_test_subscriber();

        let provider_server = MockServer::start().await;
        let settings = configure(test_settings(provider_server.uri()));
        let app_state = AppState::build(Ok(settings));

        Ok(TestApp {
            app_state,
            provider_server,
        })
    }

    pub async fn invoke(&self, payload: Value) -> InvocationResponse {
        self.app_state.handle("test-request", payload).await
    }

    /// Goes through the same entry point the Lambda runtime uses.
    pub async fn invoke_lambda(&self, payload: Value) -> Result<InvocationResponse> {
        let event = LambdaEvent::new(payload, Context::default());
        let res = listomat::function_handler(&self.app_state, event)
            .await
            .map_err(|er| anyhow::anyhow!(er))?;
        Ok(res)
    }

    pub fn member_path(email: &str) -> String {
        format!(
            "/3.0/lists/{TEST_AUDIENCE_ID}/members/{}",
            listomat::mailing_list::subscriber_hash(email)
        )
    }
}

/// Parses the `body` string of a response into JSON.
pub fn body_json(res: &InvocationResponse) -> Result<Value> {
    Ok(serde_json::from_str(&res.body)?)
}
