use std::sync::Arc;

use derive_more::Deref;
use lambda_runtime::LambdaEvent;
use serde_json::Value;
use strum_macros::AsRefStr;
use tracing::{debug, error, info};

use crate::{
    config::{ConfigResult, Settings, DEFAULT_ALLOWED_ORIGIN},
    log,
    mailing_list::{self, MailingListClient},
    response::InvocationResponse,
    subscriber::{DataParsingError, InvocationEvent, ValidSubscriber},
};

// ###################################
// ->  Structs
// ###################################
/// The provider client together with the list it writes to.
#[derive(Debug)]
pub struct ListProvider {
    pub client: MailingListClient,
    pub audience_id: String,
}

impl ListProvider {
    pub fn from_settings(settings: &Settings) -> crate::Result<Self> {
        let config = settings.mailing_list()?;
        let client = MailingListClient::from_config(&config)?;

        Ok(ListProvider {
            client,
            audience_id: config.audience_id,
        })
    }
}

#[derive(Debug)]
pub struct InternalState {
    /// `Err` when the instance is misconfigured.
    /// Every invocation then fails without a network call.
    pub provider: crate::Result<ListProvider>,
    pub allowed_origin: String,
}

/// Read-only state shared by all invocations on this instance.
/// It implements `Deref` to easily access the fields on `InternalState`
/// Uses an `Arc` so it can be cloned into the runtime's service.
#[derive(Debug, Clone, Deref)]
pub struct AppState(Arc<InternalState>);

impl AppState {
    pub fn new(provider: crate::Result<ListProvider>, allowed_origin: String) -> Self {
        AppState(Arc::new(InternalState {
            provider,
            allowed_origin,
        }))
    }

    /// Never fails: a bad configuration is kept and reported by every invocation.
    pub fn build(settings: ConfigResult<Settings>) -> Self {
        match settings {
            Ok(settings) => {
                let provider = ListProvider::from_settings(&settings);
                if let Err(er) = &provider {
                    error!("{:<12} - Mailing list is not configured: {er}", "BUILD_STATE");
                }
                Self::new(provider, settings.allowed_origin)
            }
            Err(er) => {
                error!("{:<12} - Failed to load the settings: {er}", "BUILD_STATE");
                Self::new(Err(er.into()), DEFAULT_ALLOWED_ORIGIN.to_string())
            }
        }
    }

    /// Runs one invocation: validate, upsert the member, map the outcome to a fresh response.
    #[tracing::instrument(name = "Handling subscription", skip(self, payload))]
    pub async fn handle(&self, request_id: &str, payload: Value) -> InvocationResponse {
        let outcome = self.subscribe(payload).await;

        let response = match &outcome {
            Ok(()) => InvocationResponse::success(&self.allowed_origin),
            Err(er) => {
                error!("{:<12} - {er}", "HANDLE");
                InvocationResponse::failure(&self.allowed_origin)
            }
        };

        log::log_invocation(request_id, response.status_code, outcome.as_ref().err());

        response
    }

    async fn subscribe(&self, payload: Value) -> Result<()> {
        let provider = self
            .provider
            .as_ref()
            .map_err(|er| Error::Config(er.to_string()))?;

        let subscriber: ValidSubscriber = InvocationEvent::from_payload(payload)?.try_into()?;
        debug!(
            "{:<12} - Received subscription for an address at: {}",
            "SUBSCRIBE",
            subscriber.email.domain()
        );

        let member = provider
            .client
            .upsert_member(&provider.audience_id, &subscriber.contact_record())
            .await?;

        info!(
            "{:<12} - Contact added successfully, member id: {}, status: {}",
            "SUBSCRIBE",
            member.id.as_deref().unwrap_or("unknown"),
            member.status.as_deref().unwrap_or("unknown")
        );
        Ok(())
    }
}

/// The function the Lambda runtime calls.
/// Always `Ok`, a failed subscription is a 500 response and not a runtime error.
pub async fn function_handler(
    state: &AppState,
    event: LambdaEvent<Value>,
) -> core::result::Result<InvocationResponse, lambda_runtime::Error> {
    let (payload, context) = event.into_parts();
    Ok(state.handle(&context.request_id, payload).await)
}

// ###################################
// ->   ERROR & RESULT
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, AsRefStr, thiserror::Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("malformed input: {0}")]
    MalformedInput(#[from] DataParsingError),
    #[error("provider error: {0}")]
    Provider(#[from] mailing_list::Error),
}
