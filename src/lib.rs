//! Forwards form submissions (`name`, `email`) to a mailing list provider and answers with a
//! fixed-shape HTTP-style response. Meant to run as an AWS Lambda function.

pub mod config;
mod error;
pub mod handler;
mod log;
pub mod mailing_list;
pub mod response;
pub mod subscriber;
mod telemetry;
mod utils;

use lambda_runtime::{service_fn, LambdaEvent};
use serde_json::Value;

// re-export
pub use error::{Error, Result};
pub use handler::{function_handler, AppState};
pub use mailing_list::MailingListClient;
pub use response::InvocationResponse;
pub use telemetry::{init_dbg_tracing, init_production_tracing};

/// RUN
/// Hands the handler to the Lambda runtime. Only returns if the runtime gives up.
pub async fn run(app_state: AppState) -> Result<()> {
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let app_state = app_state.clone();
        async move { function_handler(&app_state, event).await }
    }))
    .await
    .map_err(|er| Error::Lambda(er.to_string()))
}
