use listomat::{config, AppState, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = config::load_settings();
    let log_filter = settings
        .as_ref()
        .map(|settings| settings.log.clone())
        .unwrap_or_else(|_| config::DEFAULT_LOG.to_string());

    // We have a different logging mechanism for production
    #[cfg(not(debug_assertions))]
    {
        listomat::init_production_tracing(&log_filter)
    }
    #[cfg(debug_assertions)]
    {
        listomat::init_dbg_tracing(&log_filter);
    }

    let app_state = AppState::build(settings);

    listomat::run(app_state).await
}
