// Process bootstrap for the sign-in command.

use crate::domain::entities::SignInMode;
use crate::frameworks::config;
use crate::interface_adapters::browser::PromptBrowserLogin;
use crate::interface_adapters::clients::ReqwestTransport;
use crate::interface_adapters::listener::ChannelListener;
use crate::interface_adapters::preferences::FilePreferences;
use crate::use_cases::SignInService;

use std::error::Error;

// Our own events at info, dependencies (reqwest, hyper) only when they warn.
const DEFAULT_LOG_FILTER: &str = "warn,social_signin=info";

fn init_runtime() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));

    // The login prompt owns stdout, so log lines go to stderr.
    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .without_time()
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        tracing::error!(%info, "sign-in command panicked");
    }));
}

pub async fn run(silent: bool) -> Result<(), Box<dyn Error>> {
    init_runtime();

    let graph = config::graph_api()?;
    let transport = ReqwestTransport::new(config::request_timeout())?;

    let preferences_path = config::preferences_path();
    let preferences = FilePreferences::open(&preferences_path).inspect_err(|e| {
        tracing::error!(path = %preferences_path.display(), error = %e, "failed to open preferences");
    })?;
    tracing::debug!(app_id = graph.app_id(), version = graph.version(), "graph api configured");

    let mut service = SignInService::new(transport, preferences, PromptBrowserLogin::stdin(), graph);
    if !config::gui_enabled() {
        service = service.without_gui();
    }

    let (listener, outcome) = ChannelListener::channel();
    service
        .sign_in_with_mode(SignInMode::from_silent(silent), listener)
        .await;

    match outcome.await? {
        Ok(()) => {
            tracing::info!("sign-in complete");
            Ok(())
        }
        Err(error) => Err(error.into()),
    }
}
