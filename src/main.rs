use std::sync::Arc;

use tower_http::cors::CorsLayer;

use lead_intake::config::IntakeConfig;
use lead_intake::sink::{EmailSink, EmailSinkConfig, LogSink, SubmissionSink};
use lead_intake::wizard::{WizardManager, WizardRouteState, wizard_routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Install rustls crypto provider before any TLS usage
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let port: u16 = std::env::var("LEAD_INTAKE_PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080);

    // SMTP delivery when configured, log-only otherwise
    let sink: Arc<dyn SubmissionSink> = match EmailSinkConfig::from_env()? {
        Some(config) => {
            tracing::info!(host = %config.smtp_host, to = %config.to_address, "using email sink");
            Arc::new(EmailSink::new(config))
        }
        None => {
            tracing::warn!("LEAD_SMTP_HOST not set; submissions will only be logged");
            Arc::new(LogSink)
        }
    };

    let config = Arc::new(IntakeConfig::default());
    let manager = WizardManager::new(sink);

    let app = wizard_routes(WizardRouteState {
        manager,
        config,
    })
    .layer(CorsLayer::permissive());

    eprintln!("Lead intake v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Wizard API: http://0.0.0.0:{port}/api/wizard");

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
