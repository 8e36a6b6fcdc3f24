use anyhow::Context;
use tracing::info;

use otpgate::config::OtpgateConfig;
use otpgate::router::build_router;
use otpgate::state::AppState;
use otpgate_core::config::Config;
use otpgate_core::tracing::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = OtpgateConfig::from_env().context("failed to load config from environment")?;
    let state = AppState::from_config(&config).context("failed to create store")?;
    info!(
        backend = state.store.inner().name(),
        step_secs = config.totp_step_secs,
        skew_back = config.totp_skew_back,
        skew_forward = config.totp_skew_forward,
        "store configured"
    );

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.otpgate_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("otpgate listening on {addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
