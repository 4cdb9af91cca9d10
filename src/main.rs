use habit_miniapp::{
    api::HabitApi, router, AppState, Config, EmbeddedHost, HabitListClient, HostEnvironment,
    Session,
};
use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env()?;

    let mut host = config
        .init_data
        .as_deref()
        .map(EmbeddedHost::from_init_data)
        .transpose()?;
    let session = Session::resolve(host.as_mut().map(|h| h as &mut dyn HostEnvironment))?;

    let api = HabitApi::new(config.api_base(), config.request_timeout)?;
    info!(api = api.base_url(), user_id = session.user_id(), "habit client ready");

    let client = HabitListClient::new(session, api);
    if let Err(err) = client.load_habits().await {
        warn!("initial habit load failed: {err}");
    }

    let app = router(AppState::new(client));
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}
