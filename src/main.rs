use capability_demo_mcp::{
    build_app,
    config::Config,
    domain, logging,
    store::{ConfigSnapshot, UserDirectory},
    AppState,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let config = Config::from_env()?;
    let registry = domain::build_registry()?;
    let bind_socket = config.bind_socket()?;
    let state = AppState::new(
        registry,
        ConfigSnapshot::default(),
        UserDirectory::with_demo_users(),
    );
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(bind_socket).await?;

    info!(
        bind_addr = %config.bind_addr,
        bind_port = config.bind_port,
        "server starting"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
