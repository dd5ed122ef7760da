use actix_web::{web, HttpServer};
use log::info;

use ag_api::{app, bootstrap, config};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load()?;
    config::init_logging(config.environment);

    info!(
        "Starting Authgate API Server ({:?}, token lifetime {}h)",
        config.environment, config.auth.jwt.expiration_hours
    );
    if config.auth.jwt.is_using_default_key() {
        log::warn!("Using the built-in development signer key; set JWT_SIGNER_KEY");
    }

    let bootstrapped = bootstrap::build(&config).await?;
    let app_state = web::Data::new(bootstrapped.state);

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || app::create_app(app_state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }
    server.bind(&bind_address)?.run().await?;

    if let Some(handle) = bootstrapped.cleanup_task {
        handle.abort();
    }
    info!("Server stopped");
    Ok(())
}
