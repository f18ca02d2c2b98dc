//! shopfront server binary

use tower_http::trace::TraceLayer;

use shopfront::config::ShopfrontConfig;
use shopfront::handlers;
use shopfront::observability;
use shopfront::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    observability::init()?;

    let config = ShopfrontConfig::load()?;
    let bind = config.service.bind.clone();
    tracing::info!(
        service = %config.service.name,
        upstream = %config.api.base_url,
        %bind,
        "starting"
    );

    let app = handlers::router(AppState::new(config)).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
