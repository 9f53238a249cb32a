use std::sync::Arc;

use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use color_eyre::eyre::{Context, eyre};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::http_server::{
    http_routes::{catalog, gateway},
    state::{ContentState, GatewayState},
};

/// Read-only catalog API.
pub fn content_router(state: Arc<ContentState>) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    Router::new()
        .route("/generos", get(catalog::list_genres))
        .route("/generos/{id}", get(catalog::get_genre))
        .route("/generos/{id}/contenidos", get(catalog::list_genre_contents))
        .route("/contenidos", get(catalog::list_contents))
        .route("/contenidos/{id}", get(catalog::get_content))
        .route(
            "/contenidos/{id}/temporadas",
            get(catalog::list_content_seasons),
        )
        .route("/contenidos/{id}/reparto", get(catalog::list_content_cast))
        .route(
            "/temporadas/{id}/episodios",
            get(catalog::list_season_episodes),
        )
        .route("/actores", get(catalog::list_actors))
        .route("/directores", get(catalog::list_directors))
        .route("/directores/{id}", get(catalog::get_director))
        .route("/subtitulos", get(catalog::list_subtitles))
        .route("/doblajes", get(catalog::list_dubs))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer),
        )
        .with_state(state)
}

/// Browser-facing pages plus the subscription-plan proxy.
pub fn gateway_router(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route("/", get(gateway::index))
        .route("/login", post(gateway::login))
        .route("/registro_usuario", get(gateway::registration_form))
        .route("/planes_suscripcion", get(gateway::subscription_plans))
        .route("/registro", post(gateway::register))
        .route("/pantalla_principal", get(gateway::main_screen))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

async fn serve(name: &str, port: u16, app: Router) -> color_eyre::Result<()> {
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .wrap_err_with(|| eyre!("Failed to bind to port {}", port))?;
    log::info!("{} listening on port {}", name, port);
    axum::serve(listener, app)
        .await
        .wrap_err_with(|| format!("Failed to start {name}"))?;

    Ok(())
}

pub async fn start_content_service(port: u16, state: Arc<ContentState>) -> color_eyre::Result<()> {
    serve("Content service", port, content_router(state)).await
}

pub async fn start_gateway(port: u16, state: Arc<GatewayState>) -> color_eyre::Result<()> {
    serve("Gateway", port, gateway_router(state)).await
}
