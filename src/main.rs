use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use transfer_pricing::config::environment::EnvironmentConfig;
use transfer_pricing::database::DatabaseConnection;
use transfer_pricing::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use transfer_pricing::repositories::{PostgresPricingRepository, PricingStore};
use transfer_pricing::routes::quote_routes::create_transfer_router;
use transfer_pricing::services::seed_service::ensure_default_pricing_config;
use transfer_pricing::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("🚐 Transfer Pricing Engine - Cotizador de traslados");
    info!("===================================================");

    let config = EnvironmentConfig::from_env();

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let store: Arc<dyn PricingStore> =
        Arc::new(PostgresPricingRepository::new(db_connection.pool().clone()));

    // Instalar el catálogo base (upserts idempotentes)
    if let Err(e) = ensure_default_pricing_config(store.as_ref(), &config.country_code).await {
        error!("❌ Error instalando el catálogo base: {}", e);
        return Err(anyhow::anyhow!("Error instalando el catálogo base: {}", e));
    }
    info!("✅ Catálogo base de traslados listo");

    let cors = if config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };

    let app_state = AppState::new(store, config.clone());

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/transfers", create_transfer_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
        .with_state(app_state);

    let addr: SocketAddr = config.server_addr().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🚕 Endpoints de cotización:");
    info!("   POST /api/transfers/quote - Cotizar traslado por corredor");
    info!("   POST /api/transfers/premium-quote - Cotizar traslado premium");
    info!("   GET  /api/transfers/locations - Typeahead de ubicaciones");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!("Error del servidor: {}", e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Endpoint de health check
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "transfer-pricing",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
