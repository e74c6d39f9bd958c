use anyhow::Context;
use axum::{middleware, routing::get, Json, Router};
use clap::Parser;
use serde::Serialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use nexus::PersonaRegistry;

mod adapters;
mod application;
mod auth;
mod config;
mod models;
mod routes;
mod services;
#[cfg(test)]
mod testing;

use adapters::{BroadcastUi, MemoryPostRepository, OpenAiProvider};
use application::{ContentGenerator, RemoteWriter, SharedRng};
use config::ServerConfig;
use services::ContentScheduler;

/// Scheduler with the concrete adapters the server runs on
pub type AppScheduler = ContentScheduler<MemoryPostRepository, BroadcastUi, OpenAiProvider>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<MemoryPostRepository>,
    pub ui: Arc<BroadcastUi>,
    pub scheduler: Arc<AppScheduler>,
    pub admin_key: Option<Arc<str>>,
}

#[derive(Parser, Debug)]
#[command(name = "nexus-server", version, about = "Procedural forum content engine")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Nexus API is running - the personas are talking".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Full router: public reads, protected engine control, stream and docs
pub fn build_router(state: AppState) -> Router {
    // Protected routes (require authentication)
    let protected_routes = routes::engine::control_router().layer(
        middleware::from_fn_with_state(state.clone(), auth::auth_middleware),
    );

    // OpenAPI documentation
    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(routes::posts::router())
        .merge(routes::engine::router())
        .merge(routes::stream::router())
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("nexus_server=info,nexus=info")),
        )
        .init();

    let args = Args::parse();
    tracing::info!("🌐 Nexus API initializing...");

    let config = ServerConfig::load(args.config.as_deref())?;

    let rng = Arc::new(SharedRng::new(config.scheduler.rng_seed));
    let repo = Arc::new(
        MemoryPostRepository::open(&config.store).context("Failed to open post store")?,
    );
    let ui = Arc::new(BroadcastUi::default());

    // Remote writer if configured
    let remote = match config.remote.api_key_if_enabled() {
        Some(api_key) => {
            let provider = OpenAiProvider::new(api_key, &config.remote)
                .context("Failed to build remote provider")?;
            tracing::info!(model = %config.remote.model, "🤖 Remote writer initialized");
            Some(RemoteWriter::new(Arc::new(provider), config.remote.budgets()))
        }
        None => {
            tracing::warn!("⚠️  No OPENAI_API_KEY set (or remote disabled) - templates only");
            None
        }
    };

    let generator = ContentGenerator::new(PersonaRegistry::standard(), remote, rng.clone())
        .context("Template corpus failed validation")?;
    let scheduler = Arc::new(
        ContentScheduler::new(
            repo.clone(),
            ui.clone(),
            generator,
            rng,
            config.scheduler.clone(),
        )
        .context("Invalid scheduler configuration")?,
    );

    let admin_key: Option<Arc<str>> = config.server.admin_key.as_deref().map(Arc::from);
    if admin_key.is_some() {
        tracing::info!("🔐 Admin key authentication enabled");
    } else {
        tracing::warn!("⚠️  No NEXUS_ADMIN_KEY set - engine control is open");
    }

    let state = AppState {
        repo,
        ui,
        scheduler: scheduler.clone(),
        admin_key,
    };

    if config.scheduler.autostart {
        scheduler
            .start()
            .await
            .context("Failed to start content scheduler")?;
    } else {
        tracing::info!("📅 Scheduler autostart disabled - POST /nexus/engine/start to begin");
    }

    let router = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Nexus API ready on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(scheduler))
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal(scheduler: Arc<AppScheduler>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("🛑 Shutting down");
    scheduler.stop();
}
