use std::sync::Arc;
use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use incubator::{
    api,
    config::{Settings, DEFAULT_ADMIN_PASSWORD},
    service::ServiceContext,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "incubator=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let settings = Settings::new().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config: {}. Using defaults.", e);
        Settings::default()
    });

    if settings.admin.password == DEFAULT_ADMIN_PASSWORD {
        tracing::warn!("Dashboard admin password is the built-in default; set INCUBATOR__ADMIN__PASSWORD");
    }

    tracing::info!("Starting Incubator server on {}:{}", settings.server.host, settings.server.port);

    // Initialize database
    let db_pool = SqlitePoolOptions::new()
        .max_connections(settings.database.max_connections)
        .connect(&settings.database.url)
        .await?;

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await?;

    tokio::fs::create_dir_all(&settings.uploads.dir).await?;

    let service_context = Arc::new(ServiceContext::new(db_pool));
    let app = api::create_app(service_context, Arc::new(settings.clone()));

    let listener = tokio::net::TcpListener::bind(
        format!("{}:{}", settings.server.host, settings.server.port)
    ).await?;

    tracing::info!("Server listening on {}", settings.server.base_url);

    axum::serve(listener, app).await?;

    Ok(())
}
