pub mod handlers;
pub mod response;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    Router,
    routing::{get, post, put},
};
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::ServeDir,
    trace::TraceLayer,
};
use std::sync::Arc;

use crate::{
    config::Settings,
    service::ServiceContext,
    uploads::PUBLIC_PREFIX,
};
use state::AppState;

pub fn create_app(service_context: Arc<ServiceContext>, settings: Arc<Settings>) -> Router {
    let uploads_dir = settings.uploads.dir.clone();
    // Oversize files must reach the handler to get a readable 400
    let upload_body_limit = settings.uploads.max_file_size.saturating_mul(2);
    let app_state = AppState::new(service_context, settings);

    Router::new()
        // Root and health endpoints
        .route("/health", get(handlers::root::health_check))
        .route("/api", get(handlers::root::api_info))

        // Website routes
        .nest("/api", public_routes())

        // Dashboard routes
        .nest("/api/admin", admin_routes())

        .route(
            "/api/upload",
            post(handlers::upload::upload_image).layer(DefaultBodyLimit::max(upload_body_limit)),
        )

        // Add state to the router
        .with_state(app_state)

        // Uploaded images
        .nest_service(PUBLIC_PREFIX, ServeDir::new(uploads_dir))

        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(handlers::events::list))
        .route("/events/:id", get(handlers::events::get))
        .route("/events/:id/register", post(handlers::events::register))
        .route("/team", get(handlers::team::list))
        .route("/departments", get(handlers::departments::list))
        .route("/timeline", get(handlers::timeline::list))
        .route("/announcements", get(handlers::announcements::list_active))
        .route("/club-info", get(handlers::club_info::list))
        .route(
            "/suggestions",
            get(handlers::suggestions::lookup_by_email).post(handlers::suggestions::create),
        )
        .route("/analytics/page-view", post(handlers::analytics::record_page_view))
        .route("/auth/login", post(handlers::auth::login))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(handlers::stats::dashboard))
        .nest("/events", event_routes())
        .nest("/team", team_routes())
        .nest("/departments", department_routes())
        .nest("/timeline", timeline_routes())
        .nest("/suggestions", suggestion_routes())
        .nest("/club-info", club_info_routes())
        .nest("/announcements", announcement_routes())
}

fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::events::list).post(handlers::events::create))
        .route("/:id", put(handlers::events::update).delete(handlers::events::delete))
        .route("/:id/registrations", get(handlers::events::registrations))
}

fn team_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::team::list).post(handlers::team::create))
        .route("/:id", put(handlers::team::update).delete(handlers::team::delete))
}

fn department_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::departments::list).post(handlers::departments::create))
        .route("/:id", put(handlers::departments::update).delete(handlers::departments::delete))
}

fn timeline_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::timeline::list).post(handlers::timeline::create))
        .route("/:id", put(handlers::timeline::update).delete(handlers::timeline::delete))
}

fn suggestion_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::suggestions::list).post(handlers::suggestions::create))
        .route("/:id", put(handlers::suggestions::update).delete(handlers::suggestions::delete))
}

fn club_info_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::club_info::list).post(handlers::club_info::create))
        .route("/:id", put(handlers::club_info::update).delete(handlers::club_info::delete))
}

fn announcement_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::announcements::list).post(handlers::announcements::create))
        .route("/:id", put(handlers::announcements::update).delete(handlers::announcements::delete))
}
