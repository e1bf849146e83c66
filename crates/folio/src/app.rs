use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        admin::{dashboard, flush_cache, reconnect_cache},
        auth::{login, logout, me},
        blogs::{
            archive, archive_post, create_post, delete_post, get_post, list_posts, post_views,
            unarchive_post, update_post,
        },
        health::{healthz, livez},
        projects::{
            create_project, delete_project, get_project, list_projects, project_views,
            update_project,
        },
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let api_routes = Router::new()
        // Blog routes
        .route("/blogs", get(list_posts).post(create_post))
        .route("/blogs/archive", get(archive))
        .route(
            "/blogs/{slug}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/blogs/{slug}/views", get(post_views))
        .route("/blogs/{slug}/archive", post(archive_post))
        .route("/blogs/{slug}/unarchive", post(unarchive_post))
        // Project routes
        .route("/projects", get(list_projects).post(create_project))
        .route(
            "/projects/{slug}",
            get(get_project).put(update_project).delete(delete_project),
        )
        .route("/projects/{slug}/views", get(project_views))
        // Admin routes
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
        .route("/admin/dashboard", get(dashboard))
        .route("/admin/cache/reconnect", post(reconnect_cache))
        .route("/admin/cache/flush", post(flush_cache))
        .layer(cors);

    Router::new()
        // Health check endpoints
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}
