use crate::handlers;
use crate::middleware::auth::auth_middleware;
use crate::websocket;
use axum::{middleware, routing, Router};

pub fn create_routes() -> Router {
    Router::new()
        .nest("/api", api_routes())
        // Real-time channel (auth handled inside via the register frame)
        .route("/ws", routing::get(websocket::channel::ws_handler))
}

fn api_routes() -> Router {
    public_routes().merge(protected_routes().layer(middleware::from_fn(auth_middleware)))
}

/// Public routes: signup/login plus all anonymous reads.
fn public_routes() -> Router {
    Router::new()
        // Auth
        .route("/auth/signup", routing::post(handlers::signup))
        .route("/auth/login", routing::post(handlers::login))
        .route("/auth/count", routing::get(handlers::user_count))
        // Questions
        .route(
            "/questions",
            routing::get(handlers::question::list_questions),
        )
        .route(
            "/questions/{id}",
            routing::get(handlers::question::get_question),
        )
        // Answers
        .route(
            "/questions/{id}/answers",
            routing::get(handlers::answer::list_answers),
        )
        // Comments
        .route(
            "/answers/{id}/comments",
            routing::get(handlers::comment::list_comments),
        )
}

/// Protected routes: everything that needs an authenticated session.
fn protected_routes() -> Router {
    Router::new()
        // Auth
        .route("/auth/me", routing::get(handlers::get_current_user))
        .route("/auth/logout", routing::post(handlers::logout))
        // Questions
        .route(
            "/questions",
            routing::post(handlers::question::create_question),
        )
        .route(
            "/questions/vote/{id}",
            routing::post(handlers::question::vote_question),
        )
        // Answers
        .route("/answers", routing::post(handlers::answer::create_answer))
        .route(
            "/answers/vote/{id}",
            routing::post(handlers::answer::vote_answer),
        )
        .route(
            "/answers/accept",
            routing::post(handlers::answer::accept_answer),
        )
        // Comments
        .route("/comments", routing::post(handlers::comment::create_comment))
        // Notifications
        .route(
            "/notifications",
            routing::get(handlers::notification::list_unread),
        )
        .route(
            "/notifications/all",
            routing::get(handlers::notification::list_all),
        )
        .route(
            "/notifications/unread-count",
            routing::get(handlers::notification::unread_count),
        )
        .route(
            "/notifications/mark-all-read",
            routing::patch(handlers::notification::mark_all_read),
        )
        .route(
            "/notifications/{id}/read",
            routing::patch(handlers::notification::mark_read),
        )
        // Reports
        .route(
            "/reports/submit",
            routing::post(handlers::report::submit_report),
        )
        .route(
            "/reports/admin/flags",
            routing::get(handlers::report::list_flags),
        )
        .route(
            "/reports/admin/flags/{flag_id}",
            routing::patch(handlers::report::process_flag),
        )
        // Admin
        .route("/admin/stats", routing::get(handlers::admin::get_stats))
        .route("/admin/users", routing::get(handlers::admin::list_users))
        .route(
            "/admin/users/{id}/ban",
            routing::patch(handlers::admin::toggle_ban),
        )
        // Upload
        .route(
            "/upload/image",
            routing::post(handlers::upload::upload_image),
        )
}
