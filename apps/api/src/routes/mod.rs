pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::{auth, catalog, dashboard, evaluations, interview, profile, submissions, tasks};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/auth/google", post(auth::handlers::handle_google_login))
        .route("/auth/me", get(auth::handlers::handle_me))
        // Catalog
        .route("/companies", get(catalog::handlers::handle_search_companies))
        .route("/job-roles", get(catalog::handlers::handle_search_job_roles))
        .route(
            "/job-roles/categories",
            get(catalog::handlers::handle_job_role_categories),
        )
        // Tasks
        .route("/tasks/generate", post(tasks::handlers::handle_generate_tasks))
        .route("/tasks", get(tasks::handlers::handle_list_tasks))
        .route("/tasks/:id", get(tasks::handlers::handle_task_detail))
        // Submissions
        .route(
            "/submissions",
            post(submissions::handlers::handle_create_submission),
        )
        .route(
            "/submissions/:id",
            get(submissions::handlers::handle_get_submission)
                .put(submissions::handlers::handle_update_submission),
        )
        // Interview threads
        .route("/threads", get(interview::handlers::handle_list_threads))
        .route("/threads/:id", get(interview::handlers::handle_thread_detail))
        .route(
            "/threads/:id/messages",
            post(interview::handlers::handle_post_message),
        )
        // Evaluations
        .route(
            "/evaluations/:id",
            get(evaluations::handlers::handle_evaluation_detail),
        )
        // Dashboard & profile
        .route(
            "/dashboard/summary",
            get(dashboard::handlers::handle_dashboard_summary),
        )
        .route(
            "/profile",
            get(profile::handlers::handle_get_profile)
                .patch(profile::handlers::handle_update_profile),
        )
        .with_state(state)
}
