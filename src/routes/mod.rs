pub mod auth;
pub mod projects;
pub mod roles;
pub mod tasks;
pub mod users;

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/confirm/{token}", get(auth::confirm))
        .route("/api/v1/auth/login", post(auth::login))
        // Projects
        .route(
            "/api/v1/project",
            get(projects::read_all)
                .post(projects::create)
                .put(projects::update),
        )
        .route("/api/v1/project/manager/details", get(projects::manager_details))
        .route("/api/v1/project/complete/{code}", put(projects::complete))
        .route(
            "/api/v1/project/{code}",
            get(projects::read_by_code).delete(projects::delete),
        )
        // Tasks
        .route(
            "/api/v1/task",
            get(tasks::read_all).post(tasks::create).put(tasks::update),
        )
        .route("/api/v1/task/project-manager", get(tasks::read_all_by_project_manager))
        .route("/api/v1/task/employee", get(tasks::employee_read_open))
        .route("/api/v1/task/employee/archive", get(tasks::employee_read_completed))
        .route("/api/v1/task/employee/status", put(tasks::employee_update_status))
        .route(
            "/api/v1/task/{id}",
            get(tasks::read_by_id).delete(tasks::delete),
        )
        // Users
        .route(
            "/api/v1/user",
            get(users::read_all).post(users::create).put(users::update),
        )
        .route("/api/v1/user/role/{role}", get(users::read_all_by_role))
        .route(
            "/api/v1/user/{username}",
            get(users::read_by_username).delete(users::delete),
        )
        .route("/api/v1/user/{username}/purge", delete(users::purge))
        // Roles
        .route("/api/v1/role", get(roles::read_all))
}
