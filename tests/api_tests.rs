mod common;

use reqwest::StatusCode;
use serde_json::json;

// ── Health ──────────────────────────────────────────────────────

#[tokio::test]
async fn health_returns_ok() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");

    common::cleanup(app).await;
}

// ── Registration & confirmation ─────────────────────────────────

#[tokio::test]
async fn register_confirm_login_flow() {
    let app = common::spawn_app().await;

    let (body, status) = app.register("alice@test.com", "Employee").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["enabled"], false);

    // Disabled accounts cannot log in
    let (_, status) = app.login("alice@test.com", "password123").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let token = app.confirmation_token_for("alice@test.com").await;
    let (body, status) = app.confirm(&token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["enabled"], true);

    let (body, status) = app.login("alice@test.com", "password123").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["access_token"].is_string());

    common::cleanup(app).await;
}

#[tokio::test]
async fn register_duplicate_username_conflicts() {
    let app = common::spawn_app().await;

    let (_, status) = app.register("bob@test.com", "Employee").await;
    assert_eq!(status, StatusCode::OK);

    let (body, status) = app.register("bob@test.com", "Manager").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"].as_str().unwrap().contains("already exists"));

    common::cleanup(app).await;
}

#[tokio::test]
async fn confirm_unknown_token_not_found() {
    let app = common::spawn_app().await;

    let (_, status) = app.confirm("no-such-token").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    common::cleanup(app).await;
}

#[tokio::test]
async fn confirm_expired_token_gone() {
    let app = common::spawn_app().await;

    app.register("carol@test.com", "Employee").await;
    let token = app.confirmation_token_for("carol@test.com").await;

    // Push the window into the past: a token expiring yesterday is neither
    // on its issue date nor the day after.
    sqlx::query("UPDATE confirmation_tokens SET expires_on = CURRENT_DATE - 1 WHERE token = $1")
        .bind(&token)
        .execute(&app.pool)
        .await
        .unwrap();

    let (body, status) = app.confirm(&token).await;
    assert_eq!(status, StatusCode::GONE);
    assert!(body["message"].as_str().unwrap().contains("expired"));

    common::cleanup(app).await;
}

#[tokio::test]
async fn confirm_on_day_after_issue_still_valid() {
    let app = common::spawn_app().await;

    app.register("dave@test.com", "Employee").await;
    let token = app.confirmation_token_for("dave@test.com").await;

    // Simulate confirming on the day after issuance: expires_on equals today.
    sqlx::query("UPDATE confirmation_tokens SET expires_on = CURRENT_DATE WHERE token = $1")
        .bind(&token)
        .execute(&app.pool)
        .await
        .unwrap();

    let (_, status) = app.confirm(&token).await;
    assert_eq!(status, StatusCode::OK);

    common::cleanup(app).await;
}

// ── Projects ────────────────────────────────────────────────────

#[tokio::test]
async fn project_code_conflict_and_freed_after_delete() {
    let app = common::spawn_app().await;
    let (admin, _) = app.setup_user("admin@test.com", "Admin").await;
    let (_, manager_id) = app.setup_user("manager@test.com", "Manager").await;

    app.create_project(&admin, "PR001", manager_id).await;

    let (body, status) = app
        .post_auth(
            "/api/v1/project",
            &admin,
            &json!({ "project_code": "PR001", "name": "Duplicate", "manager_id": manager_id }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");

    // Deleting renames the code, so it becomes available again
    let (_, status) = app.delete_auth("/api/v1/project/PR001", &admin).await;
    assert_eq!(status, StatusCode::OK);

    let (body, status) = app
        .post_auth(
            "/api/v1/project",
            &admin,
            &json!({ "project_code": "PR001", "name": "Reborn", "manager_id": manager_id }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    common::cleanup(app).await;
}

#[tokio::test]
async fn complete_project_twice_conflicts() {
    let app = common::spawn_app().await;
    let (admin, _) = app.setup_user("admin@test.com", "Admin").await;
    let (_, manager_id) = app.setup_user("manager@test.com", "Manager").await;

    let project = app.create_project(&admin, "PR002", manager_id).await;
    assert_eq!(project["status"], "OPEN");

    let (body, status) = app
        .put_auth("/api/v1/project/complete/PR002", &admin, &json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "COMPLETE");

    let (_, status) = app
        .put_auth("/api/v1/project/complete/PR002", &admin, &json!({}))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    common::cleanup(app).await;
}

#[tokio::test]
async fn project_update_preserves_status_and_requires_existing_code() {
    let app = common::spawn_app().await;
    let (admin, _) = app.setup_user("admin@test.com", "Admin").await;
    let (_, manager_id) = app.setup_user("manager@test.com", "Manager").await;

    app.create_project(&admin, "PR003", manager_id).await;
    app.put_auth("/api/v1/project/complete/PR003", &admin, &json!({}))
        .await;

    let (body, status) = app
        .put_auth(
            "/api/v1/project",
            &admin,
            &json!({ "project_code": "PR003", "name": "Renamed", "manager_id": manager_id }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Renamed");
    assert_eq!(body["data"]["status"], "COMPLETE");

    let (_, status) = app
        .put_auth(
            "/api/v1/project",
            &admin,
            &json!({ "project_code": "NOPE", "name": "Ghost", "manager_id": manager_id }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    common::cleanup(app).await;
}

#[tokio::test]
async fn deleting_project_cascades_to_tasks() {
    let app = common::spawn_app().await;
    let (admin, _) = app.setup_user("admin@test.com", "Admin").await;
    let (manager, manager_id) = app.setup_user("manager@test.com", "Manager").await;
    let (_, employee_id) = app.setup_user("employee@test.com", "Employee").await;

    let project = app.create_project(&admin, "PR004", manager_id).await;
    let project_id = project["id"].as_str().unwrap();

    app.create_task(&manager, project_id, employee_id, "First").await;
    app.create_task(&manager, project_id, employee_id, "Second").await;

    let (body, _) = app.get_auth("/api/v1/task", &manager).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (_, status) = app.delete_auth("/api/v1/project/PR004", &admin).await;
    assert_eq!(status, StatusCode::OK);

    // Both tasks were soft-deleted with the project
    let (body, _) = app.get_auth("/api/v1/task", &manager).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    common::cleanup(app).await;
}

#[tokio::test]
async fn task_create_forces_open_status_and_current_date() {
    let app = common::spawn_app().await;
    let (admin, _) = app.setup_user("admin@test.com", "Admin").await;
    let (manager, manager_id) = app.setup_user("manager@test.com", "Manager").await;
    let (_, employee_id) = app.setup_user("employee@test.com", "Employee").await;

    let project = app.create_project(&admin, "PR005", manager_id).await;
    let task = app
        .create_task(&manager, project["id"].as_str().unwrap(), employee_id, "Task")
        .await;

    assert_eq!(task["status"], "OPEN");
    assert_eq!(
        task["assigned_date"].as_str().unwrap(),
        chrono::Utc::now().date_naive().to_string()
    );

    common::cleanup(app).await;
}

// ── Employee task views ─────────────────────────────────────────

#[tokio::test]
async fn employee_views_and_unconstrained_status_updates() {
    let app = common::spawn_app().await;
    let (admin, _) = app.setup_user("admin@test.com", "Admin").await;
    let (manager, manager_id) = app.setup_user("manager@test.com", "Manager").await;
    let (employee, employee_id) = app.setup_user("employee@test.com", "Employee").await;

    let project = app.create_project(&admin, "PR006", manager_id).await;
    let project_id = project["id"].as_str().unwrap();
    let task = app.create_task(&manager, project_id, employee_id, "Work").await;
    let task_id = task["id"].as_str().unwrap();

    let (body, status) = app.get_auth("/api/v1/task/employee", &employee).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // Any status value is accepted, in any order
    let (body, status) = app
        .put_auth(
            "/api/v1/task/employee/status",
            &employee,
            &json!({ "id": task_id, "status": "IN_PROGRESS" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "IN_PROGRESS");

    let (_, status) = app
        .put_auth(
            "/api/v1/task/employee/status",
            &employee,
            &json!({ "id": task_id, "status": "COMPLETE" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // Completed tasks leave the open view and land in the archive
    let (body, _) = app.get_auth("/api/v1/task/employee", &employee).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
    let (body, _) = app.get_auth("/api/v1/task/employee/archive", &employee).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // And back again
    let (_, status) = app
        .put_auth(
            "/api/v1/task/employee/status",
            &employee,
            &json!({ "id": task_id, "status": "OPEN" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    common::cleanup(app).await;
}

#[tokio::test]
async fn task_operations_on_unknown_id_not_found() {
    let app = common::spawn_app().await;
    let (manager, _) = app.setup_user("manager@test.com", "Manager").await;
    let (employee, _) = app.setup_user("employee@test.com", "Employee").await;

    let missing = uuid::Uuid::new_v4();

    let (_, status) = app
        .get_auth(&format!("/api/v1/task/{missing}"), &manager)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, status) = app
        .delete_auth(&format!("/api/v1/task/{missing}"), &manager)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, status) = app
        .put_auth(
            "/api/v1/task/employee/status",
            &employee,
            &json!({ "id": missing, "status": "COMPLETE" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    common::cleanup(app).await;
}

// ── Manager detail view ─────────────────────────────────────────

#[tokio::test]
async fn manager_details_end_to_end() {
    let app = common::spawn_app().await;
    let (admin, _) = app.setup_user("admin@test.com", "Admin").await;
    let (manager, manager_id) = app.setup_user("manager@test.com", "Manager").await;
    let (employee, employee_id) = app.setup_user("employee@test.com", "Employee").await;

    let project = app.create_project(&admin, "P1", manager_id).await;
    let project_id = project["id"].as_str().unwrap();

    let first = app.create_task(&manager, project_id, employee_id, "First").await;
    app.create_task(&manager, project_id, employee_id, "Second").await;

    app.put_auth(
        "/api/v1/task/employee/status",
        &employee,
        &json!({ "id": first["id"], "status": "COMPLETE" }),
    )
    .await;

    let (body, status) = app
        .get_auth("/api/v1/project/manager/details", &manager)
        .await;
    assert_eq!(status, StatusCode::OK);
    let details = body["data"].as_array().unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0]["complete_task_counts"], 1);
    assert_eq!(details[0]["unfinished_task_counts"], 1);

    // Delete the project; both tasks disappear from active listings
    let (_, status) = app.delete_auth("/api/v1/project/P1", &admin).await;
    assert_eq!(status, StatusCode::OK);

    let (body, _) = app.get_auth("/api/v1/task/project-manager", &manager).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
    let (body, _) = app.get_auth("/api/v1/task/employee", &employee).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    common::cleanup(app).await;
}

#[tokio::test]
async fn manager_details_without_projects_not_found() {
    let app = common::spawn_app().await;
    let (manager, _) = app.setup_user("manager@test.com", "Manager").await;

    let (_, status) = app
        .get_auth("/api/v1/project/manager/details", &manager)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    common::cleanup(app).await;
}

// ── User deletion rules ─────────────────────────────────────────

#[tokio::test]
async fn manager_with_projects_cannot_be_deleted() {
    let app = common::spawn_app().await;
    let (admin, _) = app.setup_user("admin@test.com", "Admin").await;
    let (_, manager_id) = app.setup_user("manager@test.com", "Manager").await;

    app.create_project(&admin, "PR007", manager_id).await;

    let (body, status) = app
        .delete_auth("/api/v1/user/manager@test.com", &admin)
        .await;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");

    // Once the project is gone, the manager becomes deletable
    app.delete_auth("/api/v1/project/PR007", &admin).await;
    let (_, status) = app
        .delete_auth("/api/v1/user/manager@test.com", &admin)
        .await;
    assert_eq!(status, StatusCode::OK);

    common::cleanup(app).await;
}

#[tokio::test]
async fn employee_with_tasks_cannot_be_deleted() {
    let app = common::spawn_app().await;
    let (admin, _) = app.setup_user("admin@test.com", "Admin").await;
    let (manager, manager_id) = app.setup_user("manager@test.com", "Manager").await;
    let (_, employee_id) = app.setup_user("employee@test.com", "Employee").await;

    let project = app.create_project(&admin, "PR008", manager_id).await;
    let task = app
        .create_task(&manager, project["id"].as_str().unwrap(), employee_id, "Held")
        .await;

    let (_, status) = app
        .delete_auth("/api/v1/user/employee@test.com", &admin)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, status) = app
        .delete_auth(&format!("/api/v1/task/{}", task["id"].as_str().unwrap()), &manager)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, status) = app
        .delete_auth("/api/v1/user/employee@test.com", &admin)
        .await;
    assert_eq!(status, StatusCode::OK);

    common::cleanup(app).await;
}

#[tokio::test]
async fn deleted_username_is_freed_for_reuse() {
    let app = common::spawn_app().await;
    let (admin, _) = app.setup_user("admin@test.com", "Admin").await;
    app.setup_user("temp@test.com", "Employee").await;

    let (_, status) = app.delete_auth("/api/v1/user/temp@test.com", &admin).await;
    assert_eq!(status, StatusCode::OK);

    let (_, status) = app.register("temp@test.com", "Employee").await;
    assert_eq!(status, StatusCode::OK);

    common::cleanup(app).await;
}

#[tokio::test]
async fn admin_user_crud_and_purge() {
    let app = common::spawn_app().await;
    let (admin, _) = app.setup_user("admin@test.com", "Admin").await;

    // Admin-created accounts are enabled immediately
    let (body, status) = app
        .post_auth(
            "/api/v1/user",
            &admin,
            &json!({
                "username": "new@test.com",
                "password": "password123",
                "first_name": "New",
                "last_name": "Hire",
                "gender": "FEMALE",
                "role": "Employee",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["enabled"], true);

    let (_, status) = app.login("new@test.com", "password123").await;
    assert_eq!(status, StatusCode::OK);

    let (body, status) = app
        .put_auth(
            "/api/v1/user",
            &admin,
            &json!({
                "username": "new@test.com",
                "password": "newpassword1",
                "first_name": "Renamed",
                "last_name": "Hire",
                "gender": "FEMALE",
                "role": "Manager",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["first_name"], "Renamed");

    // Old password no longer works after the re-hash
    let (_, status) = app.login("new@test.com", "password123").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (_, status) = app.login("new@test.com", "newpassword1").await;
    assert_eq!(status, StatusCode::OK);

    let (_, status) = app
        .delete_auth("/api/v1/user/new@test.com/purge", &admin)
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, status) = app
        .delete_auth("/api/v1/user/new@test.com/purge", &admin)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    common::cleanup(app).await;
}

// ── Authorization ───────────────────────────────────────────────

#[tokio::test]
async fn role_listing_is_admin_only() {
    let app = common::spawn_app().await;
    let (admin, _) = app.setup_user("admin@test.com", "Admin").await;
    let (manager, _) = app.setup_user("manager@test.com", "Manager").await;

    let (body, status) = app.get_auth("/api/v1/role", &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    let (_, status) = app.get_auth("/api/v1/role", &manager).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (body, status) = app.get_auth("/api/v1/user/role/Manager", &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["username"], "manager@test.com");

    common::cleanup(app).await;
}

#[tokio::test]
async fn project_endpoints_reject_employees_and_anonymous() {
    let app = common::spawn_app().await;
    let (employee, _) = app.setup_user("employee@test.com", "Employee").await;

    let (_, status) = app.get_auth("/api/v1/project", &employee).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let resp = app
        .client
        .get(app.url("/api/v1/project"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    common::cleanup(app).await;
}

#[tokio::test]
async fn active_project_listing_is_ordered_by_code() {
    let app = common::spawn_app().await;
    let (admin, _) = app.setup_user("admin@test.com", "Admin").await;
    let (_, manager_id) = app.setup_user("manager@test.com", "Manager").await;

    app.create_project(&admin, "ZZ9", manager_id).await;
    app.create_project(&admin, "AA1", manager_id).await;
    app.create_project(&admin, "MM5", manager_id).await;

    let (body, status) = app.get_auth("/api/v1/project", &admin).await;
    assert_eq!(status, StatusCode::OK);
    let codes: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["project_code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["AA1", "MM5", "ZZ9"]);

    common::cleanup(app).await;
}
