use std::net::SocketAddr;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use ticketry::config::Config;

/// A running test server instance with a dedicated test database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub pool: PgPool,
    pub client: Client,
    pub db_name: String,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Register a user with the given role. The account starts disabled.
    pub async fn register(&self, username: &str, role: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/v1/auth/register"))
            .json(&json!({
                "username": username,
                "password": "password123",
                "first_name": "Test",
                "last_name": "User",
                "gender": "MALE",
                "role": role,
            }))
            .send()
            .await
            .expect("register request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Fetch the newest active confirmation token for a user straight from
    /// the database (tests run without SMTP).
    pub async fn confirmation_token_for(&self, username: &str) -> String {
        sqlx::query_scalar::<_, String>(
            "SELECT ct.token FROM confirmation_tokens ct
             JOIN users u ON ct.user_id = u.id
             WHERE u.username = $1 AND ct.is_deleted = false
             ORDER BY ct.created_at DESC LIMIT 1",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .expect("no confirmation token found")
    }

    pub async fn confirm(&self, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(&format!("/api/v1/auth/confirm/{token}")))
            .send()
            .await
            .expect("confirm request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn login(&self, username: &str, password: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/v1/auth/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("login request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Register + confirm + login; returns (access token, user id).
    pub async fn setup_user(&self, username: &str, role: &str) -> (String, Uuid) {
        let (body, status) = self.register(username, role).await;
        assert_eq!(status, StatusCode::OK, "register failed: {body}");
        let user_id: Uuid = body["data"]["id"].as_str().unwrap().parse().unwrap();

        let token = self.confirmation_token_for(username).await;
        let (body, status) = self.confirm(&token).await;
        assert_eq!(status, StatusCode::OK, "confirm failed: {body}");

        let (body, status) = self.login(username, "password123").await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        let access = body["data"]["access_token"].as_str().unwrap().to_string();

        (access, user_id)
    }

    /// Create a project, return the project JSON from the envelope.
    pub async fn create_project(&self, token: &str, code: &str, manager_id: Uuid) -> Value {
        let (body, status) = self
            .post_auth(
                "/api/v1/project",
                token,
                &json!({
                    "project_code": code,
                    "name": format!("Project {code}"),
                    "detail": "",
                    "manager_id": manager_id,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create project failed: {body}");
        body["data"].clone()
    }

    /// Create a task, return the task JSON from the envelope.
    pub async fn create_task(
        &self,
        token: &str,
        project_id: &str,
        assignee_id: Uuid,
        subject: &str,
    ) -> Value {
        let (body, status) = self
            .post_auth(
                "/api/v1/task",
                token,
                &json!({
                    "project_id": project_id,
                    "assignee_id": assignee_id,
                    "subject": subject,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create task failed: {body}");
        body["data"].clone()
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn post_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn put_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("put request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn delete_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("delete request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

/// Spawn a test app with a fresh temporary database.
pub async fn spawn_app() -> TestApp {
    let _ = dotenvy::dotenv();

    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    let db_name = format!(
        "ticketry_test_{}",
        Uuid::new_v4().to_string().replace('-', "")
    );

    // Connect to default postgres DB to create the test DB
    let admin_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.clone());

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url)
        .await
        .expect("Failed to connect to postgres for test DB creation");

    sqlx::query(&format!("CREATE DATABASE \"{db_name}\""))
        .execute(&admin_pool)
        .await
        .expect("Failed to create test database");

    admin_pool.close().await;

    let test_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/{db_name}"))
        .unwrap_or_else(|| base_url.clone());

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&test_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations on test database");

    let config = Config {
        database_url: test_url,
        jwt_secret: "test-jwt-secret-that-is-long-enough".to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to a random port
        base_url: "http://localhost:0".to_string(),
        log_level: "warn".to_string(),
        smtp: None,
    };

    let app = ticketry::build_app(pool.clone(), config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let client = Client::new();

    TestApp {
        addr,
        pool,
        client,
        db_name,
    }
}

/// Drop the test database after tests complete.
pub async fn cleanup(app: TestApp) {
    let db_name = app.db_name.clone();
    app.pool.close().await;

    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let admin_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.clone());

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url)
        .await
        .expect("Failed to connect for cleanup");

    let _ = sqlx::query(&format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"))
        .execute(&admin_pool)
        .await;

    admin_pool.close().await;
}
