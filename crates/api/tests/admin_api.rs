//! HTTP-level tests for the admin surface: login, access code
//! management, progress reports, and content editing.

mod common;

use axum::http::{header, StatusCode};
use common::{
    admin_token, body_json, body_text, delete_auth, get, get_auth, patch_json_auth, post_auth,
    post_json, post_json_auth, put_json_auth, redeem, seed_code,
};
use serde_json::json;
use sqlx::PgPool;
use academy_core::access_code::is_well_formed;
use academy_db::repositories::{AccessCodeRepo, ProjectProgressRepo};

// ---------------------------------------------------------------------------
// Login and role enforcement
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_login_with_wrong_password_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/admin/login",
        json!({ "password": "letmein" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Invalid password");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_login_returns_short_lived_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/admin/login",
        json!({ "password": common::ADMIN_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["data"]["token"].is_string());
    assert_eq!(json["data"]["token_type"], "Bearer");
    assert_eq!(json["data"]["expires_in"], 3600);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_routes_reject_missing_and_learner_tokens(pool: PgPool) {
    seed_code(&pool, "AB12CD34", "Jane Doe").await;
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/v1/admin/access-codes").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let learner = redeem(app.clone(), "AB12CD34").await;
    let response = get_auth(app, "/api/v1/admin/access-codes", &learner).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");
}

// ---------------------------------------------------------------------------
// Access codes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_issue_access_code(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_token(app.clone()).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/admin/access-codes",
        json!({ "customer_name": "  Jane Doe ", "customer_phone": "555-0100" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let data = body_json(response).await["data"].clone();
    let code = data["code"].as_str().unwrap();
    assert!(is_well_formed(code), "generated code {code} is malformed");
    assert_eq!(data["customer_name"], "Jane Doe");
    assert_eq!(data["is_active"], true);
    assert!(data["last_access"].is_null());

    // The new code can be redeemed straight away.
    redeem(app, code).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_issue_access_code_requires_both_fields(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = admin_token(app.clone()).await;

    let response = post_json_auth(
        app,
        "/api/v1/admin/access-codes",
        json!({ "customer_name": "Jane Doe", "customer_phone": "   " }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Please fill in all fields");
    assert!(AccessCodeRepo::list(&pool).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_access_codes_newest_first(pool: PgPool) {
    seed_code(&pool, "AAAA1111", "First").await;
    seed_code(&pool, "BBBB2222", "Second").await;
    let app = common::build_test_app(pool);
    let token = admin_token(app.clone()).await;

    let json = body_json(get_auth(app, "/api/v1/admin/access-codes", &token).await).await;
    let codes: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, ["BBBB2222", "AAAA1111"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_toggle_and_set_active(pool: PgPool) {
    let access = seed_code(&pool, "AB12CD34", "Jane Doe").await;
    let app = common::build_test_app(pool);
    let token = admin_token(app.clone()).await;
    let toggle = format!("/api/v1/admin/access-codes/{}/toggle", access.id);
    let active = format!("/api/v1/admin/access-codes/{}/active", access.id);

    let json = body_json(post_auth(app.clone(), &toggle, &token).await).await;
    assert_eq!(json["data"]["is_active"], false);

    let json = body_json(post_auth(app.clone(), &toggle, &token).await).await;
    assert_eq!(json["data"]["is_active"], true);

    let response = put_json_auth(app.clone(), &active, json!({ "is_active": false }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["is_active"], false);

    // Setting the same value again is a no-op, not an error.
    let response = put_json_auth(app.clone(), &active, json!({ "is_active": false }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_auth(app, "/api/v1/admin/access-codes/999999/toggle", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_access_code(pool: PgPool) {
    let access = seed_code(&pool, "AB12CD34", "Jane Doe").await;
    let app = common::build_test_app(pool.clone());
    let token = admin_token(app.clone()).await;
    let uri = format!("/api/v1/admin/access-codes/{}", access.id);

    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(AccessCodeRepo::find_by_id(&pool, access.id).await.unwrap().is_none());

    let response = delete_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Progress reports
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_progress_report_joins_registry_and_catalog(pool: PgPool) {
    seed_code(&pool, "AB12CD34", "Jane Doe").await;
    let app = common::build_test_app(pool);
    let learner = redeem(app.clone(), "AB12CD34").await;
    post_auth(
        app.clone(),
        "/api/v1/courses/html/sessions/what-is-html/complete",
        &learner,
    )
    .await;
    get_auth(
        app.clone(),
        "/api/v1/courses/html/sessions/main-code-html",
        &learner,
    )
    .await;

    let token = admin_token(app.clone()).await;
    let response = get_auth(app, "/api/v1/admin/progress", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let rows = body_json(response).await["data"].clone();
    assert_eq!(rows.as_array().unwrap().len(), 1);
    let row = &rows[0];
    assert_eq!(row["user_code"], "AB12CD34");
    assert_eq!(row["customer_name"], "Jane Doe");
    assert_eq!(row["customer_phone"], "555-0100");
    assert_eq!(row["is_active"], true);
    assert_eq!(row["completed_sessions"], json!(["html-what-is-html"]));
    assert_eq!(row["completed_count"], 1);
    assert_eq!(row["progress_percent"], 17);
    assert_eq!(row["current_course"], "HTML");
    assert_eq!(row["current_session"], "Main code in HTML");
    assert_eq!(row["login_count"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_progress_export_is_quoted_csv(pool: PgPool) {
    seed_code(&pool, "AB12CD34", "Doe, Jane").await;
    seed_code(&pool, "EF56GH78", "John Smith").await;
    let app = common::build_test_app(pool);
    redeem(app.clone(), "AB12CD34").await;
    redeem(app.clone(), "EF56GH78").await;

    let token = admin_token(app.clone()).await;
    let response = get_auth(app, "/api/v1/admin/progress/export", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(
        headers.get(header::CONTENT_TYPE).unwrap().to_str().unwrap(),
        "text/csv; charset=utf-8"
    );
    let disposition = headers
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"student-progress-"));
    assert!(disposition.ends_with(".csv\""));

    let csv = body_text(response).await;
    let lines: Vec<&str> = csv.split("\r\n").filter(|l| !l.is_empty()).collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "Customer Name,Phone,Access Code,Completed Sessions,Progress %,\
         Current Course,Current Session,Login Count,Last Activity"
    );
    assert!(
        lines
            .iter()
            .any(|l| l.starts_with("\"Doe, Jane\",555-0100,AB12CD34,0,0,Not started,Not started,1,")),
        "comma-bearing name must be quoted: {csv}"
    );
}

// ---------------------------------------------------------------------------
// Content editing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patch_course_keeps_omitted_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = admin_token(app.clone()).await;

    let response = patch_json_auth(
        app,
        "/api/v1/admin/courses/css",
        json!({ "title": "CSS Fundamentals" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    assert_eq!(data["title"], "CSS Fundamentals");
    assert_eq!(data["icon"], "🎨");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patch_unknown_course_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = admin_token(app.clone()).await;

    let response = patch_json_auth(
        app,
        "/api/v1/admin/courses/cobol",
        json!({ "title": "COBOL" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_course_and_session(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = admin_token(app.clone()).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/admin/courses",
        json!({ "id": "python", "title": "Python", "icon": "🐍" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["id"], "python");

    let response = post_json_auth(
        app.clone(),
        "/api/v1/admin/courses/python/sessions",
        json!({
            "id": "variables",
            "title": "Variables",
            "tasks": ["Declare a variable"],
            "video_url": "https://youtu.be/dQw4w9WgXcQ"
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let data = &body_json(response).await["data"];
    assert_eq!(data["course_id"], "python");
    assert_eq!(data["order_index"], 0);

    learner_sees_embedded_video(app, &token).await;
}

/// Issue a code through the API and confirm the learner sees the new
/// session with an embeddable video link.
async fn learner_sees_embedded_video(app: axum::Router, token: &str) {
    let issued = body_json(
        post_json_auth(
            app.clone(),
            "/api/v1/admin/access-codes",
            json!({ "customer_name": "Jane Doe", "customer_phone": "555-0100" }),
            token,
        )
        .await,
    )
    .await;
    let code = issued["data"]["code"].as_str().unwrap().to_string();
    let learner = redeem(app.clone(), &code).await;

    let response = get_auth(
        app,
        "/api/v1/courses/python/sessions/variables",
        &learner,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["data"]["embed_url"],
        "https://www.youtube.com/embed/dQw4w9WgXcQ"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_course_id_is_conflict(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = admin_token(app.clone()).await;

    let response = post_json_auth(
        app,
        "/api/v1/admin/courses",
        json!({ "id": "html", "title": "HTML again" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_session_in_unknown_course_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = admin_token(app.clone()).await;

    let response = post_json_auth(
        app,
        "/api/v1/admin/courses/cobol/sessions",
        json!({ "id": "intro", "title": "Intro" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_content_id_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = admin_token(app.clone()).await;

    let response = post_json_auth(
        app,
        "/api/v1/admin/courses",
        json!({ "id": "Not An Id", "title": "Broken" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_with_bad_difficulty_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = admin_token(app.clone()).await;

    let response = post_json_auth(
        app,
        "/api/v1/admin/categories/html-css/projects",
        json!({ "title": "Landing page", "difficulty": "Expert" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_lifecycle(pool: PgPool) {
    seed_code(&pool, "AB12CD34", "Jane Doe").await;
    let app = common::build_test_app(pool.clone());
    let token = admin_token(app.clone()).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/admin/categories",
        json!({ "id": "games", "title": "Games", "icon": "🎮" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Without an explicit id the project gets a generated one.
    let response = post_json_auth(
        app.clone(),
        "/api/v1/admin/categories/games/projects",
        json!({ "title": "Snake", "requirements": ["Move the snake"] }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let project = body_json(response).await["data"].clone();
    let project_id = project["id"].as_str().unwrap().to_string();
    assert!(!project_id.is_empty());
    assert_eq!(project["difficulty"], "Beginner");

    let uri = format!("/api/v1/admin/categories/games/projects/{project_id}");
    let response = patch_json_auth(
        app.clone(),
        &uri,
        json!({ "difficulty": "Advanced", "demo_url": "https://example.com/snake" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    assert_eq!(data["difficulty"], "Advanced");
    assert_eq!(data["title"], "Snake");
    assert_eq!(data["demo_url"], "https://example.com/snake");

    // A learner ticks the only requirement, then the project is deleted.
    let learner = redeem(app.clone(), "AB12CD34").await;
    let toggle = format!("/api/v1/projects/games/{project_id}/requirements/toggle");
    let response = post_json_auth(
        app.clone(),
        &toggle,
        json!({ "requirement": "Move the snake" }),
        &learner,
    )
    .await;
    assert_eq!(body_json(response).await["data"]["is_completed"], true);

    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(ProjectProgressRepo::find(&pool, "AB12CD34", "games", &project_id)
        .await
        .unwrap()
        .is_none());

    let response = delete_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
