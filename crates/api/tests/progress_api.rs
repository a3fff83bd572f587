//! HTTP-level tests for the learner catalog, checklists, session
//! completion, and the dashboard.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_auth, post_json_auth, redeem, seed_code};
use serde_json::json;
use sqlx::PgPool;
use academy_db::models::project::UpdateProject;
use academy_db::repositories::{ProjectRepo, UserProgressRepo};

const CODE: &str = "AB12CD34";
const FIRST_TASK: &str = "Set up a basic HTML5 document structure";
const FIRST_REQUIREMENT: &str = "Responsive design that works on all devices";

async fn learner(pool: &PgPool) -> (axum::Router, String) {
    seed_code(pool, CODE, "Jane Doe").await;
    let app = common::build_test_app(pool.clone());
    let token = redeem(app.clone(), CODE).await;
    (app, token)
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_courses_list_in_catalog_order(pool: PgPool) {
    let (app, token) = learner(&pool).await;

    let response = get_auth(app, "/api/v1/courses", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let courses = json["data"].as_array().unwrap();
    let ids: Vec<&str> = courses.iter().map(|c| c["id"].as_str().unwrap()).collect();
    assert_eq!(ids, ["html", "css", "javascript"]);
    assert_eq!(courses[0]["sessions"].as_array().unwrap().len(), 6);
    assert_eq!(courses[0]["sessions"][0]["id"], "what-is-html");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_course_is_404(pool: PgPool) {
    let (app, token) = learner(&pool).await;

    let response = get_auth(app, "/api/v1/courses/cobol", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_session_detail_has_navigation_and_records_position(pool: PgPool) {
    let (app, token) = learner(&pool).await;

    let response = get_auth(
        app.clone(),
        "/api/v1/courses/html/sessions/main-code-html",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    assert_eq!(data["course_title"], "HTML");
    assert_eq!(data["session"]["id"], "main-code-html");
    assert_eq!(data["index"], 1);
    assert_eq!(data["previous_session_id"], "what-is-html");
    assert_eq!(data["next_session_id"], "main-tags");
    assert_eq!(data["remaining_sessions"], 4);
    assert!(data["embed_url"].is_null());
    assert_eq!(data["progress"]["total_tasks"], 4);
    assert_eq!(data["progress"]["task_percent"], 0);

    let progress = UserProgressRepo::find_by_user_code(&pool, CODE)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(progress.current_course.as_deref(), Some("html"));
    assert_eq!(progress.current_session.as_deref(), Some("main-code-html"));
    assert_eq!(progress.login_count, 1, "opening a session is not a login");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_first_and_last_sessions_have_open_ends(pool: PgPool) {
    let (app, token) = learner(&pool).await;

    let first = body_json(
        get_auth(
            app.clone(),
            "/api/v1/courses/html/sessions/what-is-html",
            &token,
        )
        .await,
    )
    .await;
    assert!(first["data"]["previous_session_id"].is_null());
    assert_eq!(first["data"]["next_session_id"], "main-code-html");

    let last = body_json(
        get_auth(
            app,
            "/api/v1/courses/html/sessions/forms-inputs-buttons",
            &token,
        )
        .await,
    )
    .await;
    assert_eq!(last["data"]["previous_session_id"], "semantic-elements");
    assert!(last["data"]["next_session_id"].is_null());
    assert_eq!(last["data"]["remaining_sessions"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_session_of_another_course_is_404(pool: PgPool) {
    let (app, token) = learner(&pool).await;

    let response = get_auth(app, "/api/v1/courses/css/sessions/what-is-html", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Task checklist
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_toggling_a_task_twice_restores_the_checklist(pool: PgPool) {
    let (app, token) = learner(&pool).await;
    let uri = "/api/v1/courses/html/sessions/what-is-html/tasks/toggle";

    let response = post_json_auth(app.clone(), uri, json!({ "task": FIRST_TASK }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    assert_eq!(data["completed_tasks"], json!([FIRST_TASK]));
    assert_eq!(data["task_percent"], 25);
    assert_eq!(data["is_completed"], false);

    let response = post_json_auth(app.clone(), uri, json!({ "task": FIRST_TASK }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    assert_eq!(data["completed_tasks"], json!([]));
    assert_eq!(data["task_percent"], 0);

    let response = get_auth(
        app,
        "/api/v1/courses/html/sessions/what-is-html/progress",
        &token,
    )
    .await;
    assert_eq!(body_json(response).await["data"]["completed_tasks"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_toggling_an_unknown_task_is_rejected(pool: PgPool) {
    let (app, token) = learner(&pool).await;

    let response = post_json_auth(
        app,
        "/api/v1/courses/html/sessions/what-is-html/tasks/toggle",
        json!({ "task": "Write a compiler" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ticking_every_task_does_not_complete_the_session(pool: PgPool) {
    let (app, token) = learner(&pool).await;
    let uri = "/api/v1/courses/html/sessions/what-is-html/tasks/toggle";
    let tasks = [
        FIRST_TASK,
        "Add a title to your webpage",
        "Include meta tags for character encoding",
        "Add a simple heading and paragraph",
    ];

    let mut last = json!(null);
    for task in tasks {
        let response = post_json_auth(app.clone(), uri, json!({ "task": task }), &token).await;
        last = body_json(response).await;
    }
    assert_eq!(last["data"]["task_percent"], 100);
    assert_eq!(last["data"]["is_completed"], false);
    assert!(UserProgressRepo::completed_sessions(&pool, CODE)
        .await
        .unwrap()
        .is_empty());
}

// ---------------------------------------------------------------------------
// Session completion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_completing_a_session_is_idempotent(pool: PgPool) {
    let (app, token) = learner(&pool).await;
    let uri = "/api/v1/courses/html/sessions/what-is-html/complete";

    for _ in 0..2 {
        let response = post_auth(app.clone(), uri, &token).await;
        assert_eq!(response.status(), StatusCode::OK);

        let data = &body_json(response).await["data"];
        assert_eq!(data["progress"]["is_completed"], true);
        assert_eq!(data["completed_sessions"], json!(["html-what-is-html"]));
        assert_eq!(
            data["completed_session_keys"],
            json!([{ "course_id": "html", "session_id": "what-is-html" }])
        );
        assert_eq!(data["course_percent"], 17);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_completing_unknown_session_is_404(pool: PgPool) {
    let (app, token) = learner(&pool).await;

    let response = post_auth(app, "/api/v1/courses/html/sessions/nope/complete", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Project requirements
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_completes_when_every_requirement_is_ticked(pool: PgPool) {
    let (app, token) = learner(&pool).await;

    let detail = body_json(
        get_auth(
            app.clone(),
            "/api/v1/projects/html-css/personal-portfolio",
            &token,
        )
        .await,
    )
    .await;
    let requirements: Vec<String> = detail["data"]["project"]["requirements"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r.as_str().unwrap().to_string())
        .collect();
    assert_eq!(requirements.len(), 7);
    assert_eq!(requirements[0], FIRST_REQUIREMENT);
    assert_eq!(detail["data"]["progress"]["total_requirements"], 7);

    let uri = "/api/v1/projects/html-css/personal-portfolio/requirements/toggle";
    let mut last = json!(null);
    for requirement in &requirements {
        let response = post_json_auth(
            app.clone(),
            uri,
            json!({ "requirement": requirement }),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        last = body_json(response).await;
    }
    assert_eq!(last["data"]["is_completed"], true);
    assert_eq!(last["data"]["requirement_percent"], 100);

    let response = post_json_auth(
        app.clone(),
        uri,
        json!({ "requirement": FIRST_REQUIREMENT }),
        &token,
    )
    .await;
    let data = &body_json(response).await["data"];
    assert_eq!(data["is_completed"], false);
    assert_eq!(data["completed_requirements"].as_array().unwrap().len(), 6);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reworded_requirement_drops_out_of_progress(pool: PgPool) {
    let (app, token) = learner(&pool).await;
    let response = post_json_auth(
        app.clone(),
        "/api/v1/projects/html-css/personal-portfolio/requirements/toggle",
        json!({ "requirement": FIRST_REQUIREMENT }),
        &token,
    )
    .await;
    assert_eq!(body_json(response).await["data"]["requirement_percent"], 14);

    let project = ProjectRepo::find_project(&pool, "html-css", "personal-portfolio")
        .await
        .unwrap()
        .unwrap();
    let mut requirements = project.requirements.clone();
    requirements[0] = "Fully responsive layout".to_string();
    let update = UpdateProject {
        requirements: Some(requirements),
        ..Default::default()
    };
    ProjectRepo::update_project(&pool, "html-css", "personal-portfolio", &update)
        .await
        .unwrap();

    let detail = body_json(
        get_auth(app, "/api/v1/projects/html-css/personal-portfolio", &token).await,
    )
    .await;
    let progress = &detail["data"]["progress"];
    assert_eq!(progress["completed_requirements"], json!([]));
    assert_eq!(progress["requirement_percent"], 0);
    assert_eq!(progress["is_completed"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_toggling_an_unknown_requirement_is_rejected(pool: PgPool) {
    let (app, token) = learner(&pool).await;

    let response = post_json_auth(
        app,
        "/api/v1/projects/html-css/personal-portfolio/requirements/toggle",
        json!({ "requirement": "Ship it to production" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_in_wrong_category_is_404(pool: PgPool) {
    let (app, token) = learner(&pool).await;

    let response = get_auth(app, "/api/v1/projects/fullstack/personal-portfolio", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_projects_list_groups_by_category(pool: PgPool) {
    let (app, token) = learner(&pool).await;

    let json = body_json(get_auth(app, "/api/v1/projects", &token).await).await;
    let categories = json["data"].as_array().unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0]["id"], "html-css");
    assert_eq!(categories[0]["projects"].as_array().unwrap().len(), 3);
    assert_eq!(categories[1]["projects"][0]["id"], "todo-app");
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dashboard_summarises_progress(pool: PgPool) {
    let (app, token) = learner(&pool).await;

    post_auth(
        app.clone(),
        "/api/v1/courses/html/sessions/what-is-html/complete",
        &token,
    )
    .await;
    get_auth(
        app.clone(),
        "/api/v1/courses/html/sessions/main-tags",
        &token,
    )
    .await;

    let response = get_auth(app, "/api/v1/me/dashboard", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    assert_eq!(data["access_code"], CODE);
    assert_eq!(data["customer_name"], "Jane Doe");
    assert_eq!(data["login_count"], 1);
    assert_eq!(data["total_sessions"], 6);
    assert_eq!(data["overall_percent"], 17);
    assert_eq!(data["completed_sessions"], json!(["html-what-is-html"]));
    assert_eq!(data["completed_session_titles"], json!(["What is HTML?"]));
    assert_eq!(data["current_course"], "HTML");
    assert_eq!(data["current_session"], "Main Tags: h1-h6, p, img, ul/ol");

    let courses = data["courses"].as_array().unwrap();
    assert_eq!(courses.len(), 3);
    assert_eq!(courses[0]["course_id"], "html");
    assert_eq!(courses[0]["completed_sessions"], 1);
    assert_eq!(courses[0]["percent"], 17);
    assert_eq!(courses[1]["total_sessions"], 0);
    assert_eq!(courses[1]["percent"], 0);

    let categories = data["project_categories"].as_array().unwrap();
    assert_eq!(categories[0]["total_projects"], 3);
    assert_eq!(categories[0]["completed_projects"], 0);
}
