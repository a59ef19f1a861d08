//! HTTP-level integration tests for tasks and subtasks.

mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Days, Local, NaiveDate, NaiveTime};
use common::{body_json, delete, get, post_json, put_json};
use serde_json::{json, Value};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The calendar day a `Due_Date` value names, checking that it is an
/// offset timestamp at local midnight.
fn due_day(value: &Value) -> NaiveDate {
    let text = value.as_str().expect("Due_Date is a string");
    let local = DateTime::parse_from_rfc3339(text)
        .expect("Due_Date is RFC 3339")
        .with_timezone(&Local);
    assert_eq!(local.time(), NaiveTime::MIN, "Due_Date {text} is not local midnight");
    local.date_naive()
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn create_task(app: axum::Router, user_id: i64, extra: Value) -> Value {
    let mut body = json!({
        "userId": user_id,
        "Task_Title": "Write report",
        "Description": "draft",
    });
    if let (Some(base), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
        base.extend(extra.clone());
    }
    let response = post_json(app, "/tasks", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

fn subtask_titles(task: &Value) -> Vec<String> {
    task["SubTasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_task_applies_defaults(pool: PgPool) {
    let user = common::create_test_user(&pool, "owner").await;
    let app = common::build_test_app(pool);

    let task = create_task(app, user.id, json!({})).await;

    let expected_due = Local::now().date_naive() + Days::new(7);
    assert_eq!(task["Task_Title"], "Write report");
    assert_eq!(task["Task_Completed"], false);
    assert_eq!(task["Priority"], "Medium");
    assert_eq!(task["Urgency"], "Medium");
    assert_eq!(due_day(&task["Due_Date"]), expected_due);
    assert_eq!(task["user"]["_id"], user.id);
    assert_eq!(task["user"]["username"], "owner");
    assert_eq!(task["progress"], 0.0);
    assert_eq!(task["status"], "Not Started");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_task_truncates_due_date_to_day(pool: PgPool) {
    let user = common::create_test_user(&pool, "owner").await;
    let app = common::build_test_app(pool);

    let task = create_task(
        app,
        user.id,
        json!({"Due_Date": "2030-05-17T15:45:00", "Priority": "High"}),
    )
    .await;

    assert_eq!(due_day(&task["Due_Date"]), ymd(2030, 5, 17));
    assert_eq!(task["Priority"], "High");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_task_for_missing_owner_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/tasks",
        json!({"userId": 999_999, "Task_Title": "x", "Description": "y"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "OWNER_NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_task_without_title_is_400(pool: PgPool) {
    let user = common::create_test_user(&pool, "owner").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/tasks",
        json!({"userId": user.id, "Task_Title": "  ", "Description": "y"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_task_with_initial_subtasks(pool: PgPool) {
    let user = common::create_test_user(&pool, "owner").await;
    let app = common::build_test_app(pool);

    let task = create_task(
        app,
        user.id,
        json!({"SubTasks": [{"title": "one", "completed": true}, {"title": "two"}]}),
    )
    .await;

    assert_eq!(subtask_titles(&task), vec!["one", "two"]);
    assert_eq!(task["progress"], 50.0);
    assert_eq!(task["status"], "In Progress");
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn list_tasks_filters_by_owner(pool: PgPool) {
    let alice = common::create_test_user(&pool, "alice").await;
    let bob = common::create_test_user(&pool, "bob").await;
    let app = common::build_test_app(pool);

    create_task(app.clone(), alice.id, json!({})).await;
    create_task(app.clone(), alice.id, json!({})).await;
    create_task(app.clone(), bob.id, json!({})).await;

    let all = body_json(get(app.clone(), "/tasks").await).await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let filtered = body_json(get(app.clone(), &format!("/tasks?userId={}", alice.id)).await).await;
    assert_eq!(filtered.as_array().unwrap().len(), 2);

    let by_owner = body_json(get(app, &format!("/tasks/user/{}", bob.id)).await).await;
    assert_eq!(by_owner.as_array().unwrap().len(), 1);
    assert_eq!(by_owner[0]["user"]["_id"], bob.id);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn get_missing_task_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/tasks/424242").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn tasks_for_missing_owner_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/tasks/user/424242").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "OWNER_NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Update / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn partial_update_leaves_other_fields_unchanged(pool: PgPool) {
    let user = common::create_test_user(&pool, "owner").await;
    let app = common::build_test_app(pool);
    let task = create_task(
        app.clone(),
        user.id,
        json!({"Priority": "High", "Urgency": "Low", "Due_Date": "2031-01-02"}),
    )
    .await;
    let id = task["_id"].as_i64().unwrap();

    let response = put_json(app, &format!("/tasks/{id}"), json!({"Description": "x"})).await;

    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["Description"], "x");
    assert_eq!(updated["Task_Title"], "Write report");
    assert_eq!(updated["Priority"], "High");
    assert_eq!(updated["Urgency"], "Low");
    assert_eq!(due_day(&updated["Due_Date"]), ymd(2031, 1, 2));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn due_date_sent_back_unchanged_keeps_the_day(pool: PgPool) {
    let user = common::create_test_user(&pool, "owner").await;
    let app = common::build_test_app(pool);
    let task = create_task(app.clone(), user.id, json!({"Due_Date": "2031-01-02"})).await;
    let id = task["_id"].as_i64().unwrap();

    // The client echoes the timestamp it was given.
    let response = put_json(
        app,
        &format!("/tasks/{id}"),
        json!({"Due_Date": task["Due_Date"].clone()}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["Due_Date"], task["Due_Date"]);
    assert_eq!(due_day(&updated["Due_Date"]), ymd(2031, 1, 2));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_with_invalid_due_date_keeps_existing_date(pool: PgPool) {
    let user = common::create_test_user(&pool, "owner").await;
    let app = common::build_test_app(pool);
    let task = create_task(app.clone(), user.id, json!({"Due_Date": "2031-01-02"})).await;
    let id = task["_id"].as_i64().unwrap();

    let response = put_json(
        app,
        &format!("/tasks/{id}"),
        json!({"Due_Date": "next tuesday-ish", "Task_Completed": true}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(due_day(&updated["Due_Date"]), ymd(2031, 1, 2));
    assert_eq!(updated["Task_Completed"], true);
    assert_eq!(updated["status"], "Completed");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_missing_task_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = put_json(app, "/tasks/424242", json!({"Description": "x"})).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_task_then_get_is_404(pool: PgPool) {
    let user = common::create_test_user(&pool, "owner").await;
    let app = common::build_test_app(pool);
    let task = create_task(app.clone(), user.id, json!({"SubTasks": [{"title": "a"}]})).await;
    let id = task["_id"].as_i64().unwrap();

    let response = delete(app.clone(), &format!("/tasks/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Task deleted");

    let response = get(app.clone(), &format!("/tasks/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete(app, &format!("/tasks/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Subtasks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn subtask_completion_reaches_ready_to_complete(pool: PgPool) {
    let user = common::create_test_user(&pool, "owner").await;
    let app = common::build_test_app(pool);
    let task = create_task(app.clone(), user.id, json!({})).await;
    let id = task["_id"].as_i64().unwrap();

    let response = post_json(
        app.clone(),
        &format!("/tasks/{id}/subtasks"),
        json!({"title": "draft outline"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let task = body_json(response).await;
    assert_eq!(task["progress"], 0.0);
    assert_eq!(task["SubTasks"][0]["completed"], false);
    let subtask_id = task["SubTasks"][0]["_id"].as_i64().unwrap();

    let response = put_json(
        app,
        &format!("/tasks/{id}/subtasks/{subtask_id}"),
        json!({"completed": true}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let task = body_json(response).await;
    assert_eq!(task["progress"], 100.0);
    assert_eq!(task["Task_Completed"], false);
    assert_eq!(task["status"], "Ready to Complete");
    assert_eq!(task["SubTasks"][0]["title"], "draft outline");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deleting_middle_subtask_keeps_sibling_order(pool: PgPool) {
    let user = common::create_test_user(&pool, "owner").await;
    let app = common::build_test_app(pool);
    let task = create_task(
        app.clone(),
        user.id,
        json!({"SubTasks": [{"title": "first"}, {"title": "middle"}, {"title": "last"}]}),
    )
    .await;
    let id = task["_id"].as_i64().unwrap();
    let first_id = task["SubTasks"][0]["_id"].clone();
    let middle_id = task["SubTasks"][1]["_id"].as_i64().unwrap();
    let last_id = task["SubTasks"][2]["_id"].clone();

    let response = delete(app, &format!("/tasks/{id}/subtasks/{middle_id}")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let task = body_json(response).await;
    assert_eq!(subtask_titles(&task), vec!["first", "last"]);
    assert_eq!(task["SubTasks"][0]["_id"], first_id);
    assert_eq!(task["SubTasks"][1]["_id"], last_id);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn subtask_errors(pool: PgPool) {
    let user = common::create_test_user(&pool, "owner").await;
    let app = common::build_test_app(pool);
    let task = create_task(app.clone(), user.id, json!({})).await;
    let id = task["_id"].as_i64().unwrap();

    let response = post_json(app.clone(), &format!("/tasks/{id}/subtasks"), json!({"title": ""})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(app.clone(), "/tasks/424242/subtasks", json!({"title": "x"})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = put_json(
        app.clone(),
        &format!("/tasks/{id}/subtasks/424242"),
        json!({"completed": true}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Subtask with id 424242 not found");

    let response = delete(app, &format!("/tasks/{id}/subtasks/424242")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn stats_average_progress_across_tasks(pool: PgPool) {
    let user = common::create_test_user(&pool, "owner").await;
    let app = common::build_test_app(pool);
    create_task(app.clone(), user.id, json!({"Task_Completed": true})).await;
    create_task(app.clone(), user.id, json!({})).await;

    let response = get(app, &format!("/tasks/user/{}/stats", user.id)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let stats = body_json(response).await;
    assert_eq!(stats["total"], 2);
    assert_eq!(stats["completed"], 1);
    assert_eq!(stats["overallProgress"], 50.0);
    assert_eq!(stats["byStatus"]["completed"], 1);
    assert_eq!(stats["byStatus"]["notStarted"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn calendar_buckets_tasks_by_due_day(pool: PgPool) {
    let user = common::create_test_user(&pool, "owner").await;
    let app = common::build_test_app(pool);
    create_task(app.clone(), user.id, json!({"Due_Date": "2025-03-14"})).await;
    create_task(app.clone(), user.id, json!({"Due_Date": "2025-04-01"})).await;

    let response = get(
        app,
        &format!("/tasks/user/{}/calendar?year=2025&month=3", user.id),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let cells = body_json(response).await;
    let cells = cells.as_array().unwrap();
    // 2025-03-01 is a Saturday: six leading filler cells, then 31 days.
    assert_eq!(cells.len(), 37);
    assert_eq!(cells[0]["isCurrentMonth"], false);
    assert_eq!(cells[6]["date"], "2025-03-01");

    let day_14 = &cells[6 + 13];
    assert_eq!(day_14["date"], "2025-03-14");
    assert_eq!(day_14["tasks"].as_array().unwrap().len(), 1);

    let total: usize = cells
        .iter()
        .map(|c| c["tasks"].as_array().unwrap().len())
        .sum();
    assert_eq!(total, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn calendar_rejects_invalid_month(pool: PgPool) {
    let user = common::create_test_user(&pool, "owner").await;
    let app = common::build_test_app(pool);

    let response = get(
        app,
        &format!("/tasks/user/{}/calendar?year=2025&month=13", user.id),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
