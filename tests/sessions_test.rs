mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

fn timestamp(value: &Value) -> DateTime<Utc> {
    value.as_str().unwrap().parse().unwrap()
}

async fn app_with_user_and_routine() -> axum::Router {
    let app = common::create_test_app(common::setup_test_db());
    common::create_test_user(&app, "ana").await;
    common::create_test_routine(&app, "Full body").await;
    app
}

#[tokio::test]
async fn test_create_session() {
    let app = app_with_user_and_routine().await;

    let (status, session) = common::post(
        &app,
        "/sessions",
        json!({"user_id": 1, "routine_id": 1, "notes": "felt strong"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["id"], 1);
    assert_eq!(session["completed"], false);
    assert_eq!(session["completed_at"], Value::Null);
    assert_eq!(session["notes"], "felt strong");
    assert!(session["started_at"].is_string());
}

#[tokio::test]
async fn test_create_with_missing_user_inserts_nothing() {
    let app = app_with_user_and_routine().await;

    let (status, body) =
        common::post(&app, "/sessions", json!({"user_id": 42, "routine_id": 1})).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "User not found");
    let (_, sessions) = common::get(&app, "/sessions").await;
    assert_eq!(sessions, json!([]));
}

#[tokio::test]
async fn test_create_with_missing_routine() {
    let app = app_with_user_and_routine().await;

    let (status, body) =
        common::post(&app, "/sessions", json!({"user_id": 1, "routine_id": 7})).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Routine not found");
}

#[tokio::test]
async fn test_patch_completed_sets_completed_at() {
    let app = app_with_user_and_routine().await;
    common::post(&app, "/sessions", json!({"user_id": 1, "routine_id": 1})).await;

    let (status, session) = common::patch(&app, "/sessions/1", json!({"completed": true})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["completed"], true);
    assert!(timestamp(&session["completed_at"]) >= timestamp(&session["started_at"]));
}

#[tokio::test]
async fn test_recompleting_keeps_completed_at() {
    let app = app_with_user_and_routine().await;
    common::post(&app, "/sessions", json!({"user_id": 1, "routine_id": 1})).await;
    let (_, first) = common::patch(&app, "/sessions/1", json!({"completed": true})).await;

    let (_, second) = common::patch(
        &app,
        "/sessions/1",
        json!({"completed": true, "calories_burned": 320.0}),
    )
    .await;

    assert_eq!(second["completed_at"], first["completed_at"]);
    assert_eq!(second["calories_burned"], 320.0);
}

#[tokio::test]
async fn test_supplied_completed_at_wins() {
    let app = app_with_user_and_routine().await;
    common::post(&app, "/sessions", json!({"user_id": 1, "routine_id": 1})).await;

    let (status, session) = common::patch(
        &app,
        "/sessions/1",
        json!({"completed": true, "completed_at": "2030-01-01T10:00:00Z"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        timestamp(&session["completed_at"]),
        "2030-01-01T10:00:00Z".parse::<DateTime<Utc>>().unwrap()
    );
}

#[tokio::test]
async fn test_completing_keeps_completed_at_set_earlier() {
    let app = app_with_user_and_routine().await;
    common::post(&app, "/sessions", json!({"user_id": 1, "routine_id": 1})).await;
    let (status, _) = common::patch(
        &app,
        "/sessions/1",
        json!({"completed_at": "2030-01-01T10:00:00Z"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, session) = common::patch(&app, "/sessions/1", json!({"completed": true})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["completed"], true);
    assert_eq!(
        timestamp(&session["completed_at"]),
        "2030-01-01T10:00:00Z".parse::<DateTime<Utc>>().unwrap()
    );
}

#[tokio::test]
async fn test_list_filters_by_user() {
    let app = app_with_user_and_routine().await;
    common::create_test_user(&app, "ben").await;
    common::post(&app, "/sessions", json!({"user_id": 1, "routine_id": 1})).await;
    common::post(&app, "/sessions", json!({"user_id": 2, "routine_id": 1})).await;

    let (status, sessions) = common::get(&app, "/sessions?user_id=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(sessions.as_array().unwrap().len(), 1);
    assert_eq!(sessions[0]["user_id"], 2);
}

#[tokio::test]
async fn test_delete_session() {
    let app = app_with_user_and_routine().await;
    common::post(&app, "/sessions", json!({"user_id": 1, "routine_id": 1})).await;

    let (status, body) = common::delete(&app, "/sessions/1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Session 1 deleted successfully");
    assert_eq!(body["deleted_session"]["id"], 1);

    let (status, body) = common::get(&app, "/sessions/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Session not found");
}
