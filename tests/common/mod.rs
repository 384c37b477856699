#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use fittrack::db::{create_memory_pool, DbPool};
use fittrack::handlers::{arithmetic, exercises, progress, routines, sessions, stats, users};
use fittrack::migrations::run_migrations_for_tests;
use fittrack::repositories::{
    ExerciseRepository, OperationStore, ProgressRepository, RoutineRepository, SessionRepository,
    UserRepository,
};

pub fn setup_test_db() -> DbPool {
    let pool = create_memory_pool().expect("Failed to create test database");
    run_migrations_for_tests(&pool).expect("Failed to run migrations");
    pool
}

pub fn create_test_app(pool: DbPool) -> Router {
    // Create repositories
    let exercise_repo = ExerciseRepository::new(pool.clone());
    let routine_repo = RoutineRepository::new(pool.clone());
    let user_repo = UserRepository::new(pool.clone());
    let session_repo = SessionRepository::new(pool.clone());
    let progress_repo = ProgressRepository::new(pool.clone());

    // Create handler states
    let exercises_state = exercises::ExercisesState {
        exercise_repo: exercise_repo.clone(),
    };
    let routines_state = routines::RoutinesState {
        routine_repo: routine_repo.clone(),
    };
    let users_state = users::UsersState {
        user_repo: user_repo.clone(),
    };
    let sessions_state = sessions::SessionsState {
        session_repo: session_repo.clone(),
        user_repo: user_repo.clone(),
        routine_repo,
    };
    let progress_state = progress::ProgressState {
        progress_repo: progress_repo.clone(),
        user_repo: user_repo.clone(),
        exercise_repo: exercise_repo.clone(),
    };
    let stats_state = stats::StatsState {
        user_repo,
        exercise_repo,
        session_repo,
        progress_repo,
    };
    let arithmetic_state = arithmetic::ArithmeticState {
        store: OperationStore::new(),
    };

    fittrack::routes::create_router(
        exercises_state,
        routines_state,
        users_state,
        sessions_state,
        progress_state,
        stats_state,
        arithmetic_state,
    )
}

/// Sends one request and returns the status with the decoded JSON body
/// (`Value::Null` when the body is empty).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    send_request(app, request).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn patch(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, None).await
}

// Test data creation helpers
pub async fn create_test_user(app: &Router, username: &str) -> Value {
    let (status, user) = post(
        app,
        "/users",
        serde_json::json!({
            "username": username,
            "email": format!("{}@example.com", username),
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    user
}

pub async fn create_test_exercise(app: &Router, name: &str, exercise_type: &str) -> Value {
    let (status, exercise) = post(
        app,
        "/exercises",
        serde_json::json!({
            "name": name,
            "exercise_type": exercise_type,
            "difficulty": "beginner",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    exercise
}

pub async fn create_test_routine(app: &Router, name: &str) -> Value {
    let (status, routine) = post(
        app,
        "/routines",
        serde_json::json!({
            "name": name,
            "difficulty": "beginner",
            "estimated_duration_minutes": 30,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    routine
}
