use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    arithmetic, exercises, health, progress, routines, sessions, stats, users, utility,
};

#[allow(clippy::too_many_arguments)]
pub fn create_router(
    exercises_state: exercises::ExercisesState,
    routines_state: routines::RoutinesState,
    users_state: users::UsersState,
    sessions_state: sessions::SessionsState,
    progress_state: progress::ProgressState,
    stats_state: stats::StatsState,
    arithmetic_state: arithmetic::ArithmeticState,
) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        // Utility routes
        .route("/process", post(utility::process))
        .route("/concat", get(utility::concat))
        .route("/length", get(utility::length))
        // Exercise routes
        .route("/exercises", get(exercises::list).post(exercises::create))
        .route(
            "/exercises/{id}",
            get(exercises::show)
                .put(exercises::update)
                .patch(exercises::update)
                .delete(exercises::delete),
        )
        .with_state(exercises_state)
        // Routine routes
        .route("/routines", get(routines::list).post(routines::create))
        .route(
            "/routines/{id}",
            get(routines::show)
                .put(routines::update)
                .patch(routines::update)
                .delete(routines::delete),
        )
        .with_state(routines_state)
        // User routes
        .route("/users", get(users::list).post(users::create))
        .route(
            "/users/{id}",
            get(users::show)
                .put(users::update)
                .patch(users::update)
                .delete(users::delete),
        )
        .with_state(users_state)
        // Workout session routes
        .route("/sessions", get(sessions::list).post(sessions::create))
        .route(
            "/sessions/{id}",
            get(sessions::show)
                .put(sessions::update)
                .patch(sessions::update)
                .delete(sessions::delete),
        )
        .with_state(sessions_state)
        // Progress routes
        .route("/progress", get(progress::list).post(progress::create))
        .route(
            "/progress/{id}",
            get(progress::show)
                .put(progress::update)
                .patch(progress::update)
                .delete(progress::delete),
        )
        .with_state(progress_state)
        // Stats routes
        .route("/stats/user/{id}", get(stats::user_stats))
        .route("/stats/exercise/{id}", get(stats::exercise_stats))
        .with_state(stats_state)
        // Arithmetic routes
        .route(
            "/arithmetic",
            get(arithmetic::list)
                .post(arithmetic::create)
                .delete(arithmetic::clear_all),
        )
        .route(
            "/arithmetic/{id}",
            get(arithmetic::show)
                .put(arithmetic::replace)
                .patch(arithmetic::update)
                .delete(arithmetic::delete),
        )
        .with_state(arithmetic_state)
        .layer(TraceLayer::new_for_http())
}
