use axum::http::{header, HeaderValue, Method};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fittrack::config::Config;
use fittrack::handlers::{arithmetic, exercises, progress, routines, sessions, stats, users};
use fittrack::repositories::{
    ExerciseRepository, OperationStore, ProgressRepository, RoutineRepository, SessionRepository,
    UserRepository,
};
use fittrack::{db, migrations, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fittrack=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    tracing::info!("Connecting to database: {}", config.database_url);

    // Create database pool
    let pool = db::create_pool(&config.database_url)?;

    // Run migrations
    migrations::run_migrations(&pool)?;

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

    // Build router
    let app = routes::create_router(
        exercises_state,
        routines_state,
        users_state,
        sessions_state,
        progress_state,
        stats_state,
        arithmetic_state,
    )
    .layer(cors_layer(&config));

    // Start server
    let addr = config.server_addr();
    tracing::info!("Starting server at http://{}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn cors_layer(config: &Config) -> CorsLayer {
    let allow_origin = match &config.cors_allowed_origins {
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| HeaderValue::from_str(origin).ok())
                .collect();
            if origins.is_empty() {
                AllowOrigin::any()
            } else {
                AllowOrigin::list(origins)
            }
        }
        None => AllowOrigin::any(),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
