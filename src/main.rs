use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use leitner_words::db::{self, LogOnError};
use leitner_words::state::AppState;
use leitner_words::store::SqliteStore;
use leitner_words::trainer::Trainer;
use leitner_words::{config, handlers, profiling};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leitner_words=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // No-op unless built with the profiling feature
    profiling::init();

    let settings = config::load();
    let pool = db::init_db(&settings.database_path).expect("Failed to initialize database");

    if let Some(seed_path) = &settings.seed_path {
        let conn = db::try_lock(&pool).expect("Database lock failed during startup");
        db::seed_words(&conn, seed_path).log_warn("Failed to seed word catalog");
    }

    let trainer = Trainer::with_sqlite(SqliteStore::new(pool), settings.study.clone());
    let app = handlers::router(AppState::new(trainer));

    let bind_addr = settings.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|_| panic!("Failed to bind to {}", bind_addr));

    tracing::info!("Server running on http://localhost:{}", settings.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server failed to start");

    profiling::shutdown();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
