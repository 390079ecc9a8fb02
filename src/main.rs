use sqlx::PgPool;
use tracing_subscriber::EnvFilter;

use tasklist_api::{config, routes, state};

#[tokio::main]
async fn main() {
    let config = config::Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let db = PgPool::connect(&config.database_url)
        .await
        .expect("Error connecting DB");

    sqlx::migrate!()
        .run(&db)
        .await
        .expect("Error running migrations");

    let state = state::AppState::new(db, &config);

    let app = routes::routes(state);

    let listener = tokio::net::TcpListener::bind(config.addr()).await.unwrap();

    tracing::info!("server is chilling at http://{}", config.addr());

    axum::serve(listener, app).await.unwrap();
}
