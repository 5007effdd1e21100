use std::sync::Arc;

use blog_api::{
    config::Config,
    repositories::{schema, PostgresRepo},
    routes::{configure_cors, create_routes},
    services::posts::PostsService,
    telemetry::init_tracing,
    AppState,
};
use sqlx::postgres::PgPoolOptions;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let config = Config::init();
    init_tracing(config.json_logs);

    let pool = match PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.db_acquire_timeout)
        .connect(&config.database_url)
        .await
    {
        Ok(pool) => {
            info!("Connection to the database is successful");
            pool
        }
        Err(err) => {
            error!("Failed to connect to the database: {:?}", err);
            std::process::exit(1);
        }
    };

    if config.environment.manages_schema() {
        if let Err(err) = schema::initialise(&pool).await {
            error!("Failed to initialise the database schema: {:?}", err);
            std::process::exit(1);
        }
    }

    let repo = PostgresRepo::new(pool);

    let app_state = AppState {
        config: config.clone(),
        posts_service: PostsService::new(Arc::new(repo)),
    };

    let app = create_routes(Arc::new(app_state)).layer(configure_cors());

    let listener = match tokio::net::TcpListener::bind(format!("[::]:{}", config.port)).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind port {}: {:?}", config.port, err);
            std::process::exit(1);
        }
    };

    info!(
        port = config.port,
        prefix = %config.route_prefix,
        environment = ?config.environment,
        "Blog API listening"
    );

    if let Err(err) = axum::serve(listener, app).await {
        error!("Server error: {:?}", err);
        std::process::exit(1);
    }
}
