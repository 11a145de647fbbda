use std::sync::Arc;

use anyhow::Result;
use axum::http::{HeaderValue, Method, header};
use sqlx::migrate::Migrator;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use common::database::{DatabaseConfig, health_check, init_pool, run_migrations};
use users::{
    AppState,
    accounts::AccountService,
    config::{Settings, StorageBackend},
    jwt::{JwtConfig, JwtService},
    repositories::{MemoryUserRepository, PgUserRepository, UserRepository},
    routes,
};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting users service");

    let settings = Settings::load()?;
    let jwt_service = JwtService::new(JwtConfig::from_env()?);

    let user_repository: Arc<dyn UserRepository> = match settings.storage.backend {
        StorageBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let pool = init_pool(&db_config).await?;

            if health_check(&pool).await? {
                info!("Database connection successful");
            } else {
                anyhow::bail!("Failed to connect to database");
            }

            run_migrations(&pool, &MIGRATOR).await?;
            Arc::new(PgUserRepository::new(pool))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory user storage; accounts are lost on restart");
            Arc::new(MemoryUserRepository::new())
        }
    };

    let app_state = AppState {
        accounts: AccountService::new(user_repository, jwt_service),
    };

    let cors = CorsLayer::new()
        .allow_origin(settings.cors.allowed_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]);

    let app = routes::create_router(app_state).layer(cors);

    let address = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Users service listening on {}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
