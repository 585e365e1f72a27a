use std::sync::Arc;

use axum::http::HeaderName;
use sqlx::PgPool;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use academy::adapters::auth::{Argon2PasswordHasher, JwtTokenService};
use academy::adapters::http::{app_router, AppDeps};
use academy::adapters::postgres::{
    PostgresCourseRepository, PostgresPurchaseLedger, PostgresUserRepository,
};
use academy::adapters::stripe::StripePaymentAdapter;
use academy::application::handlers::account::AdminEmails;
use academy::config::{AppConfig, CorsPolicy, ServerConfig};

const REQUEST_ID_HEADER: &str = "x-request-id";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await?;
    if config.database.run_migrations {
        run_migrations(&pool).await?;
    }

    let tokens = Arc::new(JwtTokenService::new(
        &config.auth.jwt_secret,
        config.auth.token_ttl(),
    ));
    let admin_emails = AdminEmails::from_config(&config.auth.admin_emails_list());

    if config.payment.is_live_mode() {
        tracing::info!("Stripe live mode");
    }

    let deps = AppDeps {
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        ledger: Arc::new(PostgresPurchaseLedger::new(pool.clone())),
        courses: Arc::new(PostgresCourseRepository::new(pool.clone())),
        payment_provider: Arc::new(StripePaymentAdapter::new(config.payment.stripe_config())),
        session_validator: tokens.clone(),
        token_issuer: tokens,
        password_hasher: Arc::new(Argon2PasswordHasher::new()),
        admin_emails,
        login_retry: config.auth.login_retry(),
    };

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let app = app_router(deps)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(config.server.cors_policy()?))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "academy listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// JSON logs in production, human-readable otherwise. `RUST_LOG` wins over
/// the configured filter.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if server.is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    tracing::info!("Running database migrations");
    sqlx::migrate!("./migrations").run(pool).await
}

fn cors_layer(policy: CorsPolicy) -> CorsLayer {
    match policy {
        CorsPolicy::AllowList(origins) => CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsPolicy::Permissive => CorsLayer::permissive(),
        CorsPolicy::SameOriginOnly => {
            tracing::warn!("No CORS origins configured; cross-origin requests will be refused");
            CorsLayer::new()
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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
    tracing::info!("Shutting down");
}
