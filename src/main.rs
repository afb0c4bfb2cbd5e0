use tokenguard::domain::auth::SigningKeyProvider;
use tokenguard::infrastructure::auth::JwtTokenCodec;
use tokenguard::infrastructure::config::AppConfig;
use tokenguard::infrastructure::google::GoogleIdentityVerifier;
use tokenguard::infrastructure::keys::{RandomKeyProvider, StaticKeyProvider};
use tokenguard::infrastructure::state::{AppState, Repositories};
use tokenguard::infrastructure::db;
use tokenguard::presentation;

use dotenvy::dotenv;
use std::env;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run(async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}

async fn run<F>(shutdown_signal: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    dotenv().ok();

    // Ignore the error, tests may initialize more than once
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "tokenguard=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    let config = AppConfig::from_env()?;
    let (listener, app) = bootstrap(&config).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    Ok(())
}

async fn bootstrap(config: &AppConfig) -> anyhow::Result<(tokio::net::TcpListener, axum::Router)> {
    let pool = db::create_pool(&config.database).await?;

    sqlx::migrate!().run(&pool).await?;

    let key_provider: Arc<dyn SigningKeyProvider> = match &config.jwt_secret {
        Some(secret) => Arc::new(StaticKeyProvider::new(secret.as_bytes())),
        None => {
            tracing::warn!("JWT_SECRET not set, tokens will not survive a restart");
            Arc::new(RandomKeyProvider::new())
        }
    };
    // Fail at start-up rather than on the first login
    key_provider.secret_key()?;

    let identity_verifier = GoogleIdentityVerifier::new(
        config.identity.token_info_url.clone(),
        config.identity.timeout,
    )?;

    let state = AppState::new(
        pool.clone(),
        Repositories::postgres(&pool),
        Arc::new(JwtTokenCodec::new(key_provider)),
        Arc::new(identity_verifier),
    );

    let app = presentation::router::app(state, &config.http)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http.port));
    tracing::debug!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    Ok((listener, app))
}
