use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use sea_orm::Database;
use tokio::signal;
use tracing::info;

use banquet_admin::config::AdminConfig;
use banquet_admin::jobs::spawn_tier_sweep;
use banquet_admin::router::build_router;
use banquet_admin::state::AppState;
use banquet_admin::usecase::restaurant_user::BootstrapOperatorUseCase;
use banquet_core::config::Config;
use banquet_core::tracing::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AdminConfig::from_env().context("load admin config")?;
    config.validate().context("invalid admin config")?;

    let db = Database::connect(&config.database_url)
        .await
        .context("connect to database")?;

    let redis = deadpool_redis::Config::from_url(&config.redis_url)
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .context("create Redis pool")?;

    let state = AppState {
        db,
        redis,
        http: reqwest::Client::new(),
        config: Arc::new(config),
    };

    if let (Some(account), Some(password)) = (
        state.config.bootstrap_account.as_deref(),
        state.config.bootstrap_password.as_deref(),
    ) {
        let usecase = BootstrapOperatorUseCase {
            users: state.user_repo(),
            bcrypt_cost: state.config.bcrypt_cost,
        };
        if usecase.execute(account, password).await? {
            info!(account, "platform operator created");
        }
    }

    if state.config.captcha_test_mode {
        tracing::warn!("captcha test mode is on: every code is 000000 and nothing is delivered");
    }

    let sweep = spawn_tier_sweep(
        state.clone(),
        Duration::from_secs(state.config.sweep_interval_secs),
    );

    let addr = format!("0.0.0.0:{}", state.config.admin_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {addr}"))?;

    info!("admin service listening on {addr}");
    axum::serve(listener, build_router(state.clone()))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    sweep.abort();
    state.redis.close();
    state.db.close().await.context("close database")?;
    info!("admin service stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
        info!("received ctrl-c, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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
}
