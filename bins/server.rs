use anyhow::Context;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tracing::{error, info};

use configs::{AppConfig, LogFormat};
use service::TalentService;

fn init_logging(cfg: Option<&AppConfig>) {
    let json = cfg.map(|c| c.logging.format == LogFormat::Json).unwrap_or(false);
    let fallback = cfg.and_then(|c| c.logging.filter.as_deref());
    common::utils::logging::init_logging(json, fallback);
    info!(service = "server", event = "logger_init", "tracing subscriber initialized");
}

/// Connect, migrate and compose the decorated service stack.
async fn start(cfg: &AppConfig) -> anyhow::Result<TalentService> {
    common::env::ensure_database_dir(&cfg.database.url).await?;
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .context("connect database")?;
    migration::Migrator::up(&db, None).await.context("run migrations")?;
    info!(service = "server", event = "migrated", "schema up to date");
    Ok(service::build_service(db, &cfg.auth))
}

fn main() -> std::process::ExitCode {
    // .env first so RUST_LOG, CONFIG_PATH and DATABASE_URL apply
    dotenv().ok();
    let cfg = AppConfig::load_and_validate();
    init_logging(cfg.as_ref().ok());
    let cfg = match cfg {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "server", event = "config_invalid", error = %e, "failed to load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };

    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(service = "server", event = "panic", pid, message = %info, "unhandled panic occurred");
    }));

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads {
        builder.worker_threads(w);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "server", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "server",
        event = "start",
        pid,
        version,
        threads = cfg.server.worker_threads.unwrap_or_default(),
        "talent hub service starting"
    );

    rt.block_on(async move {
        let stack = tokio::select! {
            res = start(&cfg) => match res {
                Ok(stack) => stack,
                Err(e) => {
                    error!(service = "server", event = "start_failed", error = ?e, "service stack failed to start");
                    return std::process::ExitCode::FAILURE;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!(service = "server", event = "shutdown_signal", pid, "received Ctrl+C during startup");
                return std::process::ExitCode::SUCCESS;
            }
        };

        // Transport is mounted by the surrounding deployment; this process
        // owns the stack and the pool until asked to stop.
        info!(
            service = "server",
            event = "ready",
            pid,
            listen = %format!("{}:{}", cfg.server.host, cfg.server.port),
            "service stack ready"
        );
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(service = "server", event = "signal_error", error = %e, "cannot listen for Ctrl+C");
        }
        info!(service = "server", event = "stop", pid, "shutting down");
        drop(stack);
        std::process::ExitCode::SUCCESS
    })
}
