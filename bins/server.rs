use common::utils::logging::{init_logging, LogFormat};
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn main() -> std::process::ExitCode {
    // Load .env before anything reads RUST_LOG or SERVER_* variables
    dotenv().ok();

    let cfg_result = configs::AppConfig::load_and_validate();
    let format = match &cfg_result {
        Ok(cfg) if cfg.log.is_json() => LogFormat::Json,
        _ => LogFormat::Compact,
    };
    init_logging(format);
    info!(service = "blog_api", event = "logger_init", "tracing subscriber initialized");

    let cfg = match cfg_result {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "blog_api", event = "config_invalid", error = %e, "failed to load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "blog_api",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let worker_threads = cfg.server.worker_threads;
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "blog_api", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "blog_api",
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        addr = %cfg.bind_addr(),
        "blog api starting"
    );

    // server::run returns after a graceful shutdown (Ctrl-C / SIGTERM)
    match rt.block_on(server::run(cfg)) {
        Ok(()) => {
            info!(service = "blog_api", event = "stop", %service_id, pid, "blog api stopped normally");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "blog_api", event = "run_failed", error = %e, "server::run returned error");
            std::process::ExitCode::FAILURE
        }
    }
}
