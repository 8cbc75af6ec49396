use clap::Parser;
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::{Duration, Instant};
use studymitra_core::config;
use studymitra_core::storage::Store;
use studymitra_server::api::create_router;
use studymitra_server::api::handlers::AppState;
use studymitra_server::api::metrics;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "studymitra", about = "StudyMitra chapter and quiz API server")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = config::DEFAULT_PORT)]
    port: u16,

    /// Address to bind
    #[arg(long, default_value = config::DEFAULT_HOST)]
    host: String,

    /// Directory holding chapters.json and quizzes.json
    #[arg(short, long, env = "STUDYMITRA_DATA_DIR", default_value = config::DEFAULT_DATA_DIR)]
    data_dir: String,

    /// Graceful shutdown timeout in seconds
    #[arg(long, default_value_t = config::DEFAULT_SHUTDOWN_TIMEOUT_SECS)]
    shutdown_timeout: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(
                    "studymitra_server=info"
                        .parse()
                        .expect("valid directive literal"),
                )
                .add_directive(
                    "studymitra_core=info"
                        .parse()
                        .expect("valid directive literal"),
                )
                .add_directive("audit=info".parse().expect("valid directive literal")),
        )
        .init();

    let args = Args::parse();

    if args.port == 0 {
        eprintln!("Error: port must be > 0");
        std::process::exit(1);
    }
    let data_path = std::path::Path::new(&args.data_dir);
    if data_path.exists() && !data_path.is_dir() {
        eprintln!(
            "Error: data_dir '{}' exists but is not a directory",
            args.data_dir
        );
        std::process::exit(1);
    }

    // Unreadable or malformed collection files are fatal.
    let store = match Store::load_all(data_path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            eprintln!("Error: failed to load content from '{}': {}", args.data_dir, e);
            std::process::exit(1);
        }
    };

    let prometheus_handle =
        metrics_exporter_prometheus::PrometheusBuilder::new().install_recorder()?;

    let state = AppState {
        store: store.clone(),
        prometheus_handle,
        start_time: Instant::now(),
    };
    let app = create_router(state);

    let metrics_store = store.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(config::METRICS_REFRESH_SECS));
        loop {
            interval.tick().await;
            metrics::update_content_metrics(&metrics_store);
        }
    });

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %addr,
        data_dir = %args.data_dir,
        chapters = store.chapter_count(),
        quizzes = store.quiz_count(),
        "studymitra ready"
    );

    let shutdown_timeout = Duration::from_secs(args.shutdown_timeout);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_signal())
        .into_future();
    // Every mutation is already on disk, so there is nothing to flush; the
    // timeout only bounds how long in-flight requests may drain.
    tokio::select! {
        result = server => result?,
        _ = drain_deadline(shutdown_timeout) => {
            tracing::warn!(
                "Shutdown drain exceeded {}s, exiting with requests in flight",
                shutdown_timeout.as_secs()
            );
        }
    }

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves `timeout` after a shutdown signal arrives; never resolves otherwise.
async fn drain_deadline(timeout: Duration) {
    wait_for_signal().await;
    tokio::time::sleep(timeout).await;
}

async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }

    tracing::info!("Shutting down gracefully, draining in-flight requests...");
}
