//! jobmesh HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use jobmesh::adapters::{ScrapeAdapter, SourceAdapter};
use jobmesh::browser::HttpBrowser;
use jobmesh::cache::{SearchCache, SystemClock};
use jobmesh::config::Config;
use jobmesh::gateway::{HandlerState, create_router_with_state};
use jobmesh::model::Platform;
use jobmesh::orchestrator::Orchestrator;
use jobmesh::scoring::{GenAiCompletionClient, RelevanceScorer};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const DETAIL_LIMIT_PER_PAGE: usize = 10;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!(
        r#"
     ██╗ ██████╗ ██████╗ ███╗   ███╗███████╗███████╗██╗  ██╗
     ██║██╔═══██╗██╔══██╗████╗ ████║██╔════╝██╔════╝██║  ██║
     ██║██║   ██║██████╔╝██╔████╔██║█████╗  ███████╗███████║
██   ██║██║   ██║██╔══██╗██║╚██╔╝██║██╔══╝  ╚════██║██╔══██║
╚█████╔╝╚██████╔╝██████╔╝██║ ╚═╝ ██║███████╗███████║██║  ██║
 ╚════╝  ╚═════╝ ╚═════╝ ╚═╝     ╚═╝╚══════╝╚══════╝╚═╝  ╚═╝

        FETCH. MERGE. SCORE.
                                        AGPL-3.0
"#
    );

    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        model = %config.completion_model,
        "jobmesh starting"
    );

    let browser = Arc::new(HttpBrowser::new(
        config.adapter_timeout,
        config.session_cookie.clone(),
    )?);

    let adapters: Vec<Arc<dyn SourceAdapter>> = Platform::ALL
        .into_iter()
        .map(|platform| {
            Arc::new(ScrapeAdapter::new(
                platform,
                browser.clone() as Arc<dyn jobmesh::browser::BrowserClient>,
                config.detail_timeout,
                DETAIL_LIMIT_PER_PAGE,
            )) as Arc<dyn SourceAdapter>
        })
        .collect();

    let scorer = RelevanceScorer::new(
        Arc::new(GenAiCompletionClient::new()),
        config.completion_model.clone(),
        config.scoring_timeout,
    );

    let clock = Arc::new(SystemClock);
    let cache = SearchCache::new(config.cache_capacity, config.cache_ttl, clock.clone());

    let orchestrator = Arc::new(Orchestrator::new(
        adapters,
        scorer,
        cache,
        clock,
        config.adapter_timeout,
        config.per_platform_limit,
        config.pipeline_budget,
    ));

    let app = create_router_with_state(HandlerState::new(orchestrator));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("jobmesh shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("JOBMESH_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build runtime");

    rt.block_on(async {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
            .expect("failed to build client");

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
