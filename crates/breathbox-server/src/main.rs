use std::net::SocketAddr;
use std::path::PathBuf;

use breathbox_core::LedgerStore;
use breathbox_server::{router, AppState};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "breathbox-server", version, about = "Breathbox accountability server")]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:3000")]
    listen: SocketAddr,
    /// Ledger file path (defaults to the app data directory)
    #[arg(long)]
    data: Option<PathBuf>,
    /// Directory of static frontend assets
    #[arg(long, default_value = "public")]
    public: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("breathbox_server=info,tower_http=info")
        }))
        .init();

    let args = Args::parse();
    let store = match args.data {
        Some(path) => LedgerStore::open(path),
        None => LedgerStore::open_default()?,
    };
    info!("ledger at {}", store.path().display());

    let public = args.public.is_dir().then_some(args.public.as_path());
    if public.is_none() {
        info!(
            "no static assets at {}; serving the API only",
            args.public.display()
        );
    }
    let app = router(AppState::new(store), public);

    let listener = tokio::net::TcpListener::bind(args.listen).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down");
}
