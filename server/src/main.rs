use anyhow::{Context, Result};
use clap::Parser;
use server::{build_app, ServerConfig};
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

/// Serve keyword search over a folder of text files.
#[derive(Parser)]
#[command(name = "server")]
struct Args {
    /// Directory of .txt documents, indexed once at startup
    #[arg(long, default_value = "./docs")]
    docs: String,
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let config = ServerConfig::new(&args.docs).with_env_origins();
    let app = build_app(&config)?;

    let listener = TcpListener::bind((args.host.as_str(), args.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", args.host, args.port))?;
    tracing::info!(
        addr = %listener.local_addr()?,
        docs = %config.docs_dir.display(),
        cors_origins = config.allowed_origins.len(),
        "server listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await?;
    Ok(())
}
