//! iFixDocs binary: thin CLI shell over the [`ifixdocs_server`] library crate.

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

use tower_http::services::{ServeDir, ServeFile};

use ifixdocs_server::types::{AppContext, DEFAULT_PORT};
use ifixdocs_server::{api, load_docs_config, CONFIG_FILE};

// ---------------------------------------------------------------------------
// CLI definition (clap derive)
// ---------------------------------------------------------------------------

/// iFixDocs backend: clone a repository and serve per-file Markdown docs.
#[derive(Parser)]
#[command(name = "ifixdocs", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (default: ./ifixdocs.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to a built frontend to serve as static files
    #[arg(long)]
    dist: Option<PathBuf>,

    /// Bind to 0.0.0.0 instead of 127.0.0.1 (localhost)
    #[arg(long)]
    bind_all: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Graceful shutdown signal
// ---------------------------------------------------------------------------

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => info!("Received SIGINT, shutting down..."),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
                }
            }
            Err(e) => {
                error!(error = %e, "Failed to register SIGTERM handler");
                let _ = ctrl_c.await;
                info!("Received SIGINT, shutting down...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = ctrl_c.await;
        info!("Received Ctrl+C, shutting down...");
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ifixdocs=info".parse().expect("static directive")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        clap_complete::generate(*shell, &mut Cli::command(), "ifixdocs", &mut std::io::stdout());
        return;
    }

    let config_path = cli.config.clone().unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
    let config = load_docs_config(&config_path);
    info!(
        extensions = ?config.extensions,
        history_limit = config.history_limit,
        edits_dir = %config.edits_dir.display(),
        "Loaded configuration"
    );

    let mut app = api::router(AppContext::new(config));

    if let Some(dist_dir) = &cli.dist {
        let index_html = dist_dir.join("index.html");
        if !index_html.exists() {
            error!(dist = %dist_dir.display(), "No index.html in dist directory");
            std::process::exit(1);
        }
        app = app.fallback_service(
            ServeDir::new(dist_dir).not_found_service(ServeFile::new(index_html)),
        );
        info!(dist = %dist_dir.display(), "Serving frontend");
    }

    // Bind address: 127.0.0.1 by default, --bind-all for 0.0.0.0
    let bind_addr = if cli.bind_all { "0.0.0.0" } else { "127.0.0.1" };
    let port: u16 =
        std::env::var("PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(DEFAULT_PORT);

    let listener = tokio::net::TcpListener::bind(format!("{bind_addr}:{port}"))
        .await
        .unwrap_or_else(|e| {
            error!(port = port, error = %e, "Could not bind to port");
            eprintln!("  Try: PORT=<port> ifixdocs");
            std::process::exit(1);
        });

    info!(port = port, "http://{bind_addr}:{port}");

    if let Err(e) = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await {
        error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
