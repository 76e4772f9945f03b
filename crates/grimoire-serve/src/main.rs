//! Grimoire - printable spell cards from rulebook search.
//!
//! With no arguments this starts the HTTP server. With entry names as
//! arguments it renders the same page a `POST /` would produce and
//! writes it to stdout.

use std::io::Write;

use axum::http::{HeaderValue, Request};
use clap::Parser;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use grimoire_serve::config::ALLOWED_ORIGINS;
use grimoire_serve::{AppState, Config, batch, router};

/// Grimoire - printable spell card renderer and server.
#[derive(Parser, Debug)]
#[command(name = "grimoire")]
#[command(about = "Printable spell cards from rulebook search", long_about = None)]
struct Args {
    /// Entry names to render as a one-shot batch to stdout.
    /// With no names, the HTTP server starts instead.
    names: Vec<String>,

    /// Path to .env file (optional).
    #[arg(long, env = "DOTENV_PATH", default_value = ".env")]
    dotenv: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load .env file if it exists
    if std::path::Path::new(&args.dotenv).exists() {
        dotenvy::from_path(&args.dotenv)?;
        eprintln!("Loaded environment from {}", args.dotenv);
    }

    // Initialize tracing. Diagnostics go to stderr: in batch mode stdout
    // carries the rendered page bytes.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration and build shared state
    let config = Config::from_env()?;
    let state = AppState::new(config)?;

    // Batch mode: render the named entries to stdout and exit
    if !args.names.is_empty() {
        let page = batch::assemble_page(&state, &args.names).await?;
        let mut stdout = std::io::stdout();
        stdout.write_all(&page)?;
        stdout.flush()?;
        return Ok(());
    }

    // Server mode
    let bind_addr = state.config.bind_addr.clone();

    let allowed = ALLOWED_ORIGINS
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;

    let app = router(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::span!(
                    Level::INFO,
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(allowed))
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "starting card server");

    axum::serve(listener, app).await?;

    Ok(())
}
