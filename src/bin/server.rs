use std::{
    fs::{self, OpenOptions},
    net::SocketAddr,
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use tally_rs::{
    AppState, Error, Ledger, LedgerConfig, TransactionRecord, build_router, get_local_offset,
    graceful_shutdown,
};

/// The web server for tally_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The port to serve the app from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The canonical timezone used for dates, e.g. "Asia/Kolkata".
    #[arg(long, env = "TIMEZONE", default_value = "Etc/UTC")]
    timezone: String,

    /// File path to a JSON file with the account and category options.
    #[arg(long)]
    config: Option<PathBuf>,

    /// File path to a JSON array of transactions to start with.
    #[arg(long, conflicts_with = "markup_path")]
    seed_path: Option<PathBuf>,

    /// File path to a pre-rendered transactions table to read transactions from.
    #[arg(long)]
    markup_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();

    let args = Args::parse();

    let state = match build_state(&args) {
        Ok(state) => state,
        Err(error) => {
            tracing::error!("Could not start the server: {error}");
            return ExitCode::FAILURE;
        }
    };

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state));

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    tracing::info!("HTTP server listening on http://{addr}");
    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server error: {error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn build_state(args: &Args) -> Result<AppState, Error> {
    if get_local_offset(&args.timezone).is_none() {
        return Err(Error::InvalidTimezoneError(args.timezone.clone()));
    }

    let config = match &args.config {
        Some(path) => LedgerConfig::from_path(path)?,
        None => LedgerConfig::default(),
    };

    let mut ledger = Ledger::new();

    if let Some(path) = &args.seed_path {
        ledger.seed(load_seed(path)?)?;
    } else if let Some(path) = &args.markup_path {
        let markup = fs::read_to_string(path)
            .map_err(|error| Error::InvalidSeed(format!("could not read {path:?}: {error}")))?;
        let report = ledger.bootstrap(&markup);

        for skipped in &report.skipped {
            tracing::warn!("Skipped row {} of {path:?}: {}", skipped.index, skipped.error);
        }
    }

    Ok(AppState::new(ledger, &args.timezone, config))
}

fn load_seed(path: &Path) -> Result<Vec<TransactionRecord>, Error> {
    let text = fs::read_to_string(path)
        .map_err(|error| Error::InvalidSeed(format!("could not read {path:?}: {error}")))?;

    serde_json::from_str(&text)
        .map_err(|error| Error::InvalidSeed(format!("could not parse {path:?}: {error}")))
}

fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(filter::LevelFilter::DEBUG),
        )
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // Errors are logged by the handlers and the logging middleware.
        .on_failure(());

    router.layer(tracing_layer)
}
