use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use tasklens::AppResult;
use tasklens::commands::{AppContext, Command};
use tasklens::config::{resolve_prefs_path, resolve_tasks_path};
use tasklens::preferences::JsonFilePreferenceStore;
use tasklens::source::JsonFileSource;

/// Tasklens - filter, sort and export task snapshots
#[derive(Parser)]
#[command(name = "tl")]
#[command(version = "0.1.0")]
#[command(about = "Filter, sort and export task snapshots", long_about = None)]
struct Args {
    /// Path to the task snapshot (can also be set via TL_TASKS_PATH env var)
    #[arg(long, global = true)]
    tasks: Option<PathBuf>,

    /// Path to the preferences file (can also be set via TL_PREFS_PATH env var)
    #[arg(long, global = true)]
    prefs: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Option<Command>,
}

/// Initialize logging from RUST_LOG, defaulting to warnings only
///
/// Examples:
/// - `RUST_LOG=debug` - show filter engine and store activity
/// - `RUST_LOG=tasklens=info` - show snapshot loads and exports
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .init();
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run_app().await {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

/// Main application logic - separated for testability
async fn run_app() -> AppResult<()> {
    let args = Args::parse();
    run_with_args(&args).await
}

/// Run the application with the given arguments
async fn run_with_args(args: &Args) -> AppResult<()> {
    let Some(cmd) = &args.command else {
        println!("Welcome to Tasklens!");
        println!("Use 'tl --help' for usage information.");
        return Ok(());
    };

    let ctx = AppContext::new(
        JsonFileSource::new(resolve_tasks_path(args.tasks.clone())),
        JsonFilePreferenceStore::new(resolve_prefs_path(args.prefs.clone())),
    );

    let output = cmd.execute(&ctx).await?;
    println!("{}", output);

    Ok(())
}
