// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use eat_n_split::{balance_message, format_amount, AppState, Config};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "eat-n-split")]
#[command(about = "Split bills with friends and keep a running balance", version)]
struct Args {
    /// JSON config with seed friends, avatar base URL and currency
    #[arg(short, long, env = "EAT_N_SPLIT_CONFIG")]
    config: Option<PathBuf>,

    /// Write logs to this file (the terminal is owned by the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the ledger and exit without starting the UI
    #[arg(long)]
    summary: bool,

    /// Print the ledger summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let config = Config::load_or_default(args.config.as_deref())?;
    let state = AppState::new(config.directory(), &config.avatar_base_url);
    tracing::info!(friends = state.friends.len(), "session started");

    let state = if args.summary {
        state
    } else {
        run_ui_mode(state, &config)?
    };

    print_summary(&state, &config.currency, args.json)?;
    Ok(())
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(state: AppState, config: &Config) -> Result<AppState> {
    let mut app = ui::App::new(state, config.currency.clone());
    ui::run_ui(&mut app)?;

    tracing::info!("ui closed");
    Ok(app.state)
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_state: AppState, _config: &Config) -> Result<AppState> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or print the ledger with: eat-n-split --summary");
    std::process::exit(1);
}

fn print_summary(state: &AppState, currency: &str, json: bool) -> Result<()> {
    let totals = state.ledger_totals();

    if json {
        let report = serde_json::json!({
            "friends": state.friends,
            "totals": totals,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("🍽️  Eat-N-Split ledger");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for friend in state.friends.iter() {
        let (message, _) = balance_message(friend, currency);
        println!("  {:<20} {}", friend.name, message);
    }
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(
        "  Owed to you: {}{}   You owe: {}{}   Net: {}{}",
        currency,
        format_amount(totals.owed_to_you),
        currency,
        format_amount(totals.you_owe),
        currency,
        format_amount(totals.net),
    );

    Ok(())
}
