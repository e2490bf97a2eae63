use std::path::PathBuf;

use billbot::prelude::*;
use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Deterministic bill-state reconstruction over LIS feed snapshots
#[derive(Parser, Debug)]
#[command(name = "billbot")]
#[command(about = "Reconstruct tracked-bill states from legislature record feeds")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

/// Feed snapshot and watchlist inputs shared by the subcommands
#[derive(ClapArgs, Debug)]
struct FeedArgs {
    /// Bill master feed (JSON array of rows)
    #[arg(long)]
    master: PathBuf,

    /// Action-history feed (JSON array of rows)
    #[arg(long)]
    history: PathBuf,

    /// Committee docket feed (JSON array of rows)
    #[arg(long)]
    dockets: Option<PathBuf>,

    /// Scraped meeting-time map (JSON: date -> committee key -> time)
    #[arg(long)]
    meetings: Option<PathBuf>,

    /// YAML watchlist with tracked bills and category definitions
    #[arg(long)]
    watchlist: Option<PathBuf>,

    /// Bill labels to track, in addition to the watchlist (space-separated)
    #[arg(short, long, num_args = 0..)]
    bills: Vec<String>,

    /// Limit number of bills processed
    #[arg(long)]
    limit: Option<usize>,

    /// Drop meetings before this date (YYYY-MM-DD)
    #[arg(long)]
    as_of: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Reconstruct and print one state per tracked bill (JSON lines)
    Status(FeedArgs),

    /// Print only the upcoming meetings per tracked bill (JSON lines)
    Meetings(FeedArgs),
}

fn print_available_commands() {
    println!("Available commands:");
    println!("  status    Reconstruct and print one state per tracked bill");
    println!("  meetings  Print only the upcoming meetings per tracked bill");
}

fn build_config(args: &FeedArgs) -> anyhow::Result<Config> {
    let mut builder = ConfigBuilder::new();

    if let Some(watchlist) = &args.watchlist {
        builder = builder.watchlist(watchlist)?;
    }
    builder = builder.bills(&args.bills);

    if let Some(limit) = args.limit {
        builder = builder.limit(limit);
    }
    if let Some(as_of) = args.as_of {
        builder = builder.as_of(as_of);
    }

    Ok(builder.build()?)
}

async fn run_status_command(args: FeedArgs) -> anyhow::Result<()> {
    let config = build_config(&args)?;
    let snapshot = FeedSnapshot::load(
        &args.master,
        &args.history,
        args.dockets.as_deref(),
        args.meetings.as_deref(),
    )?;

    let engine = ReconstructionEngine::new(config);
    let mut stream = engine.process(snapshot);

    // Write JSON to stdout (one per line)
    while let Some(result) = stream.next().await {
        match result {
            Ok(state) => {
                let json = serde_json::to_string(&state)?;
                println!("{}", json);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
            }
        }
    }

    Ok(())
}

async fn run_meetings_command(args: FeedArgs) -> anyhow::Result<()> {
    let config = build_config(&args)?;
    let snapshot = FeedSnapshot::load(
        &args.master,
        &args.history,
        args.dockets.as_deref(),
        args.meetings.as_deref(),
    )?;

    let engine = ReconstructionEngine::new(config);
    let mut stream = engine.process(snapshot);

    while let Some(result) = stream.next().await {
        match result {
            Ok(state) => {
                for meeting in &state.upcoming_meetings {
                    let json = serde_json::json!({
                        "bill": state.key,
                        "date": meeting.date,
                        "committee": meeting.committee_display_name,
                        "time": meeting.time_display,
                        "rank": meeting.rank_time,
                    });
                    println!("{}", serde_json::to_string(&json)?);
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Some(Command::Status(feed_args)) => run_status_command(feed_args).await,
        Some(Command::Meetings(feed_args)) => run_meetings_command(feed_args).await,
        None => {
            print_available_commands();
            Ok(())
        }
    }
}
