use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use data_loader::{ItemId, Split, parser};
use methodology::{
    CandidateMethodology, CandidateTable, MethodologyKind, OutputShape, build_methodology,
    filter_all,
};
use rand::seq::IndexedRandom;
use std::collections::HashSet;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;

/// recsys-eval - candidate item sets for offline recommender evaluation
#[derive(Parser)]
#[command(name = "recsys-eval")]
#[command(about = "Compute per-user candidate items from a train/test split", long_about = None)]
struct Cli {
    /// Directory holding the split files
    #[arg(short, long, default_value = "data/split")]
    data_dir: PathBuf,

    /// Train set file name inside the data directory
    #[arg(long, default_value = "train.dat")]
    train_file: String,

    /// Test set file name inside the data directory
    #[arg(long, default_value = "test.dat")]
    test_file: String,

    #[command(subcommand)]
    command: Commands,
}

/// Which methodology to run and how to configure it
#[derive(Args, Clone)]
struct MethodologyArgs {
    /// test-ratings, test-items, training-items or all-items
    #[arg(short, long, default_value = "test-ratings")]
    methodology: MethodologyKind,

    /// Only keep items rated >= this score (finite; not allowed for all-items)
    #[arg(long)]
    threshold: Option<f32>,

    /// Item universe for all-items, one id per line (default: train + test items)
    #[arg(long)]
    universe_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute candidates for every test user
    Filter {
        #[command(flatten)]
        methodology: MethodologyArgs,

        /// Report per-user candidate counts instead of the full table
        #[arg(long)]
        per_user: bool,

        /// Print the table as JSON instead of TSV
        #[arg(long)]
        json: bool,

        /// Maximum number of rows (or users) to print
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show the candidates of a few random test users
    Sample {
        #[command(flatten)]
        methodology: MethodologyArgs,

        /// Number of users to sample
        #[arg(long, default_value = "5")]
        users: usize,

        /// Number of candidate items to show per user
        #[arg(long, default_value = "10")]
        items: usize,
    },

    /// Show size statistics of the split
    Stats,

    /// Time filter_all for every methodology
    Benchmark {
        /// Number of runs per methodology
        #[arg(long, default_value = "10")]
        runs: usize,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    eprintln!("Loading split from {}...", cli.data_dir.display());
    let start = Instant::now();
    let split = Split::load(&cli.data_dir, &cli.train_file, &cli.test_file)
        .context("Failed to load train/test split")?;
    eprintln!("{} Loaded split in {:?}", "✓".green(), start.elapsed());

    match cli.command {
        Commands::Filter {
            methodology,
            per_user,
            json,
            limit,
        } => handle_filter(&split, &methodology, per_user, json, limit)?,
        Commands::Sample {
            methodology,
            users,
            items,
        } => handle_sample(&split, &methodology, users, items)?,
        Commands::Stats => handle_stats(&split),
        Commands::Benchmark { runs } => handle_benchmark(&split, runs)?,
    }

    Ok(())
}

/// Build the methodology described on the command line
fn build_from_args(split: &Split, args: &MethodologyArgs) -> Result<Box<dyn CandidateMethodology>> {
    let universe = match args.methodology {
        MethodologyKind::AllItems => Some(load_universe(split, args.universe_file.as_ref())?),
        _ => None,
    };

    let methodology = build_methodology(args.methodology, args.threshold, universe)
        .with_context(|| format!("Invalid configuration for {}", args.methodology))?;
    info!("Using {} (threshold: {:?})", methodology, methodology.threshold());
    Ok(methodology)
}

fn load_universe(split: &Split, universe_file: Option<&PathBuf>) -> Result<HashSet<ItemId>> {
    match universe_file {
        Some(path) => {
            let items = parser::parse_item_list(path)
                .with_context(|| format!("Failed to read item universe {}", path.display()))?;
            Ok(items.into_iter().collect())
        }
        None => Ok(split
            .train
            .item_id_column()
            .chain(split.test.item_id_column())
            .cloned()
            .collect()),
    }
}

/// Handle the 'filter' command
fn handle_filter(
    split: &Split,
    args: &MethodologyArgs,
    per_user: bool,
    json: bool,
    limit: Option<usize>,
) -> Result<()> {
    let methodology = build_from_args(split, args)?;
    let limit = limit.unwrap_or(usize::MAX);

    if per_user {
        let streams = filter_all(methodology.as_ref(), &split.train, &split.test, OutputShape::PerUserStream)?
            .into_streams()
            .ok_or_else(|| anyhow!("expected per-user streams"))?;

        let mut counts: Vec<(String, usize)> = streams
            .into_iter()
            .map(|(user_id, stream)| {
                let distinct: HashSet<ItemId> = stream.collect();
                (user_id, distinct.len())
            })
            .collect();
        counts.sort();

        println!("{}", format!("Candidates per user ({}):", methodology).bold().blue());
        for (user_id, count) in counts.iter().take(limit) {
            println!("{}{}: {}", "• ".green(), user_id, count);
        }
        let total: usize = counts.iter().map(|(_, c)| c).sum();
        println!("{} users, {} candidate pairs", counts.len(), total);
        return Ok(());
    }

    let table = filter_all(methodology.as_ref(), &split.train, &split.test, OutputShape::Table)?
        .into_table()
        .ok_or_else(|| anyhow!("expected a candidate table"))?;

    if json {
        let rows: Vec<_> = table.iter().take(limit).collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print_table(&table, limit)?;
    }
    eprintln!("{} {} candidate pairs", "✓".green(), table.len());
    Ok(())
}

/// Write the table as TSV with a header row
fn print_table(table: &CandidateTable, limit: usize) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    writeln!(out, "{}", CandidateTable::COLUMNS.join("\t"))?;
    for pair in table.iter().take(limit) {
        writeln!(out, "{}\t{}", pair.user_id, pair.item_id)?;
    }
    out.flush()?;
    Ok(())
}

/// Handle the 'sample' command
fn handle_sample(split: &Split, args: &MethodologyArgs, users: usize, items: usize) -> Result<()> {
    let methodology = build_from_args(split, args)?;
    let mut streams = filter_all(methodology.as_ref(), &split.train, &split.test, OutputShape::PerUserStream)?
        .into_streams()
        .ok_or_else(|| anyhow!("expected per-user streams"))?;

    let mut user_ids: Vec<String> = streams.keys().cloned().collect();
    user_ids.sort();
    let sampled: Vec<String> = user_ids
        .choose_multiple(&mut rand::rng(), users)
        .cloned()
        .collect();

    println!("{}", format!("Sampled candidates ({}):", methodology).bold().blue());
    for user_id in sampled {
        let Some(stream) = streams.remove(&user_id) else {
            continue;
        };
        let mut candidates: Vec<ItemId> = stream.collect::<HashSet<_>>().into_iter().collect();
        candidates.sort();

        let seen = split.train.user_interactions_or_empty(&user_id).len();
        println!(
            "{} {} ({} train interactions, {} candidates)",
            "•".green(),
            user_id.bold(),
            seen,
            candidates.len()
        );
        for item_id in candidates.iter().take(items) {
            println!("    - {}", item_id);
        }
        if candidates.len() > items {
            println!("    ... {} more", candidates.len() - items);
        }
    }
    Ok(())
}

/// Handle the 'stats' command
fn handle_stats(split: &Split) {
    for (name, ratings) in [("Train", &split.train), ("Test", &split.test)] {
        let (users, items, interactions) = ratings.counts();
        let scored = ratings.iter().filter(|i| i.score.is_some()).count();
        println!("{}", format!("{} set:", name).bold().blue());
        println!("{}Users: {}", "• ".green(), users);
        println!("{}Items: {}", "• ".green(), items);
        println!("{}Interactions: {} ({} scored)", "• ".green(), interactions, scored);
    }

    let test_users = split.test.unique_user_ids();
    let cold = test_users
        .iter()
        .filter(|u| split.train.user_interactions_or_empty(u).is_empty())
        .count();
    println!("{}Test users without train history: {}", "• ".cyan(), cold);
}

/// Handle the 'benchmark' command
fn handle_benchmark(split: &Split, runs: usize) -> Result<()> {
    if runs == 0 {
        return Err(anyhow!("--runs must be at least 1"));
    }

    println!("{}", "Benchmark results:".bold().blue());
    for kind in MethodologyKind::ALL {
        let universe = match kind {
            MethodologyKind::AllItems => Some(load_universe(split, None)?),
            _ => None,
        };

        let mut timings: Vec<Duration> = Vec::with_capacity(runs);
        let mut rows = 0;
        for _ in 0..runs {
            // fresh instance per run so the pool computation is timed too
            let methodology = build_methodology(kind, None, universe.clone())?;
            let start = Instant::now();
            let table = filter_all(methodology.as_ref(), &split.train, &split.test, OutputShape::Table)?
                .into_table()
                .unwrap_or_default();
            timings.push(start.elapsed());
            rows = table.len();
        }

        let total: Duration = timings.iter().sum();
        let avg = total / timings.len() as u32;
        timings.sort();
        let p50 = timings[timings.len() / 2];
        let p95 = timings[((timings.len() as f32 * 0.95) as usize).min(timings.len() - 1)];

        println!(
            "{} {:<15} avg {:?}  p50 {:?}  p95 {:?}  ({} rows)",
            "•".green(),
            kind,
            avg,
            p50,
            p95,
            rows
        );
    }
    Ok(())
}
