//! Arena CLI
//!
//! Play battle sessions, store them and show the aggregated leaderboard.

use anyhow::{bail, Context, Result};
use arena::{
    leaderboard_report, load_arena, load_config, run_session, schedule_report, sessions_report,
    standings_report, PlayOutcome, RunnerConfig, SessionStore, DEFAULT_CONFIG_FILE,
};
use battle_core::{aggregate, generate_schedule_with_rng, BattleError};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "arena", version, about = "Run head-to-head battle arenas")]
struct Cli {
    /// Runner config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Directory holding stored sessions (overrides config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a freshly generated schedule for an arena
    Schedule {
        arena: PathBuf,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play one session interactively and store the result
    Play {
        arena: PathBuf,
        #[arg(long)]
        player: String,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Aggregate stored sessions into a leaderboard
    Leaderboard {
        arena: PathBuf,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List stored sessions, newest first
    Sessions { arena: PathBuf },
    /// Delete every stored session of a player
    Forget {
        arena: PathBuf,
        #[arg(long)]
        player: String,
    },
}

fn init_logging(config: &RunnerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn show_schedule(arena_path: &Path, seed: Option<u64>) -> Result<()> {
    let arena = load_arena(arena_path)?;
    let schedule = generate_schedule_with_rng(&arena.items, &mut make_rng(seed));
    print!("{}", schedule_report(&arena.title, &schedule));
    Ok(())
}

fn play(store: &SessionStore, arena_path: &Path, player: &str, seed: Option<u64>) -> Result<()> {
    let arena = load_arena(arena_path)?;
    let player = player.trim();
    if player.is_empty() {
        bail!("player name must not be empty");
    }

    let mut session = match arena.start_session(player, &mut make_rng(seed)) {
        Ok(session) => session,
        Err(BattleError::NotEnoughCompetitors { found }) => {
            println!("Cannot start a session: {} has {} item(s), at least 2 are needed.", arena.title, found);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("=== {} ===", arena.title);
    if !arena.description.is_empty() {
        println!("{}", arena.description);
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let outcome = run_session(&mut session, stdin.lock(), &mut stdout)
        .context("failed to read player input")?;

    if outcome == PlayOutcome::Abandoned {
        println!();
        println!("Session abandoned; nothing was saved.");
        return Ok(());
    }

    let artifact = session.finish(&arena.id)?;
    println!();
    print!("{}", standings_report(player, &session.standings(&arena.items)));

    store
        .append(&artifact)
        .with_context(|| format!("failed to save session for {}", player))?;
    println!("\nResults saved.");
    Ok(())
}

fn show_leaderboard(store: &SessionStore, arena_path: &Path, json: bool) -> Result<()> {
    let arena = load_arena(arena_path)?;
    let sessions = store.load(&arena.id)?;
    let board = aggregate(&sessions, &arena.items);
    info!(arena = %arena.id, sessions = sessions.len(), "leaderboard aggregated");

    if json {
        println!("{}", serde_json::to_string_pretty(&board)?);
    } else {
        print!("{}", leaderboard_report(&arena.title, sessions.len(), &board));
    }
    Ok(())
}

fn show_sessions(store: &SessionStore, arena_path: &Path) -> Result<()> {
    let arena = load_arena(arena_path)?;
    let sessions = store.list_recent(&arena.id)?;
    if sessions.is_empty() {
        println!("No sessions recorded for {} yet.", arena.title);
        return Ok(());
    }
    print!("{}", sessions_report(&sessions));
    Ok(())
}

fn forget(store: &SessionStore, arena_path: &Path, player: &str) -> Result<()> {
    let arena = load_arena(arena_path)?;
    let player = player.trim();
    if player.is_empty() {
        bail!("player name must not be empty");
    }
    let removed = store.delete_player(&arena.id, player)?;
    println!("Deleted {} record(s) for {}", removed, player);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)
        .with_context(|| format!("failed to load config {}", cli.config.display()))?;
    init_logging(&config);

    let store = SessionStore::new(cli.data_dir.clone().unwrap_or_else(|| config.data_dir()));

    match &cli.command {
        Commands::Schedule { arena, seed } => show_schedule(arena, seed.or(config.seed)),
        Commands::Play { arena, player, seed } => play(&store, arena, player, seed.or(config.seed)),
        Commands::Leaderboard { arena, json } => show_leaderboard(&store, arena, *json),
        Commands::Sessions { arena } => show_sessions(&store, arena),
        Commands::Forget { arena, player } => forget(&store, arena, player),
    }
}
